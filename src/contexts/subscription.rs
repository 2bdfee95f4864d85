use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::contexts::auth::use_auth;
use crate::hooks::use_query::{EngineHandle, use_engine};
use crate::models::error::AppError;
use crate::models::subscription::{Feature, Plan, Subscription};
use crate::services::engine::AnalysisKind;

const CURRENT_PATH: &str = "/api/v1/subscriptions/current";
const PLANS_PATH: &str = "/api/v1/subscriptions/plans";
const UPGRADE_PATH: &str = "/api/v1/subscriptions/upgrade";
const CANCEL_PATH: &str = "/api/v1/subscriptions/cancel";

#[derive(Clone, Debug, PartialEq)]
pub struct SubscriptionSnapshot {
    pub subscription: Option<Rc<Subscription>>,
    pub plans: Rc<Vec<Plan>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for SubscriptionSnapshot {
    fn default() -> Self {
        Self {
            subscription: None,
            plans: Rc::new(Vec::new()),
            is_loading: false,
            error: None,
        }
    }
}

/// Entitlement state plus the two mutations. Neither mutation is optimistic:
/// both await server confirmation and then refetch the recorded truth, so
/// the client never believes in an entitlement the server has not granted.
#[derive(Clone, PartialEq)]
pub struct SubscriptionContext {
    pub snapshot: SubscriptionSnapshot,
    pub upgrade: Callback<String>,
    pub cancel: Callback<()>,
}

impl SubscriptionContext {
    pub fn subscription(&self) -> Option<&Rc<Subscription>> {
        self.snapshot.subscription.as_ref()
    }

    pub fn plans(&self) -> &[Plan] {
        &self.snapshot.plans
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.is_loading
    }

    /// Fail-closed: false until a subscription has loaded, whatever the
    /// feature.
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.snapshot
            .subscription
            .as_ref()
            .is_some_and(|s| s.has_feature(feature))
    }
}

/// Fails fast when called outside `SubscriptionProvider`; that is a wiring
/// bug, not a runtime condition.
#[hook]
pub fn use_subscription() -> SubscriptionContext {
    use_context::<SubscriptionContext>()
        .expect("use_subscription must be called inside SubscriptionProvider")
}

#[derive(Properties, PartialEq)]
pub struct SubscriptionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(SubscriptionProvider)]
pub fn subscription_provider(props: &SubscriptionProviderProps) -> Html {
    let engine = use_engine();
    let auth = use_auth();
    let snapshot = use_state(SubscriptionSnapshot::default);

    // Load the plan catalog and, when logged in, the current subscription.
    // Re-runs whenever the auth state flips.
    {
        let snapshot = snapshot.clone();
        let engine = engine.clone();

        use_effect_with(auth.is_authenticated(), move |authenticated| {
            let authenticated = *authenticated;
            snapshot.set(SubscriptionSnapshot {
                is_loading: true,
                ..(*snapshot).clone()
            });

            spawn_local(async move {
                let plans = match engine.0.client().get::<Vec<Plan>>(PLANS_PATH).await {
                    Ok(plans) => Rc::new(plans),
                    Err(e) => {
                        gloo::console::warn!(&format!("Failed to load plan catalog: {e}"));
                        Rc::new(Vec::new())
                    }
                };

                if !authenticated {
                    snapshot.set(SubscriptionSnapshot {
                        subscription: None,
                        plans,
                        is_loading: false,
                        error: None,
                    });
                    return;
                }

                match engine.0.client().get::<Subscription>(CURRENT_PATH).await {
                    Ok(subscription) => snapshot.set(SubscriptionSnapshot {
                        subscription: Some(Rc::new(subscription)),
                        plans,
                        is_loading: false,
                        error: None,
                    }),
                    Err(e) => snapshot.set(SubscriptionSnapshot {
                        subscription: None,
                        plans,
                        is_loading: false,
                        error: Some(e.to_string()),
                    }),
                }
            });

            || ()
        });
    }

    let upgrade = {
        let snapshot = snapshot.clone();
        let engine = engine.clone();
        Callback::from(move |plan_id: String| {
            let snapshot = snapshot.clone();
            let engine = engine.clone();
            spawn_local(async move {
                snapshot.set(SubscriptionSnapshot {
                    is_loading: true,
                    ..(*snapshot).clone()
                });
                let body = serde_json::json!({ "plan_id": plan_id });
                let confirmed = engine
                    .0
                    .client()
                    .post::<serde_json::Value, _>(UPGRADE_PATH, &body)
                    .await;
                apply_mutation_result(&engine, &snapshot, confirmed).await;
            });
        })
    };

    let cancel = {
        let snapshot = snapshot.clone();
        let engine = engine.clone();
        Callback::from(move |()| {
            let snapshot = snapshot.clone();
            let engine = engine.clone();
            spawn_local(async move {
                snapshot.set(SubscriptionSnapshot {
                    is_loading: true,
                    ..(*snapshot).clone()
                });
                let confirmed = engine
                    .0
                    .client()
                    .post::<serde_json::Value, _>(CANCEL_PATH, &serde_json::json!({}))
                    .await;
                apply_mutation_result(&engine, &snapshot, confirmed).await;
            });
        })
    };

    let context = SubscriptionContext {
        snapshot: (*snapshot).clone(),
        upgrade,
        cancel,
    };

    html! {
        <ContextProvider<SubscriptionContext> {context}>
            { props.children.clone() }
        </ContextProvider<SubscriptionContext>>
    }
}

/// After a confirmed upgrade or cancel, the entitlement recorded on the
/// server is the only truth: drop premium-scoped cache entries and refetch.
/// On failure the previous snapshot stays in place with the error attached.
async fn apply_mutation_result(
    engine: &EngineHandle,
    snapshot: &UseStateHandle<SubscriptionSnapshot>,
    confirmed: Result<serde_json::Value, AppError>,
) {
    match confirmed {
        Ok(_) => {
            engine.0.invalidate(AnalysisKind::GapInvestment);
            match engine.0.client().get::<Subscription>(CURRENT_PATH).await {
                Ok(subscription) => snapshot.set(SubscriptionSnapshot {
                    subscription: Some(Rc::new(subscription)),
                    is_loading: false,
                    error: None,
                    ..(**snapshot).clone()
                }),
                Err(e) => snapshot.set(SubscriptionSnapshot {
                    is_loading: false,
                    error: Some(e.to_string()),
                    ..(**snapshot).clone()
                }),
            }
        }
        Err(e) => snapshot.set(SubscriptionSnapshot {
            is_loading: false,
            error: Some(e.to_string()),
            ..(**snapshot).clone()
        }),
    }
}
