use yew::prelude::*;

use crate::contexts::subscription::use_subscription;
use crate::models::subscription::{Feature, SubscriptionTier};

#[derive(Properties, PartialEq)]
pub struct PremiumGateProps {
    pub feature: Feature,
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children only when the current subscription grants the
/// feature. Fail-closed: with nothing loaded the upsell panel shows.
#[function_component(PremiumGate)]
pub fn premium_gate(props: &PremiumGateProps) -> Html {
    let subscription = use_subscription();

    if subscription.has_feature(props.feature) {
        return props.children.clone();
    }

    let premium_plan = subscription
        .plans()
        .iter()
        .find(|plan| plan.tier == SubscriptionTier::Premium)
        .cloned();

    let on_upgrade = premium_plan.as_ref().map(|plan| {
        let upgrade = subscription.upgrade.clone();
        let plan_id = plan.id.clone();
        Callback::from(move |_: MouseEvent| upgrade.emit(plan_id.clone()))
    });

    html! {
        <div class="premium-gate">
            <h3>{"프리미엄 기능입니다"}</h3>
            <p>{"구독을 업그레이드하면 이용할 수 있습니다."}</p>
            {
                match (premium_plan, on_upgrade) {
                    (Some(plan), Some(onclick)) => html! {
                        <button class="upgrade-button" {onclick} disabled={subscription.is_loading()}>
                            {format!("{} 시작하기 (월 {}원)", plan.name, plan.monthly_price)}
                        </button>
                    },
                    _ => html! {},
                }
            }
        </div>
    }
}
