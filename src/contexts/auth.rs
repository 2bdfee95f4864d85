use std::rc::Rc;

use gloo_storage::Storage;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_query::{EngineHandle, use_engine};
use crate::models::error::AppError;
use crate::models::session::{Session, UserProfile};

const SESSION_STORAGE_KEY: &str = "session";

const LOGIN_PATH: &str = "/api/v1/auth/login";
const REGISTER_PATH: &str = "/api/v1/auth/register";
const ME_PATH: &str = "/api/v1/auth/me";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(Rc<Session>),
    Error(String),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Rc<Session>> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

pub enum AuthAction {
    Started,
    LoggedIn(Rc<Session>),
    Failed(String),
    LoggedOut,
    SessionExpired,
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: AuthAction) -> Rc<Self> {
        match action {
            AuthAction::Started => Rc::new(AuthState::Authenticating),
            AuthAction::LoggedIn(session) => Rc::new(AuthState::Authenticated(session)),
            AuthAction::Failed(message) => Rc::new(AuthState::Error(message)),
            AuthAction::LoggedOut | AuthAction::SessionExpired => Rc::new(AuthState::Anonymous),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub state: AuthState,
    pub login: Callback<Credentials>,
    pub register: Callback<RegisterPayload>,
    pub logout: Callback<()>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }
}

/// Fails fast when called outside `AuthProvider`; that is a wiring bug, not
/// a runtime condition.
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth must be called inside AuthProvider")
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let engine = use_engine();
    let state = use_reducer(|| AuthState::Anonymous);

    // Startup: wire token invalidation, then restore any persisted session.
    {
        let state = state.clone();
        let engine = engine.clone();

        use_effect_with((), move |_| {
            let tokens = engine.0.client().tokens().clone();

            // The client drops the token when the backend rejects it; the
            // session is over and the user has to log in again.
            {
                let dispatcher = state.dispatcher();
                tokens.set_on_invalidated(move || {
                    clear_persisted_session();
                    dispatcher.dispatch(AuthAction::SessionExpired);
                });
            }

            if let Some(session) = load_persisted_session() {
                tokens.set_token(session.token.clone());
                state.dispatch(AuthAction::Started);

                spawn_local(async move {
                    match engine.0.client().get::<UserProfile>(ME_PATH).await {
                        Ok(profile) => {
                            let session = Session {
                                user: profile,
                                ..session
                            };
                            state.dispatch(AuthAction::LoggedIn(Rc::new(session)));
                        }
                        Err(AppError::AuthError(_)) => {
                            // invalidate() already cleared the token and
                            // dispatched SessionExpired; nothing left to do.
                        }
                        Err(e) => {
                            // Backend unreachable is not an invalid token;
                            // keep the persisted session.
                            gloo::console::warn!(&format!(
                                "Session validation unavailable: {e}"
                            ));
                            state.dispatch(AuthAction::LoggedIn(Rc::new(session)));
                        }
                    }
                });
            }

            || ()
        });
    }

    let login = {
        let state = state.clone();
        let engine = engine.clone();
        Callback::from(move |credentials: Credentials| {
            let state = state.clone();
            let engine = engine.clone();
            state.dispatch(AuthAction::Started);
            spawn_local(async move {
                match engine
                    .0
                    .client()
                    .post::<Session, _>(LOGIN_PATH, &credentials)
                    .await
                {
                    Ok(session) => apply_session(&engine, &state, session),
                    Err(e) => state.dispatch(AuthAction::Failed(e.to_string())),
                }
            });
        })
    };

    let register = {
        let state = state.clone();
        let engine = engine.clone();
        Callback::from(move |payload: RegisterPayload| {
            let state = state.clone();
            let engine = engine.clone();
            state.dispatch(AuthAction::Started);
            spawn_local(async move {
                match engine
                    .0
                    .client()
                    .post::<Session, _>(REGISTER_PATH, &payload)
                    .await
                {
                    Ok(session) => apply_session(&engine, &state, session),
                    Err(e) => state.dispatch(AuthAction::Failed(e.to_string())),
                }
            });
        })
    };

    let logout = {
        let state = state.clone();
        let engine = engine.clone();
        Callback::from(move |()| {
            engine.0.client().tokens().clear();
            clear_persisted_session();
            state.dispatch(AuthAction::LoggedOut);
        })
    };

    let context = AuthContext {
        state: (*state).clone(),
        login,
        register,
        logout,
    };

    html! {
        <ContextProvider<AuthContext> {context}>
            { props.children.clone() }
        </ContextProvider<AuthContext>>
    }
}

fn apply_session(
    engine: &EngineHandle,
    state: &UseReducerHandle<AuthState>,
    session: Session,
) {
    engine.0.client().tokens().set_token(session.token.clone());
    persist_session(&session);
    state.dispatch(AuthAction::LoggedIn(Rc::new(session)));
}

/// Load the persisted session from localStorage
fn load_persisted_session() -> Option<Session> {
    gloo_storage::LocalStorage::get(SESSION_STORAGE_KEY).ok()
}

/// Persist the session to localStorage
fn persist_session(session: &Session) {
    if let Err(e) = gloo_storage::LocalStorage::set(SESSION_STORAGE_KEY, session) {
        gloo::console::warn!(&format!("Failed to persist session: {e:?}"));
    }
}

/// Remove the persisted session from localStorage
fn clear_persisted_session() {
    gloo_storage::LocalStorage::delete(SESSION_STORAGE_KEY);
}
