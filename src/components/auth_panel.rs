use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::contexts::auth::{AuthState, Credentials, use_auth};

/// Login form when anonymous, session chip with logout when authenticated.
#[function_component(AuthPanel)]
pub fn auth_panel() -> Html {
    let auth = use_auth();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();

    let on_submit = {
        let login = auth.login.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(email), Some(password)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            login.emit(Credentials {
                email: email.value(),
                password: password.value(),
            });
        })
    };

    let on_logout = {
        let logout = auth.logout.clone();
        Callback::from(move |_: MouseEvent| logout.emit(()))
    };

    match &auth.state {
        AuthState::Authenticated(session) => html! {
            <div class="auth-panel">
                <span class="session-chip">{&session.user.name}{" ("}{&session.user.email}{")"}</span>
                <button class="logout-button" onclick={on_logout}>{"로그아웃"}</button>
            </div>
        },
        AuthState::Authenticating => html! {
            <div class="auth-panel">
                <span>{"로그인 중..."}</span>
            </div>
        },
        state => html! {
            <div class="auth-panel">
                if let AuthState::Error(message) = state {
                    <p class="auth-error">{"로그인 실패: "}{message}</p>
                }
                <form class="login-form" onsubmit={on_submit}>
                    <input
                        ref={email_ref}
                        type="email"
                        placeholder="이메일"
                        aria-label="이메일"
                        required=true
                    />
                    <input
                        ref={password_ref}
                        type="password"
                        placeholder="비밀번호"
                        aria-label="비밀번호"
                        required=true
                    />
                    <button type="submit">{"로그인"}</button>
                </form>
            </div>
        },
    }
}
