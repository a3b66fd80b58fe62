use cookbook_model::AuthErrorKind;
use leptos::*;
use leptos_router::use_query_map;

use crate::session::{use_session, SessionState};

fn error_message(kind: AuthErrorKind) -> &'static str {
    match kind {
        AuthErrorKind::AuthFailed => "Sign-in didn't complete. You can try again.",
        AuthErrorKind::ProviderUnreachable => {
            "We couldn't reach the identity provider. Try again in a moment."
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let state = session.state();
    let query = use_query_map();

    let auth_error = move || {
        query.with(|params| {
            params
                .get("error")
                .and_then(|value| AuthErrorKind::from_query_value(value))
        })
    };
    let error_view = move || {
        auth_error().map(|kind| view! { <p class="auth-error">{error_message(kind)}</p> })
    };

    view! {
        <div class="login">
            <h1>"Login"</h1>
            <p>"Google Login:"</p>
            {move || match state.get() {
                // Still waiting on the provider; render neither control.
                SessionState::Unknown => view! { <div class="session-pending"></div> }.into_view(),
                SessionState::SignedOut => view! {
                    <div>
                        {error_view}
                        <button on:click=move |_| session.sign_in("google")>
                            "Sign in with Google"
                        </button>
                    </div>
                }
                .into_view(),
                SessionState::SignedIn(signed_in) => view! {
                    <div>
                        <p>{format!("Signed in as {}", signed_in.user.email)}</p>
                        <button on:click=move |_| session.sign_out()>"Sign out"</button>
                    </div>
                }
                .into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_error_kinds_render_a_retry_message() {
        for kind in [AuthErrorKind::AuthFailed, AuthErrorKind::ProviderUnreachable] {
            let message = error_message(kind);
            assert!(message.to_lowercase().contains("try again"));
        }
    }
}
