use cookbook_model::Session;
use leptos::*;

use crate::api;

/// Authentication state as the pages see it. `Unknown` covers the window
/// between mount and the first answer from the session endpoint, so the
/// login page never flashes the wrong control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unknown,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn from_response(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionState::SignedIn(session),
            None => SessionState::SignedOut,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}

/// Scoped session provider: created once at the app root, handed to pages
/// through the reactive context. Pages read the state; only the two actions
/// below mutate it.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn provide() -> Self {
        let ctx = SessionContext {
            state: create_rw_signal(SessionState::Unknown),
        };
        provide_context(ctx);
        ctx.refresh();
        ctx
    }

    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    pub fn refresh(&self) {
        let state = self.state;
        spawn_local(async move {
            match api::fetch_session().await {
                Ok(resp) => state.set(SessionState::from_response(resp.session)),
                Err(err) => {
                    log::warn!("failed to resolve session: {err}");
                    state.set(SessionState::SignedOut);
                }
            }
        });
    }

    /// Hands the browser to the identity provider. Completion arrives via a
    /// full redirect back into the app, never synchronously.
    pub fn sign_in(&self, provider: &str) {
        let target = api::sign_in_url(provider);
        if let Err(err) = window().location().set_href(&target) {
            log::warn!("failed to start identity handshake: {err:?}");
        }
    }

    pub fn sign_out(&self) {
        let state = self.state;
        spawn_local(async move {
            match api::sign_out().await {
                Ok(_) => state.set(SessionState::SignedOut),
                Err(err) => log::warn!("failed to sign out: {err}"),
            }
        });
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext must be provided at the app root")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook_model::UserIdentity;

    #[test]
    fn absent_session_reads_as_signed_out() {
        assert_eq!(SessionState::from_response(None), SessionState::SignedOut);
    }

    #[test]
    fn present_session_reads_as_signed_in_with_email() {
        let state = SessionState::from_response(Some(Session {
            user: UserIdentity {
                email: "cook@example.com".to_string(),
            },
        }));
        let session = state.session().expect("must be signed in");
        assert!(!session.user.email.is_empty());
    }

    #[test]
    fn unknown_state_exposes_no_session() {
        assert_eq!(SessionState::Unknown.session(), None);
    }
}
