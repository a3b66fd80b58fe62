use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Query, RequestParts},
    headers::Cookie,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Json, Router, TypedHeader,
};
use cookbook_model::{serde_json, AuthErrorKind, SessionResponse};
use rand::RngCore;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::app_config::AuthConfig;
use crate::session_token::{
    clear_session_cookie, clear_state_cookie, session_cookie, state_cookie, SessionTokenCodec,
    SESSION_COOKIE, STATE_COOKIE,
};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unknown identity provider: {0}")]
    UnknownProvider(String),
    #[error("Identity provider reported: {0}")]
    ProviderRejected(String),
    #[error("Callback is missing code or state")]
    MissingCallbackParams,
    #[error("Callback state does not match the initiating browser")]
    StateMismatch,
    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),
    #[error("Identity provider unreachable: {0}")]
    ProviderUnreachable(#[from] reqwest::Error),
    #[error("Failed to mint session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Malformed authorization URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid cookie value: {0}")]
    Cookie(#[from] axum::http::header::InvalidHeaderValue),
}

impl AuthError {
    /// Everything except an unreachable provider reads as a rejected
    /// hand-off to the login page.
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::ProviderUnreachable(_) => AuthErrorKind::ProviderUnreachable,
            _ => AuthErrorKind::AuthFailed,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::UnknownProvider(_)
            | AuthError::ProviderRejected(_)
            | AuthError::MissingCallbackParams
            | AuthError::StateMismatch => StatusCode::BAD_REQUEST,
            AuthError::ProviderUnreachable(_) => StatusCode::BAD_GATEWAY,
            AuthError::ExchangeFailed(_)
            | AuthError::Token(_)
            | AuthError::Url(_)
            | AuthError::Cookie(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

type Result<T> = std::result::Result<T, AuthError>;

/// The sole configured identity provider.
pub const GOOGLE_PROVIDER: &str = "google";

const GOOGLE_AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

pub trait AuthService {
    type ServiceType;
    fn bind_auth_routes(self, auth_access: Arc<AuthAccess>) -> Self::ServiceType;
}

impl AuthService for Router {
    type ServiceType = Self;
    fn bind_auth_routes(self, auth_access: Arc<AuthAccess>) -> Self {
        self.route("/api/v1/auth/login", get(login))
            .route("/api/v1/auth/callback", get(callback))
            .route("/api/v1/auth/session", get(session))
            .route("/api/v1/auth/logout", post(logout))
            .layer(Extension(auth_access))
    }
}

/// Performs the interactive hand-off with the identity provider and owns
/// the session token codec. Holds no mutable state.
pub struct AuthAccess {
    config: AuthConfig,
    codec: SessionTokenCodec,
    http: reqwest::Client,
}

impl AuthAccess {
    pub fn new(config: AuthConfig) -> Self {
        let codec = SessionTokenCodec::new(&config.cookie_secret, config.session_ttl_minutes);
        AuthAccess {
            config,
            codec,
            http: reqwest::Client::new(),
        }
    }

    pub fn codec(&self) -> &SessionTokenCodec {
        &self.codec
    }

    fn authorize_url(&self, state: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            GOOGLE_AUTHORIZE_ENDPOINT,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email"),
                ("state", state),
            ],
        )?;
        Ok(url)
    }

    async fn complete_handshake(
        &self,
        params: CallbackParams,
        cookie_state: Option<String>,
    ) -> Result<String> {
        if let Some(err) = params.error {
            return Err(AuthError::ProviderRejected(err));
        }
        let code = params.code.ok_or(AuthError::MissingCallbackParams)?;
        let returned_state = params.state.ok_or(AuthError::MissingCallbackParams)?;
        let expected_state = cookie_state.ok_or(AuthError::StateMismatch)?;
        if expected_state != returned_state {
            return Err(AuthError::StateMismatch);
        }
        let email = self.exchange_code(&code).await?;
        let token = self.codec.mint(&email)?;
        Ok(token)
    }

    async fn exchange_code(&self, code: &str) -> Result<String> {
        let resp = self
            .http
            .post(GOOGLE_TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AuthError::ExchangeFailed(format!(
                "token endpoint returned {}",
                resp.status()
            )));
        }
        let token = resp.json::<TokenResponse>().await?;

        let resp = self
            .http
            .get(GOOGLE_USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AuthError::ExchangeFailed(format!(
                "userinfo endpoint returned {}",
                resp.status()
            )));
        }
        let info = resp.json::<UserInfoResponse>().await?;
        info.email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AuthError::ExchangeFailed("userinfo carried no email".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginParams {
    provider: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

fn random_state() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn set_cookie(headers: &mut HeaderMap, cookie: &str) -> Result<()> {
    headers.append(header::SET_COOKIE, HeaderValue::from_str(cookie)?);
    Ok(())
}

/// The raw session cookie value, if the request carried one. Absence is not
/// a rejection; pages read the session, they never require it.
pub(crate) struct SessionCookie(pub(crate) Option<String>);

#[async_trait]
impl<B> FromRequest<B> for SessionCookie
where
    B: Send,
{
    type Rejection = AuthError;

    async fn from_request(req: &mut RequestParts<B>) -> std::result::Result<Self, Self::Rejection> {
        let token = TypedHeader::<Cookie>::from_request(req)
            .await
            .ok()
            .and_then(|TypedHeader(cookie)| cookie.get(SESSION_COOKIE).map(str::to_string));
        Ok(SessionCookie(token))
    }
}

pub(crate) struct StateCookie(pub(crate) Option<String>);

#[async_trait]
impl<B> FromRequest<B> for StateCookie
where
    B: Send,
{
    type Rejection = AuthError;

    async fn from_request(req: &mut RequestParts<B>) -> std::result::Result<Self, Self::Rejection> {
        let state = TypedHeader::<Cookie>::from_request(req)
            .await
            .ok()
            .and_then(|TypedHeader(cookie)| cookie.get(STATE_COOKIE).map(str::to_string));
        Ok(StateCookie(state))
    }
}

pub(crate) async fn login(
    Query(params): Query<LoginParams>,
    Extension(auth_access): Extension<Arc<AuthAccess>>,
) -> Result<impl IntoResponse> {
    if params.provider != GOOGLE_PROVIDER {
        return Err(AuthError::UnknownProvider(params.provider));
    }
    let state = random_state();
    let url = auth_access.authorize_url(&state)?;
    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, &state_cookie(&state))?;
    info!("redirecting to identity provider");
    Ok((headers, Redirect::to(url.as_str())))
}

pub(crate) async fn callback(
    Query(params): Query<CallbackParams>,
    StateCookie(cookie_state): StateCookie,
    Extension(auth_access): Extension<Arc<AuthAccess>>,
) -> Response {
    let mut headers = HeaderMap::new();
    // The state cookie has served its one round trip either way.
    if set_cookie(&mut headers, &clear_state_cookie()).is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    match auth_access.complete_handshake(params, cookie_state).await {
        Ok(token) => {
            let cookie = session_cookie(&token, auth_access.codec.ttl());
            if set_cookie(&mut headers, &cookie).is_err() {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            info!("identity hand-off completed");
            (headers, Redirect::to("/login")).into_response()
        }
        Err(err) => {
            warn!("identity hand-off failed: {err}");
            let target = format!("/login?error={}", err.kind().as_query_value());
            (headers, Redirect::to(&target)).into_response()
        }
    }
}

pub(crate) async fn session(
    SessionCookie(token): SessionCookie,
    Extension(auth_access): Extension<Arc<AuthAccess>>,
) -> Json<SessionResponse> {
    let session = token.as_deref().and_then(|token| auth_access.codec.decode(token));
    Json(SessionResponse { session })
}

pub(crate) async fn logout() -> Result<impl IntoResponse> {
    let mut headers = HeaderMap::new();
    set_cookie(&mut headers, &clear_session_cookie())?;
    Ok((headers, Json(SessionResponse { session: None })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_access() -> Arc<AuthAccess> {
        Arc::new(AuthAccess::new(AuthConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_url: "http://127.0.0.1:8080/api/v1/auth/callback".to_string(),
            cookie_secret: "cookie-secret".to_string(),
            session_ttl_minutes: 60,
        }))
    }

    fn query_value<'a>(url: &'a Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn authorize_url_carries_the_handshake_parameters() {
        let url = auth_access()
            .authorize_url("state-123")
            .expect("authorize url must build");
        assert!(url.as_str().starts_with(GOOGLE_AUTHORIZE_ENDPOINT));
        assert_eq!(query_value(&url, "client_id").as_deref(), Some("test-client"));
        assert_eq!(
            query_value(&url, "redirect_uri").as_deref(),
            Some("http://127.0.0.1:8080/api/v1/auth/callback")
        );
        assert_eq!(query_value(&url, "response_type").as_deref(), Some("code"));
        assert_eq!(query_value(&url, "scope").as_deref(), Some("openid email"));
        assert_eq!(query_value(&url, "state").as_deref(), Some("state-123"));
    }

    #[test]
    fn random_state_is_long_and_not_repeated() {
        let first = random_state();
        let second = random_state();
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn login_rejects_unknown_provider() {
        let result = login(
            Query(LoginParams {
                provider: "github".to_string(),
            }),
            Extension(auth_access()),
        )
        .await;
        assert!(matches!(result, Err(AuthError::UnknownProvider(p)) if p == "github"));
    }

    #[tokio::test]
    async fn callback_rejects_state_mismatch_before_any_exchange() {
        let params = CallbackParams {
            code: Some("code".to_string()),
            state: Some("returned".to_string()),
            error: None,
        };
        let err = auth_access()
            .complete_handshake(params, Some("expected".to_string()))
            .await
            .expect_err("mismatched state must fail");
        assert!(matches!(err, AuthError::StateMismatch));
        assert_eq!(err.kind(), AuthErrorKind::AuthFailed);
    }

    #[tokio::test]
    async fn callback_without_state_cookie_is_a_mismatch() {
        let params = CallbackParams {
            code: Some("code".to_string()),
            state: Some("returned".to_string()),
            error: None,
        };
        let err = auth_access()
            .complete_handshake(params, None)
            .await
            .expect_err("missing cookie must fail");
        assert!(matches!(err, AuthError::StateMismatch));
    }

    #[tokio::test]
    async fn provider_error_param_reads_as_rejected_handshake() {
        let params = CallbackParams {
            code: None,
            state: None,
            error: Some("access_denied".to_string()),
        };
        let err = auth_access()
            .complete_handshake(params, Some("state".to_string()))
            .await
            .expect_err("provider error must fail");
        assert!(matches!(err, AuthError::ProviderRejected(reason) if reason == "access_denied"));
    }

    #[tokio::test]
    async fn session_without_cookie_is_absent() {
        let Json(resp) = session(SessionCookie(None), Extension(auth_access())).await;
        assert_eq!(resp.session, None);
    }

    #[tokio::test]
    async fn session_roundtrip_through_minted_token() {
        let access = auth_access();
        let token = access.codec.mint("cook@example.com").expect("mint");
        let Json(resp) = session(SessionCookie(Some(token)), Extension(access)).await;
        let session = resp.session.expect("minted token must resolve");
        assert_eq!(session.user.email, "cook@example.com");
    }

    #[tokio::test]
    async fn logout_expires_the_session_cookie() {
        let response = logout().await.expect("logout must succeed").into_response();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("logout must set a cookie")
            .to_str()
            .expect("cookie must be ascii");
        assert!(cookie.starts_with("cookbook_session="));
        assert!(cookie.contains("Max-Age=0"));
    }
}
