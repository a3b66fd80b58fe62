use cookbook_model::{Session, UserIdentity};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "cookbook_session";
pub const STATE_COOKIE: &str = "cookbook_oauth_state";

// Lifetime of the state cookie covering one redirect round trip.
const STATE_TTL_SECONDS: i64 = 300;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Mints and decodes the signed token held in the session cookie. Sessions
/// are stateless: the cookie is the only record that a sign-in happened.
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokenCodec {
    pub fn new(secret: &str, session_ttl_minutes: i64) -> Self {
        SessionTokenCodec {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::minutes(session_ttl_minutes),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn mint(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.mint_with_expiry(email, OffsetDateTime::now_utc() + self.ttl)
    }

    fn mint_with_expiry(
        &self,
        email: &str,
        expires_at: OffsetDateTime,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: email.to_string(),
            exp: expires_at.unix_timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// An invalid, expired, or tampered token is indistinguishable from no
    /// session at all, so decoding never surfaces an error.
    pub fn decode(&self, token: &str) -> Option<Session> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| tracing::debug!("rejected session token: {err}"))
            .ok()?;
        if data.claims.sub.is_empty() {
            return None;
        }
        Some(Session {
            user: UserIdentity {
                email: data.claims.sub,
            },
        })
    }
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.whole_seconds()
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub fn state_cookie(state: &str) -> String {
    format!("{STATE_COOKIE}={state}; Path=/; HttpOnly; SameSite=Lax; Max-Age={STATE_TTL_SECONDS}")
}

pub fn clear_state_cookie() -> String {
    format!("{STATE_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new("test-secret", 60)
    }

    #[test]
    fn mint_then_decode_preserves_email() {
        let codec = codec();
        let token = codec.mint("cook@example.com").expect("mint must succeed");
        let session = codec.decode(&token).expect("fresh token must decode");
        assert_eq!(session.user.email, "cook@example.com");
        assert!(!session.user.email.is_empty());
    }

    #[test]
    fn expired_token_reads_as_absent() {
        let codec = codec();
        // Past the default validation leeway.
        let expired = OffsetDateTime::now_utc() - Duration::seconds(600);
        let token = codec
            .mint_with_expiry("cook@example.com", expired)
            .expect("mint must succeed");
        assert_eq!(codec.decode(&token), None);
    }

    #[test]
    fn garbage_token_reads_as_absent() {
        assert_eq!(codec().decode("not-a-token"), None);
    }

    #[test]
    fn token_signed_with_other_secret_reads_as_absent() {
        let other = SessionTokenCodec::new("other-secret", 60);
        let token = other.mint("cook@example.com").expect("mint must succeed");
        assert_eq!(codec().decode(&token), None);
    }

    #[test]
    fn session_cookie_is_http_only_and_scoped_to_root() {
        let cookie = session_cookie("tok", Duration::minutes(60));
        assert!(cookie.starts_with("cookbook_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn clearing_cookies_sets_zero_max_age() {
        assert!(clear_session_cookie().contains("Max-Age=0"));
        assert!(clear_state_cookie().contains("Max-Age=0"));
    }
}
