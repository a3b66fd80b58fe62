use cookbook_model::SessionResponse;
use gloo_net::http;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to do some HTTP: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("Bad response: {0}")]
    Http(String),
}

trait HttpErr {
    fn http_ok_json<T: DeserializeOwned + Unpin + 'static>(
        self,
    ) -> Pin<Box<dyn Future<Output = Result<T, Error>>>>;
}

async fn response_http_err<T: DeserializeOwned + Unpin + 'static>(
    resp: http::Response,
) -> Result<T, Error> {
    if !resp.ok() {
        let status = resp.status_text();
        let code = resp.status();
        let text = resp.text().await?;
        Err(Error::Http(format!("{status} {code} – {text}")))
    } else {
        Ok(resp.json::<T>().await?)
    }
}

impl HttpErr for http::Response {
    fn http_ok_json<T: DeserializeOwned + 'static + Unpin>(
        self,
    ) -> Pin<Box<dyn Future<Output = Result<T, Error>>>> {
        Box::pin(response_http_err(self))
    }
}

pub async fn fetch_session() -> Result<SessionResponse, Error> {
    http::Request::get("/api/v1/auth/session")
        .send()
        .await?
        .http_ok_json::<SessionResponse>()
        .await
}

pub async fn sign_out() -> Result<SessionResponse, Error> {
    http::Request::post("/api/v1/auth/logout")
        .send()
        .await?
        .http_ok_json::<SessionResponse>()
        .await
}

/// The backend route that starts the redirect-based handshake with the
/// named identity provider.
pub fn sign_in_url(provider: &str) -> String {
    format!("/api/v1/auth/login?provider={provider}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_url_names_the_provider() {
        assert_eq!(sign_in_url("google"), "/api/v1/auth/login?provider=google");
    }
}
