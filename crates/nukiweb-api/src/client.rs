// Nuki Web API HTTP client
//
// Wraps `reqwest::Client` with bearer-token auth, base URL joining, and
// status code translation. Endpoint methods live in `smartlock.rs` as
// inherent methods so this module stays focused on transport mechanics.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production endpoint of the Nuki Web API.
pub const DEFAULT_BASE_URL: &str = "https://api.nuki.io";

/// Longest response body excerpt carried inside an error message.
const BODY_PREVIEW_CHARS: usize = 200;

/// Async client for the Nuki Web API.
///
/// Stateless apart from the connection pool: every request carries the
/// same `Authorization: Bearer` header and is sent relative to one fixed
/// base URL. No retries; the timeout is whatever the transport was built
/// with.
#[derive(Debug, Clone)]
pub struct NukiWebClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NukiWebClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    ///
    /// Injects `Authorization: Bearer <token>` (marked sensitive so it
    /// never shows up in debug output) and `Accept: application/json`
    /// as default headers.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The API base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Force a trailing slash so relative joins keep any path prefix.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"smartlock/42/action"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// Send a GET request and decode a JSON body from a 2xx response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    /// Send a POST request with a JSON body; only `204 No Content` counts
    /// as success.
    pub(crate) async fn post_no_content<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::status_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        Err(Self::status_error(status, resp).await)
    }

    /// Translate a non-success (or unexpected) status into an [`Error`].
    async fn status_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication {
                message: format!("token rejected (HTTP {})", status.as_u16()),
            },
            _ => Error::Server {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_owned()
                } else {
                    preview(&body)
                },
            },
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = NukiWebClient::from_reqwest(DEFAULT_BASE_URL, reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.nuki.io/");
        assert_eq!(
            client.url("smartlock").unwrap().as_str(),
            "https://api.nuki.io/smartlock"
        );
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let client =
            NukiWebClient::from_reqwest("http://127.0.0.1:8080/proxy/", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            client.url("smartlock/7/action").unwrap().as_str(),
            "http://127.0.0.1:8080/proxy/smartlock/7/action"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = NukiWebClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn rejects_token_with_control_characters() {
        let token = SecretString::from("abc\ndef".to_owned());
        let result =
            NukiWebClient::from_token(DEFAULT_BASE_URL, &token, &TransportConfig::default());
        assert!(matches!(result, Err(Error::InvalidToken(_))));
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        let body = "ä".repeat(500);
        assert_eq!(preview(&body).chars().count(), BODY_PREVIEW_CHARS);
    }
}
