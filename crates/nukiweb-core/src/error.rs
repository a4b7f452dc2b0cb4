// ── Core error types ──
//
// User-facing errors from nukiweb-core. Callers never see raw HTTP
// status handling; the `From<nukiweb_api::Error>` impl folds transport
// errors into domain variants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to Nuki Web at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Coordinator errors ───────────────────────────────────────────
    /// A refresh failed; the previous snapshot is still in place.
    #[error("{message}")]
    UpdateFailed { message: String },

    /// The first refresh failed for a reason other than credentials.
    #[error("Setup failed, will retry: {message}")]
    SetupFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<nukiweb_api::Error> for CoreError {
    fn from(err: nukiweb_api::Error) -> Self {
        let status = err.status();
        match err {
            nukiweb_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            nukiweb_api::Error::InvalidToken(reason) => CoreError::AuthenticationFailed {
                message: format!("token is not a valid header value: {reason}"),
            },
            nukiweb_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status,
                    }
                }
            }
            nukiweb_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            nukiweb_api::Error::Server { message, .. } => CoreError::Api {
                message: format!("HTTP {}: {message}", status.unwrap_or_default()),
                status,
            },
            nukiweb_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
