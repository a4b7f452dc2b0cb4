// ── Runtime coordinator configuration ──
//
// Describes how to reach the Nuki Web API and how often to poll it.
// Never touches disk; the CLI builds one from a config profile.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Integration domain; scopes device registry identifiers.
pub const DOMAIN: &str = "nuki_web";

/// Manufacturer reported in device registry entries.
pub const MANUFACTURER: &str = "Nuki";

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// API base URL (defaults to `https://api.nuki.io`).
    pub base_url: Url,
    /// Bearer API token.
    pub token: SecretString,
    /// Registry domain for this integration.
    pub domain: String,
    /// Period of the background refresh. Zero disables it.
    pub scan_interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CoordinatorConfig {
    pub fn new(token: SecretString) -> Self {
        Self {
            base_url: default_base_url(),
            token,
            domain: DOMAIN.to_owned(),
            scan_interval: DEFAULT_SCAN_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_scan_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(nukiweb_api::DEFAULT_BASE_URL).expect("default base URL is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CoordinatorConfig::new(SecretString::from("t".to_owned()));
        assert_eq!(config.base_url.as_str(), "https://api.nuki.io/");
        assert_eq!(config.domain, "nuki_web");
        assert_eq!(config.scan_interval, Duration::from_secs(30));
    }
}
