use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

pub const DEFAULT_HOST: &str = "https://api.ote-godaddy.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const HOST_ENV: &str = "GODADDY_HOST";
pub const KEY_ENV: &str = "GODADDY_KEY";
pub const SECRET_ENV: &str = "GODADDY_SECRET";
pub const TIMEOUT_ENV: &str = "GODADDY_TIMEOUT";

/// Fully resolved provider settings.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ProviderConfig {
    #[validate(url(message = "Host must be a valid URL"))]
    pub host: String,

    #[validate(length(min = 1, message = "API key cannot be empty"))]
    pub key: String,

    #[validate(length(min = 1, message = "API secret cannot be empty"))]
    pub secret: String,

    #[validate(range(min = 1, message = "Timeout must be greater than 0"))]
    pub timeout_secs: u64,
}

/// Provider settings as written in a config file or manifest. Anything left
/// out falls back to the environment, then to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub host: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProviderSettings {
    pub fn resolve(self) -> ProviderConfig {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(self, env: F) -> ProviderConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = self.timeout_secs.or_else(|| {
            env(TIMEOUT_ENV).and_then(|raw| match raw.trim().parse() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    log::warn!("Ignoring unparsable {TIMEOUT_ENV}={raw:?}");
                    None
                }
            })
        });

        ProviderConfig {
            host: self
                .host
                .or_else(|| env(HOST_ENV))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            key: self.key.or_else(|| env(KEY_ENV)).unwrap_or_default(),
            secret: self.secret.or_else(|| env(SECRET_ENV)).unwrap_or_default(),
            timeout_secs: timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("key", &"<REDACTED>")
            .field("secret", &"<REDACTED>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
