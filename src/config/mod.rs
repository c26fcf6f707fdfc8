pub mod models;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use validator::Validate;

use crate::api::GoDaddyClient;
use crate::diagnostics::{has_errors, Diagnostic};
use crate::error;

pub use models::{ProviderConfig, ProviderSettings};

/// A client together with whatever went wrong while building it.
#[derive(Debug)]
pub struct Configured {
    pub client: GoDaddyClient,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        ProviderSettings::default().resolve()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: ProviderSettings = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings.resolve())
    }

    /// Field problems as diagnostics. Missing credentials collapse into one entry.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut missing_credentials = false;

        if let Err(errors) = self.validate() {
            for (field, field_errors) in errors.field_errors() {
                if field == "key" || field == "secret" {
                    missing_credentials = true;
                    continue;
                }
                for err in field_errors {
                    let detail = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    diagnostics.push(Diagnostic::error(
                        "Invalid GoDaddy Domains provider configuration",
                        format!("{field}: {detail}"),
                    ));
                }
            }
        }

        if missing_credentials {
            diagnostics.insert(
                0,
                Diagnostic::error(
                    "Unable to create GoDaddy Domains client",
                    "Missing credentials for the GoDaddy Domains client",
                ),
            );
        }

        if self.host.trim_end_matches('/') == models::DEFAULT_HOST {
            diagnostics.push(Diagnostic::warning(
                "Using the GoDaddy OTE sandbox",
                format!("Set host or {} to manage live records", models::HOST_ENV),
            ));
        }

        diagnostics
    }
}

impl Configured {
    /// The client, or the first error diagnostic as [`error::Error::Config`].
    pub fn into_client(self) -> error::Result<GoDaddyClient> {
        if !has_errors(&self.diagnostics) {
            return Ok(self.client);
        }
        let first = self.diagnostics.iter().find(|d| d.is_error());
        Err(error::Error::config(
            first.map(ToString::to_string).unwrap_or_default(),
        ))
    }
}

/// Builds the API client. Bad settings are reported, not fatal: the client is
/// still returned so the caller decides whether to go on.
pub fn configure(config: &ProviderConfig) -> error::Result<Configured> {
    let diagnostics = config.diagnostics();
    for diagnostic in &diagnostics {
        if diagnostic.is_error() {
            log::error!("{diagnostic}");
        } else {
            log::warn!("{diagnostic}");
        }
    }

    let client = GoDaddyClient::new(
        &config.host,
        &config.key,
        &config.secret,
        Duration::from_secs(config.timeout_secs.max(1)),
    )?;
    log::debug!("Configured GoDaddy Domains client for {}", client.base_url());

    Ok(Configured {
        client,
        diagnostics,
    })
}
