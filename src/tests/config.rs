use std::collections::HashMap;
use std::fs;

use tempfile::NamedTempFile;

use crate::config::models::{DEFAULT_HOST, DEFAULT_TIMEOUT_SECS};
use crate::config::{configure, ProviderConfig, ProviderSettings};
use crate::diagnostics::{has_errors, Severity};
use crate::error::Error;

fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_defaults_without_env() {
    let config = ProviderSettings::default().resolve_with(env_of(&[]));
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.key, "");
    assert_eq!(config.secret, "");
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_env_fills_missing_settings() {
    let settings = ProviderSettings {
        key: Some("file_key".to_string()),
        ..ProviderSettings::default()
    };
    let config = settings.resolve_with(env_of(&[
        ("GODADDY_HOST", "https://api.godaddy.com"),
        ("GODADDY_KEY", "env_key"),
        ("GODADDY_SECRET", "env_secret"),
        ("GODADDY_TIMEOUT", "10"),
    ]));

    assert_eq!(config.host, "https://api.godaddy.com");
    assert_eq!(config.key, "file_key");
    assert_eq!(config.secret, "env_secret");
    assert_eq!(config.timeout_secs, 10);
}

#[test]
fn test_bad_timeout_env_falls_back() {
    let config =
        ProviderSettings::default().resolve_with(env_of(&[("GODADDY_TIMEOUT", "soon")]));
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_load_config_file() {
    let config_content = r#"
        host: "https://api.godaddy.com"
        key: "test_key"
        secret: "test_secret"
        timeout_secs: 5
    "#;
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, config_content).unwrap();

    let config = ProviderConfig::load(temp_file.path()).unwrap();
    assert_eq!(config.host, "https://api.godaddy.com");
    assert_eq!(config.key, "test_key");
    assert_eq!(config.secret, "test_secret");
    assert_eq!(config.timeout_secs, 5);
    assert!(config.diagnostics().is_empty());
}

#[test]
fn test_invalid_config_file() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "key: [not, a, string]").unwrap();
    assert!(ProviderConfig::load(temp_file.path()).is_err());

    assert!(ProviderConfig::load("/nonexistent/godaddy.yaml").is_err());
}

#[test]
fn test_missing_credentials_reported_once() {
    let config = ProviderSettings {
        key: Some(String::new()),
        secret: Some(String::new()),
        ..ProviderSettings::default()
    }
    .resolve_with(env_of(&[]));

    let diagnostics = config.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[1].severity, Severity::Warning);
    assert_eq!(diagnostics[0].summary, "Unable to create GoDaddy Domains client");
    assert_eq!(
        diagnostics[0].detail,
        "Missing credentials for the GoDaddy Domains client"
    );
}

#[test]
fn test_invalid_host_reported() {
    let config = ProviderSettings {
        host: Some("not a url".to_string()),
        key: Some("k".to_string()),
        secret: Some("s".to_string()),
        timeout_secs: Some(5),
    }
    .resolve_with(env_of(&[]));

    let diagnostics = config.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].detail.starts_with("host:"));
}

#[test]
fn test_configure_without_secret_still_returns_client() {
    let config = ProviderSettings {
        key: Some("test_key".to_string()),
        ..ProviderSettings::default()
    }
    .resolve_with(env_of(&[]));

    let configured = configure(&config).unwrap();
    assert!(has_errors(&configured.diagnostics));
    assert_eq!(configured.client.base_url(), DEFAULT_HOST);

    let err = configured.into_client().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("Missing credentials"));
}

#[test]
fn test_debug_redacts_credentials() {
    let config = ProviderSettings {
        key: Some("super_key".to_string()),
        secret: Some("super_secret".to_string()),
        ..ProviderSettings::default()
    }
    .resolve_with(env_of(&[]));

    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super_key"));
    assert!(!rendered.contains("super_secret"));

    let configured = configure(&config).unwrap();
    assert!(!has_errors(&configured.diagnostics));

    let rendered = format!("{:?}", configured.client);
    assert!(!rendered.contains("super_secret"));
}

#[test]
fn test_sandbox_host_warns_on_valid_config() {
    let config = ProviderSettings {
        key: Some("k".to_string()),
        secret: Some("s".to_string()),
        ..ProviderSettings::default()
    }
    .resolve_with(env_of(&[]));
    assert_eq!(config.host, DEFAULT_HOST);

    let diagnostics = config.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].summary, "Using the GoDaddy OTE sandbox");

    let configured = configure(&config).unwrap();
    assert!(configured.into_client().is_ok());
}
