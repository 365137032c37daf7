//! Configuration handling for the forms app

use crate::state::{FormKind, ValidationMode};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default simulated submit latency
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;

/// Environment variable overriding the submit delay
const SUBMIT_DELAY_ENV: &str = "SIGNUP_FORMS_SUBMIT_DELAY_MS";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormsConfig {
    /// Simulated submit latency in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// When edits re-validate fields
    #[serde(default)]
    pub validation_mode: ValidationMode,
    /// Form shown on startup
    #[serde(default)]
    pub initial_form: FormKind,
    /// Addresses the simulated backend reports as already registered
    #[serde(default)]
    pub taken_emails: Vec<String>,
}

impl FormsConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "signup-forms", "signup-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config file, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(raw) = std::env::var(SUBMIT_DELAY_ENV) {
            match raw.parse::<u64>() {
                Ok(ms) => config.submit_delay_ms = Some(ms),
                Err(_) => tracing::warn!("Ignoring {SUBMIT_DELAY_ENV}={raw:?}, not a number"),
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FormsConfig::default();
        assert!(config.submit_delay_ms.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(1000));
        assert_eq!(config.validation_mode, ValidationMode::OnSubmit);
        assert_eq!(config.initial_form, FormKind::Login);
        assert!(config.taken_emails.is_empty());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, FormsConfig::default());
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "submit_delay_ms": 10,
            "validation_mode": "after_first_submit",
            "initial_form": "signup",
            "taken_emails": ["taken@example.com"]
        }"#;
        let parsed: FormsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay(), Duration::from_millis(10));
        assert_eq!(parsed.validation_mode, ValidationMode::AfterFirstSubmit);
        assert_eq!(parsed.initial_form, FormKind::Signup);
        assert_eq!(parsed.taken_emails, vec!["taken@example.com".to_string()]);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"submit_delay_ms": 5, "unknown_field": "value"}"#;
        let parsed: FormsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay_ms, Some(5));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let json = r#"{"validation_mode": "sometimes"}"#;
        assert!(serde_json::from_str::<FormsConfig>(json).is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let err = FormsConfig::load_from(Path::new("/nonexistent/signup-forms.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = FormsConfig {
            submit_delay_ms: Some(42),
            validation_mode: ValidationMode::OnChange,
            initial_form: FormKind::Register,
            taken_emails: vec!["a@b.com".to_string()],
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
