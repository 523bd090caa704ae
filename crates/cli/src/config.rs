//! Configuration for the `mvars` CLI.
//!
//! All values come from `MVARS_*` environment variables and are optional;
//! command-line flags override them per invocation.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Custom cipher passphrase. When unset (and no `--key` flag is given)
    /// the codec falls back to the passphrase bundled with the app.
    #[serde(default)]
    pub key: Option<String>,

    /// File name the encrypted save is expected to carry on device. Used
    /// only to warn about likely mix-ups, never to reject input.
    #[serde(default = "default_expected_filename")]
    pub expected_filename: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_expected_filename() -> String {
    "MonetizationVars".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from `MVARS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be deserialised or validation
    /// fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("MVARS"))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if let Some(key) = &self.key {
            if key.trim().is_empty() {
                anyhow::bail!("MVARS_KEY must not be blank when set");
            }
        }
        if self.expected_filename.trim().is_empty() {
            anyhow::bail!("MVARS_EXPECTED_FILENAME must not be blank");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: None,
            expected_filename: default_expected_filename(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_expected_filename(), "MonetizationVars");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_blank_key() {
        let cfg = Config {
            key: Some("   ".into()),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_unset_key() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_filename() {
        let cfg = Config {
            expected_filename: "".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
