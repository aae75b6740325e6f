use std::path::Path;

use serde::Deserialize;

use crate::errors::{JsonSealError, Result};

/// Project-level configuration, loaded from `.jsonseal.toml`.
///
/// Every field has a sensible default so JsonSeal works without any
/// config file at all. Key material is never read from here.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Pretty-print JSON output (default: true).
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Default log filter when `RUST_LOG` is unset (default: "warn").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".jsonseal.toml";

    /// Load settings from `<project_dir>/.jsonseal.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            JsonSealError::SettingsError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert!(s.pretty);
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert!(settings.pretty);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
pretty = false
log_level = "debug"
"#;
        fs::write(tmp.path().join(".jsonseal.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.pretty);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".jsonseal.toml"), "pretty = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.pretty);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn load_ignores_unknown_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".jsonseal.toml"), "future_option = 1\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(settings.pretty);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".jsonseal.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(JsonSealError::SettingsError(_))));
    }
}
