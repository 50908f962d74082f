//! Shared configuration for the roster CLI and TUI.
//!
//! A TOML file plus `ROSTER_`-prefixed environment variables, merged with
//! figment and translated to `roster_core::DirectoryConfig`. Both binaries
//! depend on this crate; the CLI layers its flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roster_core::{
    CoreError, DEFAULT_CREATE_URL, DEFAULT_LIST_URL, DirectoryConfig, SortField, SortOrder,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Where the user directory lives.
    #[serde(default)]
    pub endpoint: Endpoint,

    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Endpoint {
    #[serde(default = "default_list_url")]
    pub list_url: String,

    #[serde(default = "default_create_url")]
    pub create_url: String,

    /// Request timeout in seconds. Absent or 0 means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            list_url: default_list_url(),
            create_url: default_create_url(),
            timeout: None,
        }
    }
}

fn default_list_url() -> String {
    DEFAULT_LIST_URL.into()
}
fn default_create_url() -> String {
    DEFAULT_CREATE_URL.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub sort_field: SortField,

    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "roster", "roster").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("roster");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is
/// not an error: defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ROSTER_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `DirectoryConfig` from loaded config, validating both URLs.
pub fn to_directory_config(cfg: &Config) -> Result<DirectoryConfig, ConfigError> {
    let directory = DirectoryConfig::parse(&cfg.endpoint.list_url, &cfg.endpoint.create_url)
        .map_err(|e| match e {
            CoreError::Config { message } => ConfigError::Validation {
                field: "endpoint".into(),
                reason: message,
            },
            other => ConfigError::Validation {
                field: "endpoint".into(),
                reason: other.to_string(),
            },
        })?;

    let timeout = cfg
        .endpoint
        .timeout
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(directory.with_timeout(timeout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.endpoint.list_url, DEFAULT_LIST_URL);
        assert_eq!(cfg.endpoint.create_url, DEFAULT_CREATE_URL);
        assert_eq!(cfg.defaults.sort_field, SortField::Name);
        assert_eq!(cfg.defaults.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[endpoint]
list_url = "http://localhost:3000/users"
timeout = 15

[defaults]
sort_field = "id"
sort_order = "desc"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.endpoint.list_url, "http://localhost:3000/users");
        assert_eq!(cfg.endpoint.create_url, DEFAULT_CREATE_URL);
        assert_eq!(cfg.endpoint.timeout, Some(15));
        assert_eq!(cfg.defaults.sort_field, SortField::Id);
        assert_eq!(cfg.defaults.sort_order, SortOrder::Descending);
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn bad_sort_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nsort_field = \"phone\"\n").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.endpoint.timeout = Some(5);
        cfg.defaults.sort_order = SortOrder::Descending;
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn directory_config_translation() {
        let mut cfg = Config::default();
        cfg.endpoint.timeout = Some(10);
        let dc = to_directory_config(&cfg).unwrap();
        assert_eq!(dc.list_url.as_str(), DEFAULT_LIST_URL);
        assert_eq!(dc.timeout, Some(Duration::from_secs(10)));

        cfg.endpoint.timeout = Some(0);
        assert_eq!(to_directory_config(&cfg).unwrap().timeout, None);
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let mut cfg = Config::default();
        cfg.endpoint.create_url = "not a url".into();
        assert!(matches!(
            to_directory_config(&cfg),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn config_path_ends_in_toml() {
        assert!(config_path().ends_with("config.toml"));
    }
}
