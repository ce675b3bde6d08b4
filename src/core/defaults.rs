use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::paths;
use crate::strings::MaskSpec;
use crate::validator::PasswordPolicy;

/// Root configuration structure for helperkit.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HelperkitConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Helper defaults that can be overridden via helperkit.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Defaults {
    #[serde(default)]
    pub password: PasswordPolicy,

    #[serde(default)]
    pub mask: MaskSpec,

    #[serde(default = "default_slug_separator")]
    pub slug_separator: String,

    #[serde(default = "default_random_string_length")]
    pub random_string_length: usize,

    #[serde(default = "default_otp_length")]
    pub otp_length: usize,

    #[serde(default)]
    pub truncate: TruncateConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            password: PasswordPolicy::default(),
            mask: MaskSpec::default(),
            slug_separator: default_slug_separator(),
            random_string_length: default_random_string_length(),
            otp_length: default_otp_length(),
            truncate: TruncateConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TruncateConfig {
    #[serde(default = "default_truncate_length")]
    pub length: usize,

    #[serde(default = "default_truncate_suffix")]
    pub suffix: String,
}

impl Default for TruncateConfig {
    fn default() -> Self {
        Self {
            length: default_truncate_length(),
            suffix: default_truncate_suffix(),
        }
    }
}

/// Request defaults for `api` calls. `headers` are applied before any
/// per-request header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub headers: Vec<HeaderConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderConfig {
    pub name: String,
    pub value: String,
}

fn default_slug_separator() -> String {
    "-".to_string()
}

fn default_random_string_length() -> usize {
    16
}

fn default_otp_length() -> usize {
    6
}

fn default_truncate_length() -> usize {
    100
}

fn default_truncate_suffix() -> String {
    "...".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Load defaults, merging file config with built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full helperkit.json config, falling back to defaults on any error.
pub fn load_config() -> HelperkitConfig {
    paths::helperkit_json()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Load helperkit.json, surfacing read and parse errors instead of falling back.
pub fn load_config_strict() -> Result<HelperkitConfig> {
    load_config_from(&paths::helperkit_json()?)
}

/// Read a config file. A missing file yields built-in defaults; unreadable or
/// malformed files are errors.
pub fn load_config_from(path: &Path) -> Result<HelperkitConfig> {
    if !path.exists() {
        return Ok(HelperkitConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", path.display()))))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}

/// Save config to helperkit.json (creates it and its directory if missing).
pub fn save_config(config: &HelperkitConfig) -> Result<()> {
    save_config_to(config, &paths::helperkit_json()?)
}

pub fn save_config_to(config: &HelperkitConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize helperkit.json".to_string())))?;

    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("write {}", path.display()))))?;

    log_status!("config", "Saved {}", path.display());
    Ok(())
}

/// Check if helperkit.json exists
pub fn config_exists() -> bool {
    paths::helperkit_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete helperkit.json (reset to defaults). Returns whether a file was removed.
pub fn reset_config() -> Result<bool> {
    reset_config_at(&paths::helperkit_json()?)
}

pub fn reset_config_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("delete {}", path.display()))))?;
    log_status!("config", "Removed {}", path.display());
    Ok(true)
}

/// Get the path to helperkit.json (for display purposes)
pub fn config_path() -> Result<String> {
    Ok(paths::helperkit_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("helperkit.json")).unwrap();
        assert_eq!(config, HelperkitConfig::default());
        assert_eq!(config.defaults.otp_length, 6);
        assert_eq!(config.defaults.http.timeout_secs, 30);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helperkit.json");
        fs::write(&path, r#"{"defaults":{"slug_separator":"_","password":{"min_length":12}}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.slug_separator, "_");
        assert_eq!(config.defaults.password.min_length, 12);
        assert!(config.defaults.password.require_uppercase);
        assert_eq!(config.defaults.truncate.suffix, "...");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helperkit.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
    }

    #[test]
    fn save_then_load_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("helperkit.json");

        let mut config = HelperkitConfig::default();
        config.defaults.otp_length = 8;
        config.defaults.http.headers.push(HeaderConfig {
            name: "X-Api-Key".to_string(),
            value: "secret".to_string(),
        });
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
        assert!(reset_config_at(&path).unwrap());
        assert!(!reset_config_at(&path).unwrap());
    }
}
