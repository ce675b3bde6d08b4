use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use helperkit::arrays;
use helperkit::defaults::{self, Defaults, HelperkitConfig};

use super::{parse_value, CmdResult};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore helperkit.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set a configuration value at a dot path
    Set {
        /// Dot path (e.g., defaults.password.min_length)
        key: String,
        /// Value to set (JSON literal, or plain text)
        value: String,
    },
    /// Remove a configuration value at a dot path (restores its default)
    Remove {
        /// Dot path (e.g., defaults.http.headers)
        key: String,
    },
    /// Reset configuration to built-in defaults (deletes helperkit.json)
    Reset,
    /// Show the path to helperkit.json
    Path,
}

#[derive(Debug, Serialize, Default)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<HelperkitConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

pub fn run(args: ConfigArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set { key, value } => set(&key, &value),
        ConfigCommand::Remove { key } => remove(&key),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let output = if builtin {
        ConfigOutput {
            command: "config.show".to_string(),
            defaults: Some(defaults::builtin_defaults()),
            ..Default::default()
        }
    } else {
        ConfigOutput {
            command: "config.show".to_string(),
            config: Some(defaults::load_config()),
            ..Default::default()
        }
    };

    Ok((output, 0))
}

fn set(key: &str, raw_value: &str) -> CmdResult<ConfigOutput> {
    let value = parse_value(raw_value);

    let config = edit_config(key, Some(raw_value), |config_json| {
        arrays::dot_set(config_json, key, value.clone())
    })?;

    Ok((
        ConfigOutput {
            command: "config.set".to_string(),
            config: Some(config),
            key: Some(key.to_string()),
            value: Some(value),
            ..Default::default()
        },
        0,
    ))
}

fn remove(key: &str) -> CmdResult<ConfigOutput> {
    let mut removed = None;
    let config = edit_config(key, None, |config_json| {
        removed = arrays::dot_remove(config_json, key);
        Ok(())
    })?;

    Ok((
        ConfigOutput {
            command: "config.remove".to_string(),
            config: Some(config),
            key: Some(key.to_string()),
            deleted: Some(removed.is_some()),
            ..Default::default()
        },
        0,
    ))
}

/// Apply `edit` to the JSON form of the stored config, check the result still
/// deserializes, then save it.
fn edit_config(
    key: &str,
    raw_value: Option<&str>,
    edit: impl FnOnce(&mut Value) -> helperkit::Result<()>,
) -> helperkit::Result<HelperkitConfig> {
    let config = defaults::load_config_strict()?;

    let mut config_json = serde_json::to_value(&config).map_err(|e| {
        helperkit::Error::internal_json(e.to_string(), Some("serialize config".to_string()))
    })?;

    edit(&mut config_json)?;

    let config: HelperkitConfig = serde_json::from_value(config_json).map_err(|e| {
        helperkit::Error::config_invalid_value(key, raw_value.map(str::to_string), e.to_string())
    })?;

    defaults::save_config(&config)?;
    Ok(config)
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    Ok((
        ConfigOutput {
            command: "config.reset".to_string(),
            defaults: Some(defaults::builtin_defaults()),
            path: Some(defaults::config_path()?),
            deleted: Some(deleted),
            ..Default::default()
        },
        0,
    ))
}

fn path() -> CmdResult<ConfigOutput> {
    Ok((
        ConfigOutput {
            command: "config.path".to_string(),
            path: Some(defaults::config_path()?),
            exists: Some(defaults::config_exists()),
            ..Default::default()
        },
        0,
    ))
}
