use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base helperkit config directory (~/.config/helperkit/, %APPDATA%\helperkit on Windows)
pub fn helperkit() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("helperkit"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("helperkit"))
    }
}

/// Global helperkit.json config file path
pub fn helperkit_json() -> Result<PathBuf> {
    Ok(helperkit()?.join("helperkit.json"))
}
