//! File-name and size helpers. Only `file_size` touches the filesystem.

use std::path::Path;

use chrono::Utc;

use crate::arithmetic::round_to;
use crate::error::{Error, Result};

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

fn base_name(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// Text after the last `.` of the base name, or empty. `archive.tar.gz`
/// yields `gz`; `.env` yields `env`.
pub fn extension(filename: &str) -> &str {
    base_name(filename)
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

/// Base name up to the last `.`.
pub fn name_without_extension(filename: &str) -> &str {
    let base = base_name(filename);
    base.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(base)
}

/// Case-insensitive extension check against `allowed`.
pub fn is_allowed_type(filename: &str, allowed: &[&str]) -> bool {
    let ext = extension(filename);
    !ext.is_empty() && allowed.iter().any(|a| a.eq_ignore_ascii_case(ext))
}

pub fn is_allowed_size(bytes: u64, max_kb: u64) -> bool {
    bytes <= max_kb.saturating_mul(1024)
}

/// `1536` becomes `1.5 KB`. A unit is only stepped up once the value
/// exceeds 1024, so exactly 1024 bytes stays `1024 B`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", round_to(value, 2));
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

pub fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read metadata of {}", path.display()))))
}

/// Name to store an upload under: `custom` when given, otherwise
/// `{unix_timestamp}_{uuid}.{ext}` using the original extension.
pub fn upload_file_name(original: &str, custom: Option<&str>) -> String {
    if let Some(name) = custom.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    let unique = format!("{}_{}", Utc::now().timestamp(), uuid::Uuid::new_v4().simple());
    match extension(original) {
        "" => unique,
        ext => format!("{}.{}", unique, ext),
    }
}

/// Like [`upload_file_name`], but only for image extensions.
pub fn image_upload_file_name(original: &str, custom: Option<&str>) -> Result<String> {
    if !is_allowed_type(original, &IMAGE_EXTENSIONS) {
        return Err(Error::validation_invalid_argument(
            "file",
            format!("File must be an image ({})", IMAGE_EXTENSIONS.join(", ")),
            Some(original.to_string()),
            Some(IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()),
        ));
    }
    Ok(upload_file_name(original, custom))
}
