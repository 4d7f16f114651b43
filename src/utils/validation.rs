use anyhow::{Result, anyhow};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn invalid(code: &'static str, message: impl Into<String>) -> anyhow::Error {
    anyhow!(ValidationError {
        code,
        message: message.into(),
    })
}

/// Validates file size against maximum limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(invalid(
            "FILE_TOO_LARGE",
            format!(
                "File size {} bytes exceeds maximum allowed {} bytes ({} MB)",
                size,
                max_size,
                max_size / 1024 / 1024
            ),
        ));
    }
    Ok(())
}

/// Reduces an uploaded filename to a bare name safe to store in the upload directory.
///
/// Path components are dropped, whitespace becomes `_` and reserved characters are
/// replaced. Hidden names and names without a stem are rejected.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    // Browsers on Windows may send the full client path
    let last = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let name = Path::new(last)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(invalid("INVALID_FILENAME", "Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path components stripped from upload name: {}", filename);
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c.is_whitespace()
                || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';' | '#' | '%' | '&')
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Stored path column is 128 wide; leave room for the uniqueness suffix
    let sanitized = if sanitized.len() > 100 {
        let (stem, ext) = crate::services::thumbnail_service::split_extension(&sanitized);
        let mut end = 100usize.saturating_sub(ext.len());
        while !stem.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}{}", &stem[..end.min(stem.len())], ext)
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(invalid(
            "HIDDEN_FILE",
            "Hidden files (starting with '.') are not allowed",
        ));
    }

    Ok(sanitized)
}

/// Checks the filename extension against the configured allow-list.
pub fn validate_extension(filename: &str, allowed: &[String]) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| invalid("MISSING_EXTENSION", "File has no extension"))?;

    if !allowed.iter().any(|a| a == &ext) {
        return Err(invalid(
            "INVALID_EXTENSION",
            format!(
                "Extension '.{}' is not allowed. Allowed: {}",
                ext,
                allowed.join(", ")
            ),
        ));
    }
    Ok(ext)
}

/// Sniffs the content and requires an image.
pub fn verify_image_content(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(invalid("EMPTY_FILE", "File appears to be empty"));
    }

    let detected = infer::get(data)
        .ok_or_else(|| invalid("UNKNOWN_CONTENT", "File content is not a recognized image"))?;

    let mime: mime::Mime = detected
        .mime_type()
        .parse()
        .map_err(|_| invalid("UNKNOWN_CONTENT", "File content is not a recognized image"))?;

    if mime.type_() != mime::IMAGE {
        return Err(invalid(
            "INVALID_MIME_TYPE",
            format!("Expected an image, got '{}'", mime),
        ));
    }
    Ok(())
}

/// Full validation pipeline for an image upload field. Returns the sanitized filename.
pub fn validate_image_upload(
    filename: &str,
    data: &[u8],
    max_size: usize,
    allowed_extensions: &[String],
) -> Result<String> {
    validate_file_size(data.len(), max_size)?;
    let sanitized = sanitize_filename(filename)?;
    validate_extension(&sanitized, allowed_extensions)?;
    verify_image_content(data)?;
    Ok(sanitized)
}
