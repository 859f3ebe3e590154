//! Intake & Validation — pulls the `file` part out of a multipart upload and
//! checks it before any processing happens.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Multipart field carrying the PDF.
pub const FILE_FIELD: &str = "file";

/// A validated upload: PDF bytes plus the sanitized client filename.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// Reads the first `file` part that carries a filename and validates it.
///
/// A `file` part without a filename attribute is a plain form field, so it
/// counts as missing. The body is only read once the filename passed validation.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(raw_name) = field.file_name().map(str::to_string) else {
            debug!("Ignoring '{FILE_FIELD}' field without filename");
            continue;
        };

        let filename = validate_filename(&raw_name)?;
        let data = field.bytes().await?;

        return Ok(Upload { filename, data });
    }

    Err(AppError::MissingFile)
}

/// Checks the client filename and returns its sanitized form.
pub fn validate_filename(raw: &str) -> Result<String, AppError> {
    if raw.is_empty() {
        return Err(AppError::NoFileSelected);
    }
    if !raw.to_lowercase().ends_with(".pdf") {
        return Err(AppError::WrongFileType);
    }
    Ok(secure_filename(raw))
}

/// Reduces a client-supplied filename to a safe ASCII basename.
///
/// Only the last path component survives; whitespace becomes `_`; anything
/// other than ASCII alphanumerics, `.`, `_` and `-` is dropped; leading and
/// trailing `.`/`_` are trimmed. May return an empty string.
pub fn secure_filename(raw: &str) -> String {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = basename
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}
