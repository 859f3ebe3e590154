//! Axum route handler for the Roast API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::roast::extractor::extract_text;
use crate::roast::intake::read_upload;
use crate::state::AppState;

/// Envelope returned by `/api/roast`. Exactly one of `roast` / `error` is set.
#[derive(Debug, Serialize)]
pub struct RoastResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoastResponse {
    pub fn roasted(roast: String) -> Self {
        Self {
            success: true,
            roast: Some(roast),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            roast: None,
            error: Some(error),
        }
    }
}

/// POST /api/roast
///
/// validate upload → extract text → generate roast.
/// A body that is not multipart counts as a request without a file.
pub async fn handle_roast(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RoastResponse>, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::MissingFile)?;
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Roast requested for '{}' ({} bytes)",
        upload.filename,
        upload.data.len()
    );

    let profile_text = extract_text(&upload.data, state.config.temp_dir.as_deref()).await?;
    if profile_text.is_empty() {
        return Err(AppError::EmptyExtraction);
    }

    let roast = state.roaster.generate(&profile_text).await;
    Ok(Json(RoastResponse::roasted(roast)))
}
