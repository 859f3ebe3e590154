use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::roast::handlers::RoastResponse;

/// Terminal failures of the roast pipeline.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The `Display` text of each variant is the message sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("PDF requis")]
    MissingFile,

    #[error("Aucun fichier sélectionné")]
    NoFileSelected,

    #[error("Le fichier doit être un PDF")]
    WrongFileType,

    #[error("Impossible d'extraire du texte depuis le PDF")]
    EmptyExtraction,

    /// Malformed or oversized multipart body; carries the status axum assigns it.
    #[error("{message}")]
    Upload { status: StatusCode, message: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Upload {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::NoFileSelected
            | AppError::WrongFileType
            | AppError::EmptyExtraction => StatusCode::BAD_REQUEST,
            AppError::Upload { status, .. } => *status,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Roast request failed ({status}): {self}");
        } else {
            tracing::debug!("Rejected roast request ({status}): {self}");
        }

        (status, Json(RoastResponse::failure(self.to_string()))).into_response()
    }
}
