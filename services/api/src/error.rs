use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use herdbook_core::response::Envelope;

/// One field-level validation failure, surfaced in the envelope's `err` array.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    Validation(Vec<FieldError>),
    #[error("Image file is required")]
    ImageRequired,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("User with this phone number already exists")]
    PhoneAlreadyRegistered,
    #[error("Animal with ID {0} not found")]
    AnimalNotFound(String),
    #[error("No medication records found for animal with ID {0}")]
    NoMedicationRecords(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::ImageRequired => "IMAGE_REQUIRED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::PhoneAlreadyRegistered => "PHONE_ALREADY_REGISTERED",
            Self::AnimalNotFound(_) => "ANIMAL_NOT_FOUND",
            Self::NoMedicationRecords(_) => "NO_MEDICATION_RECORDS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::ImageRequired => StatusCode::BAD_REQUEST,
            Self::UserNotFound | Self::AnimalNotFound(_) | Self::NoMedicationRecords(_) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidPassword => StatusCode::UNAUTHORIZED,
            Self::PhoneAlreadyRegistered => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — the trace layer already records method/uri/status for
        // every request, so 4xx client errors would be noise here. Internal
        // errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let envelope = match &self {
            Self::Validation(fields) => Envelope::error_with(
                self.to_string(),
                serde_json::to_value(fields).unwrap_or_default(),
            ),
            Self::Internal(e) => {
                Envelope::error_with(self.to_string(), serde_json::json!(format!("{e:#}")))
            }
            _ => Envelope::error(self.to_string()),
        };
        (status, axum::Json(envelope)).into_response()
    }
}
