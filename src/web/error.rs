// Error types for the resize endpoint

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use super::StatusPolicy;
use crate::processing::{ArchiveError, BatchError, ValidationError};

/// Reasons a resize request produces no archive.
#[derive(Debug)]
pub enum ApiError {
    /// A multipart form body that is malformed or over the size limit.
    UnreadableUpload { status: StatusCode, details: String },
    NoFilesSelected,
    InvalidInput(ValidationError),
    NotAnImage { filename: String },
    Archive(ArchiveError),
    InternalServerError(String),
}

impl ApiError {
    /// Plain-text body sent to the client.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnreadableUpload { .. } => "No file selected",
            Self::NoFilesSelected => "No files selected",
            Self::InvalidInput(_) => "Input validation failed",
            Self::NotAnImage { .. } => "You can only upload images",
            Self::Archive(_) | Self::InternalServerError(_) => "Internal server error",
        }
    }

    pub fn status(&self, policy: StatusPolicy) -> StatusCode {
        match (self, policy) {
            (Self::Archive(_) | Self::InternalServerError(_), _) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            (_, StatusPolicy::Legacy) => StatusCode::OK,
            (Self::UnreadableUpload { status, .. }, StatusPolicy::Strict) => *status,
            (Self::NoFilesSelected | Self::InvalidInput(_), StatusPolicy::Strict) => {
                StatusCode::BAD_REQUEST
            }
            (Self::NotAnImage { .. }, StatusPolicy::Strict) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    /// Internal detail for logs, never sent to the client.
    pub fn details(&self) -> String {
        match self {
            Self::UnreadableUpload { details, .. } => details.clone(),
            Self::NoFilesSelected => "no 'files' parts in request".to_string(),
            Self::InvalidInput(err) => err.to_string(),
            Self::NotAnImage { filename } => format!("'{}' is not an allowed image type", filename),
            Self::Archive(err) => err.to_string(),
            Self::InternalServerError(msg) => msg.clone(),
        }
    }

    pub fn into_response_with(self, policy: StatusPolicy) -> Response {
        let status = self.status(policy);
        if status.is_server_error() {
            error!("Resize request failed: {}", self.details());
        }

        (
            status,
            [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())],
            self.message(),
        )
            .into_response()
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::UnreadableUpload {
            status: rejection.status(),
            details: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::UnreadableUpload {
            status: error.status(),
            details: error.body_text(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidInput(error)
    }
}

impl From<BatchError> for ApiError {
    fn from(error: BatchError) -> Self {
        match error {
            BatchError::DisallowedExtension { filename } => Self::NotAnImage { filename },
        }
    }
}

impl From<ArchiveError> for ApiError {
    fn from(error: ArchiveError) -> Self {
        Self::Archive(error)
    }
}
