//! HTTP error mapping. Every error renders as `{"error": ..., "status": ...}`.

use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stagebook_db::BookingError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// Submitted form is incomplete or malformed
    Validation(String),
    /// A mutation failed and was rolled back; `flash` is the user-facing text
    Mutation { status: StatusCode, flash: String },
    /// Request body could not be decoded
    Rejected { status: StatusCode, message: String },
    Internal,
}

impl ApiError {
    /// Map a failed mutation to its flash message. Store details are logged,
    /// never returned to the client.
    pub fn mutation(err: BookingError, flash: String) -> Self {
        let status = match &err {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %err, "mutation rolled back");
        } else {
            tracing::warn!(error = %err, "mutation rejected");
        }
        Self::Mutation { status, flash }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Mutation { status, .. } | ApiError::Rejected { status, .. } => *status,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(what) => ApiError::NotFound(what),
            other => {
                tracing::error!(error = %other, "query failed");
                ApiError::Internal
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "unmatched path parameter");
        ApiError::NotFound("page".to_string())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(what) => format!("Not found: {what}"),
            ApiError::Validation(msg) => msg,
            ApiError::Mutation { flash, .. } => flash,
            ApiError::Rejected { message, .. } => message,
            ApiError::Internal => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}
