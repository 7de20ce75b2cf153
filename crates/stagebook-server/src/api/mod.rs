pub mod artists;
pub mod error;
pub mod extract;
pub mod forms;
pub mod shows;
pub mod venues;

use axum::Json;
use serde::Serialize;

use error::ApiError;

/// Result of a successful form submission: the flash message to show and
/// where the client should navigate next.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub flash: String,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> MutationResponse<T> {
    pub fn new(flash: String, redirect: impl Into<String>, data: T) -> Self {
        Self {
            flash,
            redirect: redirect.into(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

fn status() -> ApiStatus {
    ApiStatus {
        status: "ok",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// GET /
pub async fn home() -> Json<ApiStatus> {
    Json(status())
}

/// GET /healthz
pub async fn healthz() -> Json<ApiStatus> {
    Json(status())
}

/// Unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("page".to_string())
}
