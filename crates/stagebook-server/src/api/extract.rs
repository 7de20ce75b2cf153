//! `Path` and `Form` wrappers whose rejections render as [`ApiError`] JSON.

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// Path parameters. A segment that does not parse (e.g. `/venues/abc`) is
/// reported as not found.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// URL-encoded form body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct FormBody<T>(pub T);
