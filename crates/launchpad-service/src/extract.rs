//! Request extractors that reject with [`ApiError`] instead of plain text.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON body extractor. Malformed bodies and unknown enum values become
/// `validation_error` responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with the same rejection shape as [`ApiJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
