//! Request extractors whose rejections answer with the `{"error"}` JSON body
//! instead of axum's plain-text defaults.

use axum_macros::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body. Malformed JSON, wrong field types and a missing
/// `Content-Type: application/json` header are all reported as 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Query string parameters. Values that fail to deserialize are a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
