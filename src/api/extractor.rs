use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// `axum::Json`と同じだが、変換の失敗を`ApiError`として返す
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query`と同じだが、変換の失敗を`ApiError`として返す
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
