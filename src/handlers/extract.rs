//! Request extractors that report failures as [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections become `AppError::MalformedInput`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
