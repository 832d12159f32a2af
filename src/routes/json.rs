use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` body extractor whose rejections use the API's `{error}` shape.
///
/// Bodies that are not JSON, lack the JSON content type or carry fields of the
/// wrong type answer 400 like any other validation failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
