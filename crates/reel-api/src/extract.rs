//! Request extractors whose rejections are [`ApiError`]s.
//!
//! axum's own `Json` and `Path` reject with plain-text 400/422 responses.
//! These wrappers answer malformed bodies and unparsable ids with the same
//! `{"error": ...}` 400 as every other invalid input.

use axum::{
  extract::{
    FromRequest, FromRequestParts, Path, Request,
    rejection::{JsonRejection, PathRejection},
  },
  http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON request body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
    Ok(JsonBody(value))
  }
}

/// Typed path parameters.
#[derive(Debug)]
pub struct PathParams<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParams<T>
where
  T: DeserializeOwned + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
    Ok(PathParams(value))
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}
