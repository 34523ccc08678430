//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use reel_core::{Classify, FailureClass};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {source}")]
  Store {
    class:  FailureClass,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a store failure, remembering its class for the response status.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    ApiError::Store { class: e.class(), source: Box::new(e) }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store { class, .. } => match class {
        FailureClass::AlreadyExists => StatusCode::CONFLICT,
        FailureClass::NotFound => StatusCode::NOT_FOUND,
        FailureClass::InvalidInput => StatusCode::BAD_REQUEST,
        FailureClass::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) => m.clone(),
      ApiError::Store { class, source } => {
        warn!(?class, error = %source, "store operation failed");
        source.to_string()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
