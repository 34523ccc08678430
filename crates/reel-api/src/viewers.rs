//! Handlers for `/viewers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/viewers` | Body: `{"id":1,"name":"Ada"}`; returns 201 |
//! | `GET`    | `/viewers/{id}` | 404 if not found |
//! | `PUT`    | `/viewers/{id}` | Body: `{"name":"..."}`; returns 204 |
//! | `DELETE` | `/viewers/{id}` | Cascades to the viewer's ratings; returns 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use reel_core::{
  store::RatingStore,
  viewer::{Viewer, ViewerId},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, PathParams},
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /viewers`
pub async fn create<S: RatingStore>(
  State(store): State<Arc<S>>,
  JsonBody(viewer): JsonBody<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
  store
    .create_viewer(viewer.clone())
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(viewer)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /viewers/{id}`
pub async fn get_one<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<ViewerId>,
) -> Result<Json<Viewer>, ApiError> {
  let viewer = store
    .get_viewer(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("viewer {id} not found")))?;
  Ok(Json(viewer))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub name: String,
}

/// `PUT /viewers/{id}`, body: `{"name":"..."}`
pub async fn update<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<ViewerId>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<StatusCode, ApiError> {
  store
    .update_viewer(Viewer::new(id, body.name))
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /viewers/{id}`
pub async fn delete<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<ViewerId>,
) -> Result<StatusCode, ApiError> {
  store.delete_viewer(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
