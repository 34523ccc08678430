//! Handlers for `/views` and `/ratings`, the two halves of a watch pair.
//!
//! A view must exist before it can carry an opinion; removing the rating
//! keeps the view, removing the view drops both.

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
};
use reel_core::{movie::MovieId, rating::Opinion, store::RatingStore, viewer::ViewerId};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, PathParams},
};

/// `PUT /views/{viewer_id}/{movie_id}`
pub async fn add_view<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams((viewer, movie)): PathParams<(ViewerId, MovieId)>,
) -> Result<StatusCode, ApiError> {
  store.add_view(viewer, movie).await.map_err(ApiError::store)?;
  Ok(StatusCode::CREATED)
}

/// `DELETE /views/{viewer_id}/{movie_id}`
pub async fn remove_view<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams((viewer, movie)): PathParams<(ViewerId, MovieId)>,
) -> Result<StatusCode, ApiError> {
  store
    .remove_view(viewer, movie)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct RateBody {
  pub opinion: Opinion,
}

/// `PUT /ratings/{viewer_id}/{movie_id}`, body: `{"opinion":"like"}`
pub async fn rate<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams((viewer, movie)): PathParams<(ViewerId, MovieId)>,
  JsonBody(body): JsonBody<RateBody>,
) -> Result<StatusCode, ApiError> {
  store
    .rate(viewer, movie, body.opinion)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /ratings/{viewer_id}/{movie_id}`
pub async fn remove_rating<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams((viewer, movie)): PathParams<(ViewerId, MovieId)>,
) -> Result<StatusCode, ApiError> {
  store
    .remove_rating(viewer, movie)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
