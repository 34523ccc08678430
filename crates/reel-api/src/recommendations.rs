//! Read-only endpoints backed by the recommendation engine.
//!
//! Unknown ids are not errors here: the engine answers with an empty list.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
};
use reel_core::{
  engine::Recommender,
  movie::MovieId,
  store::RatingStore,
  viewer::ViewerId,
};

use crate::{error::ApiError, extract::PathParams};

/// `GET /viewers/{id}/similar`
pub async fn similar<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<ViewerId>,
) -> Result<Json<Vec<ViewerId>>, ApiError> {
  let similar = Recommender::new(store.as_ref())
    .similar_viewers(id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(similar))
}

/// `GET /viewers/influential`
pub async fn influential<S: RatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ViewerId>>, ApiError> {
  let top = Recommender::new(store.as_ref())
    .most_influencing_viewers()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(top))
}

/// `GET /viewers/{id}/recommendations`
pub async fn for_viewer<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<ViewerId>,
) -> Result<Json<Vec<MovieId>>, ApiError> {
  let recs = Recommender::new(store.as_ref())
    .movie_recommendations(id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(recs))
}

/// `GET /viewers/{id}/recommendations/{movie_id}`
pub async fn conditional<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams((id, reference)): PathParams<(ViewerId, MovieId)>,
) -> Result<Json<Vec<MovieId>>, ApiError> {
  let recs = Recommender::new(store.as_ref())
    .conditional_recommendations(id, reference)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(recs))
}
