//! Handlers for `/movies` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/movies` | Body: `{"id":1,"name":"...","description":"..."}`; returns 201 |
//! | `GET`    | `/movies/{id}` | 404 if not found |
//! | `PUT`    | `/movies/{id}` | Body: `{"description":"..."}`; the name is fixed |
//! | `DELETE` | `/movies/{id}` | Cascades to the movie's ratings |
//! | `GET`    | `/movies/{id}/stats` | View, like and dislike counters |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use reel_core::{
  movie::{Movie, MovieId},
  store::RatingStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{JsonBody, PathParams},
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /movies`
pub async fn create<S: RatingStore>(
  State(store): State<Arc<S>>,
  JsonBody(movie): JsonBody<Movie>,
) -> Result<impl IntoResponse, ApiError> {
  store
    .create_movie(movie.clone())
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(movie)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /movies/{id}`
pub async fn get_one<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<MovieId>,
) -> Result<Json<Movie>, ApiError> {
  let movie = store
    .get_movie(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("movie {id} not found")))?;
  Ok(Json(movie))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub description: String,
}

/// `PUT /movies/{id}`, body: `{"description":"..."}`
pub async fn update<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<MovieId>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<StatusCode, ApiError> {
  let mut movie = store
    .get_movie(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("movie {id} not found")))?;
  movie.description = body.description;

  store.update_movie(movie).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /movies/{id}`
pub async fn delete<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<MovieId>,
) -> Result<StatusCode, ApiError> {
  store.delete_movie(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Stats ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MovieStats {
  pub views:    u64,
  pub likes:    u64,
  pub dislikes: u64,
}

/// `GET /movies/{id}/stats`: all zero for a movie nobody watched.
pub async fn stats<S: RatingStore>(
  State(store): State<Arc<S>>,
  PathParams(id): PathParams<MovieId>,
) -> Result<Json<MovieStats>, ApiError> {
  let views = store.movie_view_count(id).await.map_err(ApiError::store)?;
  let likes = store.movie_likes_count(id).await.map_err(ApiError::store)?;
  let dislikes = store
    .movie_dislikes_count(id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(MovieStats { views, likes, dislikes }))
}
