//! The `RatingStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `reel-store-sqlite`).
//! Higher layers (`reel-api`, the engine's async wrappers) depend on this
//! abstraction, not on any concrete backend.

use std::{collections::BTreeSet, future::Future};

use crate::{
  Classify,
  graph::ViewingGraph,
  movie::{Movie, MovieId},
  rating::Opinion,
  viewer::{Viewer, ViewerId},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Reel rating store backend.
///
/// A store must guarantee referential integrity: every rating references an
/// existing viewer and movie, and deleting either cascades to its ratings.
/// At most one rating exists per (viewer, movie) pair.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RatingStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Viewers ───────────────────────────────────────────────────────────

  /// Persist a new viewer. Fails if the id is taken or a field is invalid.
  fn create_viewer(
    &self,
    viewer: Viewer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a viewer by id. Returns `None` if not found.
  fn get_viewer(
    &self,
    id: ViewerId,
  ) -> impl Future<Output = Result<Option<Viewer>, Self::Error>> + Send + '_;

  /// Rename an existing viewer.
  fn update_viewer(
    &self,
    viewer: Viewer,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a viewer and, by cascade, all of their ratings.
  fn delete_viewer(
    &self,
    id: ViewerId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Movies ────────────────────────────────────────────────────────────

  /// Persist a new movie. Fails if the id is taken or a field is invalid.
  fn create_movie(
    &self,
    movie: Movie,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a movie by id. Returns `None` if not found.
  fn get_movie(
    &self,
    id: MovieId,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  /// Replace an existing movie's description. The name is left untouched.
  fn update_movie(
    &self,
    movie: Movie,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a movie and, by cascade, all ratings referencing it.
  fn delete_movie(
    &self,
    id: MovieId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Watch pairs and opinions ──────────────────────────────────────────

  /// Record that `viewer` watched `movie`, with no opinion.
  fn add_view(
    &self,
    viewer: ViewerId,
    movie: MovieId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove a watch pair together with any opinion on it.
  fn remove_view(
    &self,
    viewer: ViewerId,
    movie: MovieId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Set the opinion on an existing watch pair.
  ///
  /// Returns a not-found error if the viewer has not watched the movie.
  fn rate(
    &self,
    viewer: ViewerId,
    movie: MovieId,
    opinion: Opinion,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Clear the opinion on a watch pair, keeping the pair itself.
  ///
  /// Returns a not-found error if the pair is absent or has no opinion.
  fn remove_rating(
    &self,
    viewer: ViewerId,
    movie: MovieId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Counters ──────────────────────────────────────────────────────────

  /// Number of viewers who watched the movie (0 for unknown movies).
  fn movie_view_count(
    &self,
    movie: MovieId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of viewers who liked the movie.
  fn movie_likes_count(
    &self,
    movie: MovieId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of viewers who disliked the movie.
  fn movie_dislikes_count(
    &self,
    movie: MovieId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Lookups consumed by the engine ────────────────────────────────────

  fn watched_movies(
    &self,
    viewer: ViewerId,
  ) -> impl Future<Output = Result<BTreeSet<MovieId>, Self::Error>> + Send + '_;

  fn viewers_who_watched(
    &self,
    movie: MovieId,
  ) -> impl Future<Output = Result<BTreeSet<ViewerId>, Self::Error>> + Send + '_;

  /// `None` when the pair is unrated or was never watched.
  fn opinion(
    &self,
    viewer: ViewerId,
    movie: MovieId,
  ) -> impl Future<Output = Result<Option<Opinion>, Self::Error>> + Send + '_;

  fn viewer_ids(
    &self,
  ) -> impl Future<Output = Result<BTreeSet<ViewerId>, Self::Error>> + Send + '_;

  /// Read every viewer id and every rating in one consistent view.
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<ViewingGraph, Self::Error>> + Send + '_;
}
