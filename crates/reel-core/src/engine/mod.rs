//! The similarity and recommendation engine.
//!
//! Every operation is a pure function of a [`ViewingGraph`]. [`Recommender`]
//! wraps them for callers holding a [`RatingStore`]: each call reads exactly
//! one snapshot and computes over it, so a rating written mid-call is either
//! fully visible or not at all.
//!
//! None of the operations fail for "nothing found"; unknown ids and empty
//! histories produce empty results. Only store failures propagate.

pub mod influence;
pub mod recommend;
pub mod similar;

pub use influence::{Engagement, most_influencing_viewers, ranked_engagement};
pub use recommend::{conditional_recommendations, movie_recommendations};
pub use similar::{similar_viewers, similarity_threshold};

use tracing::debug;

use crate::{graph::ViewingGraph, movie::MovieId, store::RatingStore, viewer::ViewerId};

/// Maximum length of every ranked result.
pub const RESULT_LIMIT: usize = 10;

// ─── Store-backed facade ─────────────────────────────────────────────────────

/// Runs the engine against a [`RatingStore`], one snapshot per call.
pub struct Recommender<'s, S> {
  store: &'s S,
}

impl<'s, S: RatingStore> Recommender<'s, S> {
  pub fn new(store: &'s S) -> Self { Self { store } }

  async fn graph(&self) -> Result<ViewingGraph, S::Error> {
    self.store.snapshot().await
  }

  /// See [`similar::similar_viewers`].
  pub async fn similar_viewers(&self, viewer: ViewerId) -> Result<Vec<ViewerId>, S::Error> {
    let graph = self.graph().await?;
    let similar = similar_viewers(&graph, viewer);
    debug!(%viewer, count = similar.len(), "computed similar viewers");
    Ok(similar)
  }

  /// See [`influence::most_influencing_viewers`].
  pub async fn most_influencing_viewers(&self) -> Result<Vec<ViewerId>, S::Error> {
    let graph = self.graph().await?;
    let top = most_influencing_viewers(&graph);
    debug!(count = top.len(), "ranked influencing viewers");
    Ok(top)
  }

  /// See [`recommend::movie_recommendations`].
  pub async fn movie_recommendations(
    &self,
    viewer: ViewerId,
  ) -> Result<Vec<MovieId>, S::Error> {
    let graph = self.graph().await?;
    let recs = movie_recommendations(&graph, viewer);
    debug!(%viewer, count = recs.len(), "computed recommendations");
    Ok(recs)
  }

  /// See [`recommend::conditional_recommendations`].
  pub async fn conditional_recommendations(
    &self,
    viewer: ViewerId,
    reference: MovieId,
  ) -> Result<Vec<MovieId>, S::Error> {
    let graph = self.graph().await?;
    let recs = conditional_recommendations(&graph, viewer, reference);
    debug!(%viewer, %reference, count = recs.len(), "computed conditional recommendations");
    Ok(recs)
  }
}

// ─── Test fixtures ───────────────────────────────────────────────────────────
