//! Ratings: the edges of the viewing graph.
//!
//! A rating row exists as soon as a viewer has watched a movie. The opinion
//! is optional: `None` means "watched, no opinion", which is distinct from
//! the pair not existing at all.

use serde::{Deserialize, Serialize};

use crate::{movie::MovieId, viewer::ViewerId};

/// A viewer's judgment on a movie they watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opinion {
  Like,
  Dislike,
}

/// One (viewer, movie) watch pair and its optional opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
  pub viewer_id: ViewerId,
  pub movie_id:  MovieId,
  pub opinion:   Option<Opinion>,
}

impl Rating {
  /// A watch pair with no opinion yet.
  pub fn watched(viewer_id: ViewerId, movie_id: MovieId) -> Self {
    Self { viewer_id, movie_id, opinion: None }
  }

  pub fn with_opinion(mut self, opinion: Opinion) -> Self {
    self.opinion = Some(opinion);
    self
  }
}
