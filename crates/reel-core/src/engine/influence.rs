//! Influence ranking: viewers ordered by how much they watch and vote.

use std::cmp::Ordering;

use super::RESULT_LIMIT;
use crate::{graph::ViewingGraph, viewer::ViewerId};

/// Engagement totals for one viewer with a watch history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engagement {
  pub viewer_id: ViewerId,
  /// Ratings of any opinion state.
  pub views:     usize,
  /// Ratings carrying an opinion; 0 when the viewer never voted.
  pub votes:     usize,
}

impl Engagement {
  /// Views descending, then votes descending, then id ascending.
  fn rank(&self, other: &Self) -> Ordering {
    other
      .views
      .cmp(&self.views)
      .then_with(|| other.votes.cmp(&self.votes))
      .then_with(|| self.viewer_id.cmp(&other.viewer_id))
  }
}

/// Engagement for every viewer with at least one rating, ranked.
///
/// Viewers who watched but never voted are kept with `votes = 0`.
pub fn ranked_engagement(graph: &ViewingGraph) -> Vec<Engagement> {
  let mut ranked: Vec<Engagement> = graph
    .viewers_with_history()
    .map(|viewer_id| {
      let (views, votes) = graph
        .ratings_of(viewer_id)
        .fold((0, 0), |(views, votes), (_, opinion)| {
          (views + 1, votes + usize::from(opinion.is_some()))
        });
      Engagement { viewer_id, views, votes }
    })
    .collect();
  ranked.sort_by(Engagement::rank);
  ranked
}

/// The top [`RESULT_LIMIT`] viewers of [`ranked_engagement`].
pub fn most_influencing_viewers(graph: &ViewingGraph) -> Vec<ViewerId> {
  ranked_engagement(graph)
    .into_iter()
    .take(RESULT_LIMIT)
    .map(|e| e.viewer_id)
    .collect()
}
