//! Movie recommendations drawn from what similar viewers watched.

use std::collections::{BTreeMap, BTreeSet};

use super::{RESULT_LIMIT, similar::similar_viewers};
use crate::{
  graph::ViewingGraph,
  movie::MovieId,
  rating::Opinion,
  viewer::ViewerId,
};

/// Up to [`RESULT_LIMIT`] movies that viewers similar to `viewer` watched and
/// `viewer` has not, most-liked first, ties by ascending id.
///
/// A candidate nobody liked still appears, after every liked one.
pub fn movie_recommendations(graph: &ViewingGraph, viewer: ViewerId) -> Vec<MovieId> {
  let similar = similar_viewers(graph, viewer);
  rank_candidates(graph, viewer, &similar)
}

/// Like [`movie_recommendations`], but only similar viewers whose opinion on
/// `reference` equals `viewer`'s own opinion on it contribute.
///
/// When `viewer` has no opinion on `reference` nobody can match, so the
/// result is empty.
pub fn conditional_recommendations(
  graph: &ViewingGraph,
  viewer: ViewerId,
  reference: MovieId,
) -> Vec<MovieId> {
  let Some(own) = graph.opinion(viewer, reference) else {
    return Vec::new();
  };

  let agreeing: Vec<ViewerId> = similar_viewers(graph, viewer)
    .into_iter()
    .filter(|other| graph.opinion(*other, reference) == Some(own))
    .collect();

  rank_candidates(graph, viewer, &agreeing)
}

/// Rank the movies `similar` watched and `viewer` did not.
///
/// The candidate set is built first; like counts are then looked up against
/// it with a zero default so unliked candidates survive.
fn rank_candidates(
  graph: &ViewingGraph,
  viewer: ViewerId,
  similar: &[ViewerId],
) -> Vec<MovieId> {
  let candidates: BTreeSet<MovieId> = similar
    .iter()
    .flat_map(|other| graph.watched_movies(*other))
    .filter(|movie| !graph.has_watched(viewer, *movie))
    .collect();

  let mut likes: BTreeMap<MovieId, usize> =
    candidates.into_iter().map(|movie| (movie, 0)).collect();

  for other in similar {
    for (movie, opinion) in graph.ratings_of(*other) {
      if opinion == Some(Opinion::Like)
        && let Some(count) = likes.get_mut(&movie)
      {
        *count += 1;
      }
    }
  }

  let mut ranked: Vec<(MovieId, usize)> = likes.into_iter().collect();
  ranked.sort_by(|(a_movie, a_likes), (b_movie, b_likes)| {
    b_likes.cmp(a_likes).then_with(|| a_movie.cmp(b_movie))
  });

  ranked
    .into_iter()
    .take(RESULT_LIMIT)
    .map(|(movie, _)| movie)
    .collect()
}
