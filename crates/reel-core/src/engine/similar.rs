//! Similar viewers: overlap of watch sets against a fixed threshold.

use std::collections::BTreeMap;

use crate::{graph::ViewingGraph, viewer::ViewerId};

/// Minimum overlap another viewer needs with a viewer who watched `watched`
/// movies: `(3n + 3) / 4`, truncating.
///
/// This is 0 for `n = 0`, so a viewer who has watched nothing is similar to
/// everyone with a watch history.
pub fn similarity_threshold(watched: usize) -> usize { (3 * watched + 3) / 4 }

/// Viewers whose overlap with `viewer` meets [`similarity_threshold`],
/// ascending by id. Never contains `viewer` itself.
///
/// Unknown viewers yield an empty result. Only viewers with at least one
/// rating are candidates.
pub fn similar_viewers(graph: &ViewingGraph, viewer: ViewerId) -> Vec<ViewerId> {
  if !graph.contains_viewer(viewer) {
    return Vec::new();
  }

  let threshold = similarity_threshold(graph.watch_count(viewer));

  // Every candidate starts at zero so the n = 0 case keeps them all.
  let mut overlap: BTreeMap<ViewerId, usize> = graph
    .viewers_with_history()
    .filter(|other| *other != viewer)
    .map(|other| (other, 0))
    .collect();

  for movie in graph.watched_movies(viewer) {
    for other in graph.viewers_who_watched(movie) {
      if let Some(count) = overlap.get_mut(&other) {
        *count += 1;
      }
    }
  }

  overlap
    .into_iter()
    .filter(|(_, count)| *count >= threshold)
    .map(|(other, _)| other)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    engine::fixture::{graph, ids},
    movie::MovieId,
    rating::{Opinion, Rating},
  };

  #[test]
  fn threshold_formula() {
    let expected = [(0, 0), (1, 1), (2, 2), (3, 3), (4, 3), (5, 4), (8, 6), (9, 7)];
    for (n, t) in expected {
      assert_eq!(similarity_threshold(n), t, "n = {n}");
    }
  }

  #[test]
  fn end_to_end_scenario() {
    let g = graph(&[], &[
      (1, 10), (1, 20), (1, 30), (1, 40),
      (2, 10), (2, 20), (2, 30),
      (3, 10), (3, 20),
    ]);
    assert_eq!(similar_viewers(&g, ViewerId(1)), ids(&[2]));
  }

  #[test]
  fn boundary_at_four_watched() {
    // n = 4 → threshold 3: overlap 2 is out, 3 and 4 are in.
    let g = graph(&[], &[
      (1, 1), (1, 2), (1, 3), (1, 4),
      (2, 1), (2, 2), (2, 99),
      (3, 1), (3, 2), (3, 3),
      (4, 1), (4, 2), (4, 3), (4, 4), (4, 5),
    ]);
    assert_eq!(similar_viewers(&g, ViewerId(1)), ids(&[3, 4]));
  }

  #[test]
  fn zero_watched_matches_everyone_with_history() {
    let g = graph(&[1], &[(2, 10), (3, 20), (3, 30)]);
    assert_eq!(similar_viewers(&g, ViewerId(1)), ids(&[2, 3]));
  }

  #[test]
  fn viewers_without_history_never_qualify() {
    let g = graph(&[1, 2], &[(3, 5)]);
    assert_eq!(similar_viewers(&g, ViewerId(1)), ids(&[3]));
  }

  #[test]
  fn unknown_viewer_yields_empty() {
    let g = graph(&[], &[(2, 10), (3, 10)]);
    assert!(similar_viewers(&g, ViewerId(1)).is_empty());
  }

  #[test]
  fn opinions_do_not_affect_overlap() {
    let mut g = graph(&[], &[(1, 10)]);
    g.insert_rating(Rating::watched(ViewerId(2), MovieId(10)).with_opinion(Opinion::Dislike));
    assert_eq!(similar_viewers(&g, ViewerId(1)), ids(&[2]));
  }

  #[test]
  fn result_is_ascending_and_repeatable() {
    let g = graph(&[], &[(5, 1), (1, 1), (9, 1), (3, 1)]);
    let first = similar_viewers(&g, ViewerId(5));
    assert_eq!(first, ids(&[1, 3, 9]));
    assert_eq!(similar_viewers(&g, ViewerId(5)), first);
  }
}
