//! [`ViewingGraph`], an in-memory snapshot of the bipartite viewer/movie
//! graph, indexed in both directions.
//!
//! The engine never talks to a store directly; it reads one snapshot per call
//! so every lookup within that call sees the same data.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  movie::MovieId,
  rating::{Opinion, Rating},
  viewer::ViewerId,
};

/// Every known viewer id plus every rating, indexed by viewer and by movie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewingGraph {
  viewers:   BTreeSet<ViewerId>,
  /// viewer → (movie → opinion). Only viewers with at least one rating have
  /// an entry.
  by_viewer: BTreeMap<ViewerId, BTreeMap<MovieId, Option<Opinion>>>,
  by_movie:  BTreeMap<MovieId, BTreeSet<ViewerId>>,
}

impl ViewingGraph {
  pub fn new() -> Self { Self::default() }

  /// Build a graph from the store's viewer ids and rating rows.
  ///
  /// Viewers that appear only in `ratings` are added to the viewer set too.
  pub fn from_parts(
    viewers: impl IntoIterator<Item = ViewerId>,
    ratings: impl IntoIterator<Item = Rating>,
  ) -> Self {
    let mut graph = Self::new();
    for viewer in viewers {
      graph.insert_viewer(viewer);
    }
    for rating in ratings {
      graph.insert_rating(rating);
    }
    graph
  }

  pub fn insert_viewer(&mut self, viewer: ViewerId) { self.viewers.insert(viewer); }

  /// Insert a rating, replacing the opinion if the pair is already present.
  pub fn insert_rating(&mut self, rating: Rating) {
    self.viewers.insert(rating.viewer_id);
    self
      .by_viewer
      .entry(rating.viewer_id)
      .or_default()
      .insert(rating.movie_id, rating.opinion);
    self
      .by_movie
      .entry(rating.movie_id)
      .or_default()
      .insert(rating.viewer_id);
  }

  // ── Lookups ─────────────────────────────────────────────────────────────

  pub fn contains_viewer(&self, viewer: ViewerId) -> bool {
    self.viewers.contains(&viewer)
  }

  /// All known viewer ids, ascending.
  pub fn viewer_ids(&self) -> impl Iterator<Item = ViewerId> + '_ {
    self.viewers.iter().copied()
  }

  /// Viewers with at least one rating, ascending.
  pub fn viewers_with_history(&self) -> impl Iterator<Item = ViewerId> + '_ {
    self.by_viewer.keys().copied()
  }

  /// Movies the viewer has watched, ascending. Empty for unknown viewers.
  pub fn watched_movies(&self, viewer: ViewerId) -> impl Iterator<Item = MovieId> + '_ {
    self.ratings_of(viewer).map(|(movie, _)| movie)
  }

  /// Number of movies the viewer has watched.
  pub fn watch_count(&self, viewer: ViewerId) -> usize {
    self.by_viewer.get(&viewer).map_or(0, BTreeMap::len)
  }

  /// `(movie, opinion)` for every movie the viewer has watched, ascending.
  pub fn ratings_of(
    &self,
    viewer: ViewerId,
  ) -> impl Iterator<Item = (MovieId, Option<Opinion>)> + '_ {
    self
      .by_viewer
      .get(&viewer)
      .into_iter()
      .flat_map(|movies| movies.iter().map(|(m, o)| (*m, *o)))
  }

  /// Viewers who watched the movie, ascending. Empty for unknown movies.
  pub fn viewers_who_watched(
    &self,
    movie: MovieId,
  ) -> impl Iterator<Item = ViewerId> + '_ {
    self.by_movie.get(&movie).into_iter().flatten().copied()
  }

  pub fn has_watched(&self, viewer: ViewerId, movie: MovieId) -> bool {
    self
      .by_viewer
      .get(&viewer)
      .is_some_and(|movies| movies.contains_key(&movie))
  }

  /// The viewer's opinion on the movie; `None` when unrated or unwatched.
  pub fn opinion(&self, viewer: ViewerId, movie: MovieId) -> Option<Opinion> {
    self
      .by_viewer
      .get(&viewer)
      .and_then(|movies| movies.get(&movie))
      .copied()
      .flatten()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn graph() -> ViewingGraph {
    ViewingGraph::from_parts(
      [ViewerId(1), ViewerId(2), ViewerId(9)],
      [
        Rating::watched(ViewerId(1), MovieId(10)).with_opinion(Opinion::Like),
        Rating::watched(ViewerId(1), MovieId(20)),
        Rating::watched(ViewerId(2), MovieId(10)).with_opinion(Opinion::Dislike),
      ],
    )
  }

  #[test]
  fn indexes_both_directions() {
    let g = graph();
    assert_eq!(
      g.watched_movies(ViewerId(1)).collect::<Vec<_>>(),
      [MovieId(10), MovieId(20)]
    );
    assert_eq!(
      g.viewers_who_watched(MovieId(10)).collect::<Vec<_>>(),
      [ViewerId(1), ViewerId(2)]
    );
    assert_eq!(g.watch_count(ViewerId(2)), 1);
  }

  #[test]
  fn opinion_distinguishes_unrated_from_unwatched() {
    let g = graph();
    assert_eq!(g.opinion(ViewerId(1), MovieId(10)), Some(Opinion::Like));
    assert_eq!(g.opinion(ViewerId(1), MovieId(20)), None);
    assert!(g.has_watched(ViewerId(1), MovieId(20)));
    assert_eq!(g.opinion(ViewerId(1), MovieId(30)), None);
    assert!(!g.has_watched(ViewerId(1), MovieId(30)));
  }

  #[test]
  fn viewers_without_ratings_are_known_but_have_no_history() {
    let g = graph();
    assert!(g.contains_viewer(ViewerId(9)));
    assert_eq!(g.watch_count(ViewerId(9)), 0);
    assert_eq!(
      g.viewers_with_history().collect::<Vec<_>>(),
      [ViewerId(1), ViewerId(2)]
    );
    assert!(!g.contains_viewer(ViewerId(42)));
  }

  #[test]
  fn reinserting_a_pair_replaces_its_opinion() {
    let mut g = graph();
    g.insert_rating(Rating::watched(ViewerId(1), MovieId(20)).with_opinion(Opinion::Dislike));
    assert_eq!(g.opinion(ViewerId(1), MovieId(20)), Some(Opinion::Dislike));
    assert_eq!(g.watch_count(ViewerId(1)), 2);
  }
}
