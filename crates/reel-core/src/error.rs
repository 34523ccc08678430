//! Error types for `reel-core`.

use serde::Serialize;
use thiserror::Error;

use crate::{movie::MovieId, viewer::ViewerId};

/// Validation failures for records entering a store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("viewer id must be positive, got {0}")]
  InvalidViewerId(ViewerId),

  #[error("movie id must be positive, got {0}")]
  InvalidMovieId(MovieId),

  #[error("{0} must not be empty")]
  EmptyField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// The user-visible category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
  /// A record with the same key is already present.
  AlreadyExists,
  /// A referenced record (or pair) is absent.
  NotFound,
  /// The input violates a field constraint.
  InvalidInput,
  /// Anything else: I/O, a closed connection, undecodable rows.
  Unexpected,
}

/// Errors that can report which [`FailureClass`] they belong to.
///
/// Every [`RatingStore`](crate::store::RatingStore) error implements this so
/// the service layer can map failures without knowing the backend.
pub trait Classify {
  fn class(&self) -> FailureClass;
}

impl Classify for Error {
  fn class(&self) -> FailureClass { FailureClass::InvalidInput }
}
