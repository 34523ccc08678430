//! Error type for `reel-store-sqlite`.

use reel_core::{
  Classify, FailureClass,
  movie::MovieId,
  viewer::ViewerId,
};
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  Core(#[from] reel_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("viewer not found: {0}")]
  ViewerNotFound(ViewerId),

  #[error("movie not found: {0}")]
  MovieNotFound(MovieId),

  #[error("viewer {viewer_id} has not watched movie {movie_id}")]
  ViewNotFound {
    viewer_id: ViewerId,
    movie_id:  MovieId,
  },

  /// The pair exists but carries no opinion.
  #[error("viewer {viewer_id} has not rated movie {movie_id}")]
  RatingNotFound {
    viewer_id: ViewerId,
    movie_id:  MovieId,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Classify for Error {
  fn class(&self) -> FailureClass {
    match self {
      Error::Core(e) => e.class(),
      Error::Database(e) => constraint_class(e),
      Error::Decode(_) => FailureClass::Unexpected,
      Error::ViewerNotFound(_)
      | Error::MovieNotFound(_)
      | Error::ViewNotFound { .. }
      | Error::RatingNotFound { .. } => FailureClass::NotFound,
    }
  }
}

/// Map SQLite constraint violations onto failure classes:
/// key clashes already exist, dangling references are not found, and
/// NOT NULL / CHECK failures are bad input.
fn constraint_class(e: &tokio_rusqlite::Error) -> FailureClass {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(failure, _)) = e
  else {
    return FailureClass::Unexpected;
  };
  match failure.extended_code {
    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
      FailureClass::AlreadyExists
    }
    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => FailureClass::NotFound,
    ffi::SQLITE_CONSTRAINT_NOTNULL | ffi::SQLITE_CONSTRAINT_CHECK => {
      FailureClass::InvalidInput
    }
    _ => FailureClass::Unexpected,
  }
}
