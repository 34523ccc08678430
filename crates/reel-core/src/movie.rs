//! Movie: the other side of the viewing graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identity of a movie. Valid ids are strictly positive.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub id:          MovieId,
  pub name:        String,
  pub description: String,
}

impl Movie {
  pub fn new(
    id: MovieId,
    name: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self { id, name: name.into(), description: description.into() }
  }

  /// Check the field constraints a store enforces on insert.
  pub fn validate(&self) -> Result<()> {
    if self.id.0 <= 0 {
      return Err(Error::InvalidMovieId(self.id));
    }
    if self.name.is_empty() {
      return Err(Error::EmptyField("movie name"));
    }
    if self.description.is_empty() {
      return Err(Error::EmptyField("movie description"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_checks_every_field() {
    assert!(Movie::new(MovieId(1), "Heat", "LA crime").validate().is_ok());
    assert_eq!(
      Movie::new(MovieId(0), "Heat", "LA crime").validate(),
      Err(Error::InvalidMovieId(MovieId(0)))
    );
    assert_eq!(
      Movie::new(MovieId(1), "", "LA crime").validate(),
      Err(Error::EmptyField("movie name"))
    );
    assert_eq!(
      Movie::new(MovieId(1), "Heat", "").validate(),
      Err(Error::EmptyField("movie description"))
    );
  }
}
