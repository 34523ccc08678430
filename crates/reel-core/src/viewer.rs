//! Viewer: a person whose watch history feeds the viewing graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identity of a viewer. Valid ids are strictly positive.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ViewerId(pub i64);

impl fmt::Display for ViewerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A viewer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
  pub id:   ViewerId,
  pub name: String,
}

impl Viewer {
  pub fn new(id: ViewerId, name: impl Into<String>) -> Self {
    Self { id, name: name.into() }
  }

  /// Check the field constraints a store enforces on insert.
  pub fn validate(&self) -> Result<()> {
    if self.id.0 <= 0 {
      return Err(Error::InvalidViewerId(self.id));
    }
    if self.name.is_empty() {
      return Err(Error::EmptyField("viewer name"));
    }
    Ok(())
  }
}
