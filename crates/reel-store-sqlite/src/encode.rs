//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Ids are stored as `INTEGER`. Opinions are stored as lowercase text, with
//! `NULL` for "watched, no opinion".

use reel_core::{
  movie::{Movie, MovieId},
  rating::{Opinion, Rating},
  viewer::{Viewer, ViewerId},
};

use crate::{Error, Result};

// ─── Opinion ─────────────────────────────────────────────────────────────────

pub fn encode_opinion(o: Opinion) -> &'static str {
  match o {
    Opinion::Like => "like",
    Opinion::Dislike => "dislike",
  }
}

pub fn decode_opinion(s: &str) -> Result<Opinion> {
  match s {
    "like" => Ok(Opinion::Like),
    "dislike" => Ok(Opinion::Dislike),
    other => Err(Error::Decode(format!("unknown opinion: {other:?}"))),
  }
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// SQLite hands `COUNT(*)` back as a signed integer.
pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::Decode(format!("negative row count: {n}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `ratings` row.
pub struct RawRating {
  pub viewer_id: i64,
  pub movie_id:  i64,
  pub opinion:   Option<String>,
}

impl RawRating {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      viewer_id: row.get(0)?,
      movie_id:  row.get(1)?,
      opinion:   row.get(2)?,
    })
  }

  pub fn into_rating(self) -> Result<Rating> {
    Ok(Rating {
      viewer_id: ViewerId(self.viewer_id),
      movie_id:  MovieId(self.movie_id),
      opinion:   self.opinion.as_deref().map(decode_opinion).transpose()?,
    })
  }
}

/// Raw values read directly from a `viewers` row.
pub struct RawViewer {
  pub viewer_id: i64,
  pub name:      String,
}

impl RawViewer {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { viewer_id: row.get(0)?, name: row.get(1)? })
  }

  pub fn into_viewer(self) -> Viewer { Viewer::new(ViewerId(self.viewer_id), self.name) }
}

/// Raw values read directly from a `movies` row.
pub struct RawMovie {
  pub movie_id:    i64,
  pub name:        String,
  pub description: String,
}

impl RawMovie {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      movie_id:    row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
    })
  }

  pub fn into_movie(self) -> Movie {
    Movie::new(MovieId(self.movie_id), self.name, self.description)
  }
}
