//! [`SqliteStore`], the SQLite implementation of [`RatingStore`].

use std::{collections::BTreeSet, path::Path};

use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use reel_core::{
  graph::ViewingGraph,
  movie::{Movie, MovieId},
  rating::{Opinion, Rating},
  store::RatingStore,
  viewer::{Viewer, ViewerId},
};

use crate::{
  encode::{RawMovie, RawRating, RawViewer, decode_count, decode_opinion, encode_opinion},
  schema::{CLEAR, DROP, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Reel rating store backed by a single SQLite file.
///
/// Cloning shares the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "opened rating store");
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Delete every viewer, movie and rating, keeping the tables.
  pub async fn clear(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(CLEAR)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Drop every table. The store is unusable until reopened.
  pub async fn drop_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql` with a single integer parameter and report whether it matched
  /// a row.
  async fn exists(&self, sql: &'static str, id: i64) -> Result<bool> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(sql, rusqlite::params![id], |_| Ok(()))
            .optional()?
            .is_some(),
        )
      })
      .await?;
    Ok(found)
  }

  /// Run a `COUNT(*)` query keyed by movie id.
  async fn count(&self, sql: &'static str, movie: MovieId) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, rusqlite::params![movie.0], |r| r.get(0))?))
      .await?;
    decode_count(count)
  }

  /// Run a single-column id query keyed by one integer.
  async fn ids(&self, sql: &'static str, key: i64) -> Result<Vec<i64>> {
    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![key], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }
}

// ─── RatingStore impl ────────────────────────────────────────────────────────

impl RatingStore for SqliteStore {
  type Error = Error;

  // ── Viewers ───────────────────────────────────────────────────────────────

  async fn create_viewer(&self, viewer: Viewer) -> Result<()> {
    viewer.validate()?;
    let Viewer { id, name } = viewer;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO viewers (viewer_id, viewer_name) VALUES (?1, ?2)",
          rusqlite::params![id.0, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_viewer(&self, id: ViewerId) -> Result<Option<Viewer>> {
    let raw: Option<RawViewer> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT viewer_id, viewer_name FROM viewers WHERE viewer_id = ?1",
              rusqlite::params![id.0],
              RawViewer::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawViewer::into_viewer))
  }

  async fn update_viewer(&self, viewer: Viewer) -> Result<()> {
    let id = viewer.id;
    if !self
      .exists("SELECT 1 FROM viewers WHERE viewer_id = ?1", id.0)
      .await?
    {
      return Err(Error::ViewerNotFound(id));
    }
    viewer.validate()?;

    let name = viewer.name;
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE viewers SET viewer_name = ?2 WHERE viewer_id = ?1",
          rusqlite::params![id.0, name],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ViewerNotFound(id));
    }
    Ok(())
  }

  async fn delete_viewer(&self, id: ViewerId) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM viewers WHERE viewer_id = ?1",
          rusqlite::params![id.0],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ViewerNotFound(id));
    }
    Ok(())
  }

  // ── Movies ────────────────────────────────────────────────────────────────

  async fn create_movie(&self, movie: Movie) -> Result<()> {
    movie.validate()?;
    let Movie { id, name, description } = movie;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO movies (movie_id, movie_name, movie_description)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id.0, name, description],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
    let raw: Option<RawMovie> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT movie_id, movie_name, movie_description
               FROM movies WHERE movie_id = ?1",
              rusqlite::params![id.0],
              RawMovie::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawMovie::into_movie))
  }

  async fn update_movie(&self, movie: Movie) -> Result<()> {
    let id = movie.id;
    if !self
      .exists("SELECT 1 FROM movies WHERE movie_id = ?1", id.0)
      .await?
    {
      return Err(Error::MovieNotFound(id));
    }
    if movie.description.is_empty() {
      return Err(reel_core::Error::EmptyField("movie description").into());
    }

    let description = movie.description;
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE movies SET movie_description = ?2 WHERE movie_id = ?1",
          rusqlite::params![id.0, description],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::MovieNotFound(id));
    }
    Ok(())
  }

  async fn delete_movie(&self, id: MovieId) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM movies WHERE movie_id = ?1",
          rusqlite::params![id.0],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::MovieNotFound(id));
    }
    Ok(())
  }

  // ── Watch pairs and opinions ──────────────────────────────────────────────

  async fn add_view(&self, viewer: ViewerId, movie: MovieId) -> Result<()> {
    // Missing viewer/movie surfaces as a foreign-key failure, a repeated
    // pair as a primary-key failure; both are classified by the error type.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ratings (viewer_id, movie_id, opinion) VALUES (?1, ?2, NULL)",
          rusqlite::params![viewer.0, movie.0],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn remove_view(&self, viewer: ViewerId, movie: MovieId) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM ratings WHERE viewer_id = ?1 AND movie_id = ?2",
          rusqlite::params![viewer.0, movie.0],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ViewNotFound { viewer_id: viewer, movie_id: movie });
    }
    Ok(())
  }

  async fn rate(&self, viewer: ViewerId, movie: MovieId, opinion: Opinion) -> Result<()> {
    let text = encode_opinion(opinion);
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE ratings SET opinion = ?3 WHERE viewer_id = ?1 AND movie_id = ?2",
          rusqlite::params![viewer.0, movie.0, text],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ViewNotFound { viewer_id: viewer, movie_id: movie });
    }
    Ok(())
  }

  async fn remove_rating(&self, viewer: ViewerId, movie: MovieId) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE ratings SET opinion = NULL
           WHERE viewer_id = ?1 AND movie_id = ?2 AND opinion IS NOT NULL",
          rusqlite::params![viewer.0, movie.0],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::RatingNotFound { viewer_id: viewer, movie_id: movie });
    }
    Ok(())
  }

  // ── Counters ──────────────────────────────────────────────────────────────

  async fn movie_view_count(&self, movie: MovieId) -> Result<u64> {
    self
      .count("SELECT COUNT(*) FROM ratings WHERE movie_id = ?1", movie)
      .await
  }

  async fn movie_likes_count(&self, movie: MovieId) -> Result<u64> {
    self
      .count(
        "SELECT COUNT(*) FROM ratings WHERE movie_id = ?1 AND opinion = 'like'",
        movie,
      )
      .await
  }

  async fn movie_dislikes_count(&self, movie: MovieId) -> Result<u64> {
    self
      .count(
        "SELECT COUNT(*) FROM ratings WHERE movie_id = ?1 AND opinion = 'dislike'",
        movie,
      )
      .await
  }

  // ── Lookups ───────────────────────────────────────────────────────────────

  async fn watched_movies(&self, viewer: ViewerId) -> Result<BTreeSet<MovieId>> {
    let ids = self
      .ids("SELECT movie_id FROM ratings WHERE viewer_id = ?1", viewer.0)
      .await?;
    Ok(ids.into_iter().map(MovieId).collect())
  }

  async fn viewers_who_watched(&self, movie: MovieId) -> Result<BTreeSet<ViewerId>> {
    let ids = self
      .ids("SELECT viewer_id FROM ratings WHERE movie_id = ?1", movie.0)
      .await?;
    Ok(ids.into_iter().map(ViewerId).collect())
  }

  async fn opinion(&self, viewer: ViewerId, movie: MovieId) -> Result<Option<Opinion>> {
    let raw: Option<Option<String>> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT opinion FROM ratings WHERE viewer_id = ?1 AND movie_id = ?2",
              rusqlite::params![viewer.0, movie.0],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.flatten().as_deref().map(decode_opinion).transpose()
  }

  async fn viewer_ids(&self) -> Result<BTreeSet<ViewerId>> {
    let ids: Vec<i64> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT viewer_id FROM viewers")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids.into_iter().map(ViewerId).collect())
  }

  async fn snapshot(&self) -> Result<ViewingGraph> {
    // Both reads share one transaction so they see the same database state.
    let (viewers, raws): (Vec<i64>, Vec<RawRating>) = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let viewers = {
          let mut stmt = tx.prepare("SELECT viewer_id FROM viewers")?;
          stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        let ratings = {
          let mut stmt =
            tx.prepare("SELECT viewer_id, movie_id, opinion FROM ratings")?;
          stmt
            .query_map([], RawRating::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;
        Ok((viewers, ratings))
      })
      .await?;

    let ratings: Vec<Rating> = raws
      .into_iter()
      .map(RawRating::into_rating)
      .collect::<Result<_>>()?;

    debug!(viewers = viewers.len(), ratings = ratings.len(), "read viewing graph");
    Ok(ViewingGraph::from_parts(viewers.into_iter().map(ViewerId), ratings))
  }
}
