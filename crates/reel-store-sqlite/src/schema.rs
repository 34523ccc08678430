//! SQL schema for the Reel SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS viewers (
    viewer_id   INTEGER PRIMARY KEY CHECK (viewer_id > 0),
    viewer_name TEXT    NOT NULL    CHECK (viewer_name <> '')
);

CREATE TABLE IF NOT EXISTS movies (
    movie_id          INTEGER PRIMARY KEY CHECK (movie_id > 0),
    movie_name        TEXT    NOT NULL    CHECK (movie_name <> ''),
    movie_description TEXT    NOT NULL    CHECK (movie_description <> '')
);

-- One row per watch pair. A NULL opinion means watched, not rated.
CREATE TABLE IF NOT EXISTS ratings (
    viewer_id INTEGER NOT NULL REFERENCES viewers(viewer_id) ON DELETE CASCADE,
    movie_id  INTEGER NOT NULL REFERENCES movies(movie_id)   ON DELETE CASCADE,
    opinion   TEXT             CHECK (opinion IN ('like', 'dislike')),
    PRIMARY KEY (viewer_id, movie_id)
);

CREATE INDEX IF NOT EXISTS ratings_movie_idx ON ratings(movie_id);

PRAGMA user_version = 1;
";

/// Removes every row; cascades make the order irrelevant but ratings go first
/// anyway so the statement also works with foreign keys off.
pub const CLEAR: &str = "
DELETE FROM ratings;
DELETE FROM viewers;
DELETE FROM movies;
";

/// Drops every table created by [`SCHEMA`].
pub const DROP: &str = "
DROP TABLE IF EXISTS ratings;
DROP TABLE IF EXISTS viewers;
DROP TABLE IF EXISTS movies;
PRAGMA user_version = 0;
";
