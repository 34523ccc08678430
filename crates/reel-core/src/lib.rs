//! Core types, the Rating Store trait, and the recommendation engine for Reel.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::RatingStore`]; the engine reads a
//! [`graph::ViewingGraph`] snapshot from them and computes over it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod engine;
pub mod error;
pub mod graph;
pub mod movie;
pub mod rating;
pub mod store;
pub mod viewer;

pub use error::{Classify, Error, FailureClass, Result};
