//! JSON REST API for Reel.
//!
//! Exposes an axum [`Router`] backed by any [`reel_core::store::RatingStore`].
//! Transport concerns (binding, request tracing) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", reel_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod movies;
pub mod ratings;
pub mod recommendations;
pub mod viewers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use reel_core::store::RatingStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RatingStore + 'static,
{
  Router::new()
    // Viewers
    .route("/viewers", post(viewers::create::<S>))
    .route(
      "/viewers/{id}",
      get(viewers::get_one::<S>)
        .put(viewers::update::<S>)
        .delete(viewers::delete::<S>),
    )
    // Movies
    .route("/movies", post(movies::create::<S>))
    .route(
      "/movies/{id}",
      get(movies::get_one::<S>)
        .put(movies::update::<S>)
        .delete(movies::delete::<S>),
    )
    .route("/movies/{id}/stats", get(movies::stats::<S>))
    // Watch pairs and opinions
    .route(
      "/views/{viewer_id}/{movie_id}",
      put(ratings::add_view::<S>).delete(ratings::remove_view::<S>),
    )
    .route(
      "/ratings/{viewer_id}/{movie_id}",
      put(ratings::rate::<S>).delete(ratings::remove_rating::<S>),
    )
    // Engine
    .route("/viewers/influential", get(recommendations::influential::<S>))
    .route("/viewers/{id}/similar", get(recommendations::similar::<S>))
    .route(
      "/viewers/{id}/recommendations",
      get(recommendations::for_viewer::<S>),
    )
    .route(
      "/viewers/{id}/recommendations/{movie_id}",
      get(recommendations::conditional::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use reel_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  /// Send one request and return the status plus the decoded JSON body
  /// (`Value::Null` when the body is empty).
  async fn send(
    store: &Arc<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(store.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn seed(store: &Arc<SqliteStore>, views: &[(i64, i64)]) {
    for (v, m) in views {
      send(store, "POST", "/viewers", Some(json!({"id": v, "name": format!("v{v}")}))).await;
      send(
        store,
        "POST",
        "/movies",
        Some(json!({"id": m, "name": format!("m{m}"), "description": "film"})),
      )
      .await;
      let (status, _) = send(store, "PUT", &format!("/views/{v}/{m}"), None).await;
      assert_eq!(status, StatusCode::CREATED);
    }
  }

  // ── Viewers ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn viewer_lifecycle() {
    let store = make_store().await;

    let (status, body) =
      send(&store, "POST", "/viewers", Some(json!({"id": 1, "name": "Ada"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "name": "Ada"}));

    let (status, _) =
      send(&store, "PUT", "/viewers/1", Some(json!({"name": "Grace"}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&store, "GET", "/viewers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grace");

    let (status, _) = send(&store, "DELETE", "/viewers/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&store, "GET", "/viewers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("viewer 1"));
  }

  #[tokio::test]
  async fn store_failures_map_to_status() {
    let store = make_store().await;
    let ada = json!({"id": 1, "name": "Ada"});

    send(&store, "POST", "/viewers", Some(ada.clone())).await;
    let (status, body) = send(&store, "POST", "/viewers", Some(ada)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) =
      send(&store, "POST", "/viewers", Some(json!({"id": 0, "name": "Zero"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&store, "DELETE", "/viewers/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&store, "PUT", "/views/9/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Movies ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn movie_update_keeps_name() {
    let store = make_store().await;
    send(
      &store,
      "POST",
      "/movies",
      Some(json!({"id": 10, "name": "Heat", "description": "crime"})),
    )
    .await;

    let (status, _) = send(
      &store,
      "PUT",
      "/movies/10",
      Some(json!({"description": "a heist film"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&store, "GET", "/movies/10", None).await;
    assert_eq!(
      body,
      json!({"id": 10, "name": "Heat", "description": "a heist film"})
    );

    let (status, _) =
      send(&store, "PUT", "/movies/11", Some(json!({"description": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn movie_stats_count_views_and_opinions() {
    let store = make_store().await;
    seed(&store, &[(1, 10), (2, 10), (3, 10)]).await;

    let (status, _) =
      send(&store, "PUT", "/ratings/1/10", Some(json!({"opinion": "like"}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    send(&store, "PUT", "/ratings/2/10", Some(json!({"opinion": "dislike"}))).await;

    let (_, body) = send(&store, "GET", "/movies/10/stats", None).await;
    assert_eq!(body, json!({"views": 3, "likes": 1, "dislikes": 1}));

    let (status, _) = send(&store, "DELETE", "/ratings/1/10", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&store, "DELETE", "/ratings/1/10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&store, "DELETE", "/views/3/10", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&store, "GET", "/movies/10/stats", None).await;
    assert_eq!(body, json!({"views": 2, "likes": 0, "dislikes": 1}));
  }

  #[tokio::test]
  async fn rating_unwatched_movie_is_not_found() {
    let store = make_store().await;
    seed(&store, &[(1, 10)]).await;
    send(
      &store,
      "POST",
      "/movies",
      Some(json!({"id": 20, "name": "m20", "description": "film"})),
    )
    .await;

    let (status, _) =
      send(&store, "PUT", "/ratings/1/20", Some(json!({"opinion": "like"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Malformed input ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn null_viewer_name_is_bad_request() {
    let store = make_store().await;

    let (status, body) =
      send(&store, "POST", "/viewers", Some(json!({"id": 1, "name": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&store, "GET", "/viewers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&store, "POST", "/viewers", Some(json!({"id": 1, "name": "Ada"}))).await;
    let (status, body) =
      send(&store, "PUT", "/viewers/1", Some(json!({"name": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn missing_movie_description_is_bad_request() {
    let store = make_store().await;

    let (status, body) =
      send(&store, "POST", "/movies", Some(json!({"id": 10, "name": "Heat"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    send(
      &store,
      "POST",
      "/movies",
      Some(json!({"id": 10, "name": "Heat", "description": "crime"})),
    )
    .await;
    let (status, body) = send(&store, "PUT", "/movies/10", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn unknown_opinion_is_bad_request() {
    let store = make_store().await;
    seed(&store, &[(1, 10)]).await;

    let (status, body) =
      send(&store, "PUT", "/ratings/1/10", Some(json!({"opinion": "meh"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("meh"));

    let (_, body) = send(&store, "GET", "/movies/10/stats", None).await;
    assert_eq!(body, json!({"views": 1, "likes": 0, "dislikes": 0}));
  }

  #[tokio::test]
  async fn unparsable_path_id_is_bad_request() {
    let store = make_store().await;

    let (status, body) = send(&store, "GET", "/viewers/abc/similar", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&store, "PUT", "/views/1/x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  // ── Engine ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn similar_viewers_end_to_end() {
    let store = make_store().await;
    seed(
      &store,
      &[
        (1, 10), (1, 20), (1, 30), (1, 40),
        (2, 10), (2, 20), (2, 30),
        (3, 10), (3, 20),
      ],
    )
    .await;

    let (status, body) = send(&store, "GET", "/viewers/1/similar", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([2]));

    let (status, body) = send(&store, "GET", "/viewers/77/similar", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn recommendations_and_influence() {
    let store = make_store().await;
    seed(
      &store,
      &[(1, 1), (1, 2), (2, 1), (2, 2), (2, 30), (2, 40), (3, 1), (3, 2), (3, 50)],
    )
    .await;
    send(&store, "PUT", "/ratings/2/40", Some(json!({"opinion": "like"}))).await;
    send(&store, "PUT", "/ratings/1/1", Some(json!({"opinion": "like"}))).await;
    send(&store, "PUT", "/ratings/3/1", Some(json!({"opinion": "like"}))).await;

    let (_, body) = send(&store, "GET", "/viewers/1/recommendations", None).await;
    assert_eq!(body, json!([40, 30, 50]));

    let (_, body) = send(&store, "GET", "/viewers/1/recommendations/1", None).await;
    assert_eq!(body, json!([50]));

    let (_, body) = send(&store, "GET", "/viewers/1/recommendations/2", None).await;
    assert_eq!(body, json!([]));

    let (status, body) = send(&store, "GET", "/viewers/influential", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([2, 3, 1]));
  }
}
