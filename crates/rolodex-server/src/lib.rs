//! HTTP server assembly for Rolodex.
//!
//! Ties the JSON API to a root greeting route and request tracing, and owns
//! the layered server configuration.

pub mod seed;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, response::Html, routing::get};
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use rolodex_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_STORE_PATH: &str = "rolodex.db";

/// Runtime server configuration.
///
/// Layered as built-in defaults, then the optional TOML file, then
/// `ROLODEX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load configuration, treating a missing `path` as empty.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    with_defaults()?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("ROLODEX"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn with_defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
  Config::builder()
    .set_default("host", DEFAULT_HOST)?
    .set_default("port", i64::from(DEFAULT_PORT))?
    .set_default("store_path", DEFAULT_STORE_PATH)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: `/` greeting plus the API under `/api`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(greeting))
    .nest("/api", rolodex_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

async fn greeting() -> Html<&'static str> { Html("<h1>Welcome to contacts api</h1>") }

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use config::FileFormat;
  use rolodex_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn test_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    app(Arc::new(store))
  }

  #[tokio::test]
  async fn root_serves_html_greeting() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = test_app().await.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("text/html"), "Content-Type: {ct}");
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Welcome to contacts api</h1>");
  }

  #[tokio::test]
  async fn api_is_nested_under_prefix() {
    let req = Request::builder()
      .uri("/api/contacts")
      .body(Body::empty())
      .unwrap();
    let resp = test_app().await.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["metadata"]["totalContacts"], 0);
    assert_eq!(body["metadata"]["totalPages"], 0);
  }

  #[test]
  fn defaults_fill_missing_keys() {
    let cfg: ServerConfig = with_defaults()
      .unwrap()
      .add_source(File::from_str("port = 8080", FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }
}
