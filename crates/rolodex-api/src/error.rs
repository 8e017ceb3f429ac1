//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"error": <short code>, "message": <text>}`.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rolodex_core::UniqueField;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("bad request: {0}")]
  Validation(String),

  #[error("invalid id: {0:?}")]
  InvalidId(String),

  #[error("contact {0} not found")]
  NotFound(String),

  /// `on_update` selects the wording: an update collides with *another*
  /// contact, a create with any contact.
  #[error("duplicate {field}")]
  Duplicate { field: UniqueField, on_update: bool },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<rolodex_core::Error> for ApiError {
  fn from(e: rolodex_core::Error) -> Self {
    use rolodex_core::Error;
    match e {
      Error::MissingFields(fields) => Self::MissingFields(fields),
      Error::InvalidIdentifier(raw) => Self::InvalidId(raw),
      Error::NotFound(id) => Self::NotFound(id.to_string()),
      Error::Conflict(field) => Self::Duplicate { field, on_update: false },
      Error::Storage(e) => Self::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::Validation(rejection.body_text()) }
}

/// Convert any backend error through the core taxonomy.
pub(crate) fn store_error<E: Into<rolodex_core::Error>>(e: E) -> ApiError {
  ApiError::from(e.into())
}

impl ApiError {
  /// Reword a conflict for the update endpoint; other errors pass through.
  pub(crate) fn on_update(self) -> Self {
    match self {
      Self::Duplicate { field, .. } => Self::Duplicate { field, on_update: true },
      other => other,
    }
  }

  fn parts(&self) -> (StatusCode, String, String) {
    match self {
      ApiError::MissingFields(fields) => (
        StatusCode::BAD_REQUEST,
        "Missing required fields".to_owned(),
        format!("Name, email, and phone are required (missing: {})", fields.join(", ")),
      ),
      ApiError::Validation(m) => {
        (StatusCode::BAD_REQUEST, "Validation error".to_owned(), m.clone())
      }
      ApiError::InvalidId(_) => (
        StatusCode::BAD_REQUEST,
        "Invalid ID".to_owned(),
        "The provided ID is not valid".to_owned(),
      ),
      ApiError::NotFound(id) => (
        StatusCode::NOT_FOUND,
        "Contact not found".to_owned(),
        format!("Contact with id {id} does not exist"),
      ),
      ApiError::Duplicate { field, on_update } => (
        StatusCode::CONFLICT,
        format!("Duplicate {field}"),
        if *on_update {
          format!("Another contact with this {field} already exists")
        } else {
          format!("A contact with this {field} already exists")
        },
      ),
      ApiError::Store(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned(), e.to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error, message) = self.parts();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, "request rejected");
    }
    (status, Json(json!({ "error": error, "message": message }))).into_response()
  }
}
