//! Error types for `rolodex-core`.
//!
//! This is the taxonomy every store backend reports in and every front end
//! maps from.

use std::fmt;

use thiserror::Error;

use crate::contact::ContactId;

/// A contact field that must be unique across the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
  Email,
  Phone,
}

impl UniqueField {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Phone => "phone",
    }
  }
}

impl fmt::Display for UniqueField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required fields were absent or blank.
  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("invalid identifier: {0:?}")]
  InvalidIdentifier(String),

  #[error("contact not found: {0}")]
  NotFound(ContactId),

  #[error("a contact with this {0} already exists")]
  Conflict(UniqueField),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
