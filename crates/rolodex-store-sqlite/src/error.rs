//! Error type for `rolodex-store-sqlite`.

use rolodex_core::{UniqueField, contact::ContactId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("contact not found: {0}")]
  ContactNotFound(ContactId),

  /// A `UNIQUE` constraint on one of the contact fields rejected the write.
  #[error("a contact with this {0} already exists")]
  Duplicate(UniqueField),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for rolodex_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::ContactNotFound(id) => Self::NotFound(id),
      Error::Duplicate(field) => Self::Conflict(field),
      other => Self::Storage(Box::new(other)),
    }
  }
}
