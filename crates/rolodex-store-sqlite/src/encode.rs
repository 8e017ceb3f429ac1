//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Identifiers are stored as
//! hyphenated lowercase UUID strings.

use chrono::{DateTime, Utc};
use rolodex_core::contact::{Contact, ContactId};
use uuid::Uuid;

use crate::{Error, Result};

// ─── ContactId ───────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> {
  Ok(ContactId::from(Uuid::parse_str(s)?))
}

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str = "contact_id, name, email, phone, created_at, \
                                   last_updated_at, is_deleted, deleted_at";

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id:      String,
  pub name:            String,
  pub email:           String,
  pub phone:           String,
  pub created_at:      String,
  pub last_updated_at: Option<String>,
  pub is_deleted:      bool,
  pub deleted_at:      Option<String>,
}

impl RawContact {
  /// Read a row selected with [`CONTACT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:      row.get(0)?,
      name:            row.get(1)?,
      email:           row.get(2)?,
      phone:           row.get(3)?,
      created_at:      row.get(4)?,
      last_updated_at: row.get(5)?,
      is_deleted:      row.get(6)?,
      deleted_at:      row.get(7)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:              decode_id(&self.contact_id)?,
      name:            self.name,
      email:           self.email,
      phone:           self.phone,
      created_at:      decode_dt(&self.created_at)?,
      last_updated_at: self.last_updated_at.as_deref().map(decode_dt).transpose()?,
      is_deleted:      self.is_deleted,
      deleted_at:      self.deleted_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
