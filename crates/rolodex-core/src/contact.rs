//! Contact types — the single resource managed by the service.
//!
//! A contact is created once, may be updated any number of times, and may be
//! soft-deleted. Soft-deleted contacts are never physically removed; they keep
//! their id and remain reachable by direct lookup.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Opaque, system-generated contact identifier.
///
/// Serialised as a hyphenated lowercase UUID. Parsing from text is the only
/// way to build one from outside the store, so malformed identifiers are
/// rejected before they reach a backend.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  /// A fresh random identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for ContactId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.hyphenated())
  }
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::try_parse(s)
      .map(Self)
      .map_err(|_| Error::InvalidIdentifier(s.to_owned()))
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact, as returned by every store read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:              ContactId,
  pub name:            String,
  /// Always trimmed and lower-cased.
  pub email:           String,
  pub phone:           String,
  /// Server-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
  /// Unset until the first successful update.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_updated_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub is_deleted:      bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deleted_at:      Option<DateTime<Utc>>,
}

// ─── ContactFields ───────────────────────────────────────────────────────────

/// The caller-controlled part of a contact, already validated and normalised.
///
/// Input to [`crate::store::ContactStore::create`] and
/// [`crate::store::ContactStore::update`]. Build one with
/// [`crate::validate::ContactDraft::into_fields`]; the store trusts that the
/// values are non-empty and normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
  pub name:  String,
  pub email: String,
  pub phone: String,
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn id_parses_hyphenated_uuid() {
    let id = ContactId::new();
    let parsed: ContactId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
  }

  #[test]
  fn id_rejects_malformed_text() {
    for bad in ["12345", "", "60c728e1b129845b4c1a2f3e", "not-a-uuid"] {
      let err = bad.parse::<ContactId>().unwrap_err();
      assert!(matches!(err, Error::InvalidIdentifier(s) if s == bad));
    }
  }

  #[test]
  fn fresh_contact_serialises_without_optional_timestamps() {
    let contact = Contact {
      id:              ContactId::new(),
      name:            "Ada".into(),
      email:           "ada@example.com".into(),
      phone:           "555".into(),
      created_at:      Utc.with_ymd_and_hms(2025, 10, 22, 8, 0, 0).unwrap(),
      last_updated_at: None,
      is_deleted:      false,
      deleted_at:      None,
    };

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], contact.id.to_string());
    assert_eq!(json["isDeleted"], false);
    assert!(json.get("createdAt").is_some());
    assert!(json.get("lastUpdatedAt").is_none());
    assert!(json.get("deletedAt").is_none());
  }
}
