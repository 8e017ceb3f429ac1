//! Sample data for development databases.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use rolodex_core::contact::{Contact, ContactFields};
use rolodex_store_sqlite::SqliteStore;

/// `(name, email, phone, created_at)` of every sample contact, in insertion
/// order. Creation times are RFC 3339 and kept as-is when seeding.
pub const SAMPLE_CONTACTS: [(&str, &str, &str, &str); 5] = [
  ("Rohit Verma", "rohit.verma@example.com", "9876543210", "2025-10-20T10:15:00Z"),
  ("Priya Sharma", "priya.sharma@example.com", "9123456780", "2025-10-21T09:30:00Z"),
  ("Rahul Mehta", "rahul.mehta@example.com", "9871234567", "2025-10-22T08:00:00Z"),
  ("Sneha Reddy", "sneha.reddy@example.com", "9765432180", "2025-10-19T14:45:00Z"),
  ("Arjun Patel", "arjun.patel@example.com", "9812345678", "2025-10-18T16:10:00Z"),
];

/// Remove every stored contact and insert [`SAMPLE_CONTACTS`].
pub async fn reseed(store: &SqliteStore) -> anyhow::Result<Vec<Contact>> {
  let removed = store.clear().await.context("failed to clear contacts")?;
  tracing::info!(removed, "cleared existing contacts");

  let mut created = Vec::with_capacity(SAMPLE_CONTACTS.len());
  for (name, email, phone, created_at) in SAMPLE_CONTACTS {
    let created_at = DateTime::parse_from_rfc3339(created_at)
      .with_context(|| format!("bad sample timestamp {created_at:?}"))?
      .with_timezone(&Utc);
    let fields = ContactFields {
      name:  name.to_owned(),
      email: email.to_owned(),
      phone: phone.to_owned(),
    };
    let contact = store
      .create_at(fields, created_at)
      .await
      .with_context(|| format!("failed to insert sample contact {email}"))?;
    tracing::info!(id = %contact.id, name = %contact.name, email = %contact.email, "seeded contact");
    created.push(contact);
  }
  Ok(created)
}
