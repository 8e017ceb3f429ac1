//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rolodex_core::{
  UniqueField,
  contact::{Contact, ContactFields, ContactId},
  store::{ContactPage, ContactStore},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_dt, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All clones
/// share one connection thread, so statements never interleave.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened contact store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection.
  ///
  /// Any remaining clones of this store fail with a database error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    tracing::debug!("closed contact store");
    Ok(())
  }

  /// Physically remove every contact, soft-deleted ones included.
  ///
  /// Not reachable through the HTTP API; used to reset a database before
  /// seeding it.
  pub async fn clear(&self) -> Result<usize> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM contacts", [])?))
      .await?;
    Ok(removed)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `true` if `e` is SQLite rejecting a write on a `UNIQUE` constraint.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// The first field, email before phone, that another contact already holds.
///
/// SQLite does not report colliding `UNIQUE` indexes in any fixed order, so
/// the precedence is decided here with explicit lookups.
fn taken_field(
  conn: &rusqlite::Connection,
  own_id: &str,
  email: &str,
  phone: &str,
) -> rusqlite::Result<Option<UniqueField>> {
  for (field, column, value) in [
    (UniqueField::Email, "email", email),
    (UniqueField::Phone, "phone", phone),
  ] {
    let taken = conn
      .query_row(
        &format!("SELECT 1 FROM contacts WHERE {column} = ?1 AND contact_id <> ?2"),
        rusqlite::params![value, own_id],
        |_| Ok(()),
      )
      .optional()?
      .is_some();
    if taken {
      return Ok(Some(field));
    }
  }
  Ok(None)
}

/// Outcome of a write closure that may be refused by a uniqueness check.
enum Write<T> {
  Done(T),
  Duplicate(UniqueField),
}

/// Classify a failed write statement, naming the taken field when it was a
/// uniqueness violation.
fn classify_write<T>(
  conn: &rusqlite::Connection,
  e: rusqlite::Error,
  own_id: &str,
  email: &str,
  phone: &str,
) -> tokio_rusqlite::Result<Write<T>> {
  if is_unique_violation(&e)
    && let Some(field) = taken_field(conn, own_id, email, phone)?
  {
    return Ok(Write::Duplicate(field));
  }
  Err(e.into())
}

impl SqliteStore {
  /// Persist a new contact with a caller-chosen creation time.
  ///
  /// [`ContactStore::create`] stamps the current time; this is for loading
  /// data that already has a history, such as seed sets.
  pub async fn create_at(
    &self,
    fields: ContactFields,
    created_at: DateTime<Utc>,
  ) -> Result<Contact> {
    let contact = Contact {
      id:              ContactId::new(),
      name:            fields.name,
      email:           fields.email,
      phone:           fields.phone,
      created_at,
      last_updated_at: None,
      is_deleted:      false,
      deleted_at:      None,
    };

    let id_str = encode_id(contact.id);
    let name   = contact.name.clone();
    let email  = contact.email.clone();
    let phone  = contact.phone.clone();
    let at_str = encode_dt(contact.created_at);

    let outcome = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO contacts (contact_id, name, email, phone, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, email, phone, at_str],
        ) {
          Ok(_) => Ok(Write::Done(())),
          Err(e) => classify_write(conn, e, &id_str, &email, &phone),
        }
      })
      .await?;

    match outcome {
      Write::Done(()) => Ok(contact),
      Write::Duplicate(field) => Err(Error::Duplicate(field)),
    }
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn list(&self, skip: u64, limit: u64) -> Result<ContactPage> {
    let offset_val = i64::try_from(skip).unwrap_or(i64::MAX);
    let limit_val  = i64::try_from(limit).unwrap_or(i64::MAX);

    let (raws, total): (Vec<RawContact>, i64) = self
      .conn
      .call(move |conn| {
        let rows = {
          let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE is_deleted = 0
             ORDER BY seq
             LIMIT ?1 OFFSET ?2"
          ))?;
          stmt
            .query_map(rusqlite::params![limit_val, offset_val], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        let total: i64 = conn.query_row(
          "SELECT COUNT(*) FROM contacts WHERE is_deleted = 0",
          [],
          |r| r.get(0),
        )?;

        Ok((rows, total))
      })
      .await?;

    let contacts = raws
      .into_iter()
      .map(RawContact::into_contact)
      .collect::<Result<_>>()?;

    Ok(ContactPage { contacts, total: total as u64 })
  }

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn create(&self, fields: ContactFields) -> Result<Contact> {
    self.create_at(fields, Utc::now()).await
  }

  async fn update(&self, id: ContactId, fields: ContactFields) -> Result<Contact> {
    let id_str = encode_id(id);
    let at_str = encode_dt(Utc::now());

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = match tx.execute(
          "UPDATE contacts
           SET name = ?1, email = ?2, phone = ?3, last_updated_at = ?4
           WHERE contact_id = ?5",
          rusqlite::params![fields.name, fields.email, fields.phone, at_str, id_str],
        ) {
          Ok(changed) => changed,
          Err(e) => return classify_write(&tx, e, &id_str, &fields.email, &fields.phone),
        };
        if changed == 0 {
          return Ok(Write::Done(None));
        }
        let raw = tx.query_row(
          &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"),
          rusqlite::params![id_str],
          RawContact::from_row,
        )?;
        tx.commit()?;
        Ok(Write::Done(Some(raw)))
      })
      .await?;

    let raw = match outcome {
      Write::Done(raw) => raw,
      Write::Duplicate(field) => return Err(Error::Duplicate(field)),
    };
    raw.ok_or(Error::ContactNotFound(id))?.into_contact()
  }

  async fn soft_delete(&self, id: ContactId) -> Result<Contact> {
    let id_str = encode_id(id);
    let at_str = encode_dt(Utc::now());

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE contacts SET is_deleted = 1, deleted_at = ?1 WHERE contact_id = ?2",
          rusqlite::params![at_str, id_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"),
          rusqlite::params![id_str],
          RawContact::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.ok_or(Error::ContactNotFound(id))?.into_contact()
  }
}
