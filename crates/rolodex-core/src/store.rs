//! The `ContactStore` trait and supporting pagination types.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! Higher layers (`rolodex-api`, `rolodex-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactFields, ContactId};

// ─── Pagination ──────────────────────────────────────────────────────────────

/// A one-based page window over the live contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page:  u64,
  pub limit: u64,
}

impl PageRequest {
  pub const DEFAULT_PAGE: u64 = 1;
  pub const DEFAULT_LIMIT: u64 = 10;

  /// Build a window, substituting the defaults for absent or zero values.
  pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
    Self {
      page:  page.filter(|&p| p > 0).unwrap_or(Self::DEFAULT_PAGE),
      limit: limit.filter(|&l| l > 0).unwrap_or(Self::DEFAULT_LIMIT),
    }
  }

  /// Number of live contacts preceding this page.
  pub fn skip(&self) -> u64 { (self.page - 1).saturating_mul(self.limit) }

  /// `ceil(total / limit)`; zero when there are no contacts.
  pub fn total_pages(&self, total: u64) -> u64 { total.div_ceil(self.limit) }
}

impl Default for PageRequest {
  fn default() -> Self { Self::new(None, None) }
}

/// One window of live contacts plus the count of all live contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
  pub contacts: Vec<Contact>,
  /// Live contacts across every page, not just this one.
  pub total:    u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a contact store backend.
///
/// Backends must enforce uniqueness of `email` and `phone` atomically per
/// write, across every stored contact including soft-deleted ones, and must
/// make every successful write durable before returning.
///
/// Backend errors convert into the core [`Error`](crate::Error) taxonomy so
/// front ends can tell conflicts and missing records apart from storage
/// failures.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Live contacts in insertion order, skipping `skip` and returning at most
  /// `limit`.
  fn list(
    &self,
    skip: u64,
    limit: u64,
  ) -> impl Future<Output = Result<ContactPage, Self::Error>> + Send + '_;

  /// Any contact with this id, soft-deleted or not. `None` if absent.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact. The id and `created_at` are assigned by the store.
  ///
  /// Fails with a conflict if `email` or `phone` is already taken.
  fn create(
    &self,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite name, email and phone and stamp `last_updated_at`.
  ///
  /// Fails with a conflict only when a *different* contact holds the new
  /// email or phone, and with not-found if `id` is unknown.
  fn update(
    &self,
    id: ContactId,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Mark the contact deleted and stamp `deleted_at`; returns the updated
  /// record. Fails with not-found if `id` is unknown.
  fn soft_delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_to_missing_and_zero() {
    assert_eq!(PageRequest::new(None, None), PageRequest { page: 1, limit: 10 });
    assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, limit: 10 });
    assert_eq!(PageRequest::new(Some(3), Some(5)), PageRequest { page: 3, limit: 5 });
  }

  #[test]
  fn skip_is_zero_based_offset() {
    assert_eq!(PageRequest::new(Some(1), Some(10)).skip(), 0);
    assert_eq!(PageRequest::new(Some(3), Some(5)).skip(), 10);
  }

  #[test]
  fn total_pages_rounds_up() {
    let page = PageRequest::new(None, Some(10));
    assert_eq!(page.total_pages(0), 0);
    assert_eq!(page.total_pages(1), 1);
    assert_eq!(page.total_pages(10), 1);
    assert_eq!(page.total_pages(11), 2);
  }
}
