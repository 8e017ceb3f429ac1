//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Optional `?page` and `?limit`; live contacts only |
//! | `GET`    | `/contacts/:id` | Soft-deleted contacts are still returned |
//! | `POST`   | `/contacts` | Body: [`ContactDraft`]; returns 201 + stored contact |
//! | `PUT`    | `/contacts/:id` | Body: [`ContactDraft`]; all fields required |
//! | `DELETE` | `/contacts/:id` | Soft delete; returns the updated contact |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{
  contact::{Contact, ContactId},
  store::{ContactStore, PageRequest},
  validate::ContactDraft,
};
use serde::Serialize;

use crate::error::{ApiError, store_error};

fn parse_id(raw: &str) -> Result<ContactId, ApiError> { Ok(raw.parse::<ContactId>()?) }

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw paging parameters. Kept as strings so that garbage falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListParams {
  pub page:  Option<String>,
  pub limit: Option<String>,
}

impl ListParams {
  /// Pick `page` and `limit` out of decoded query pairs. When a key repeats,
  /// its first occurrence wins; unknown keys are ignored.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let mut params = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "page" => &mut params.page,
        "limit" => &mut params.limit,
        _ => continue,
      };
      slot.get_or_insert(value);
    }
    params
  }

  fn page_request(&self) -> PageRequest {
    PageRequest::new(
      parse_leading_number(self.page.as_deref()),
      parse_leading_number(self.limit.as_deref()),
    )
  }
}

/// Parse the run of ASCII digits at the start of `raw` (after leading
/// whitespace), ignoring whatever follows. `"3abc"` is 3; `"abc"` and `"-2"`
/// are `None`.
fn parse_leading_number(raw: Option<&str>) -> Option<u64> {
  let s = raw?.trim_start();
  let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
  s[..end].parse().ok()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
  pub total_contacts: u64,
  pub current_page:   u64,
  pub limit:          u64,
  pub total_pages:    u64,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub contacts: Vec<Contact>,
  pub metadata: ListMetadata,
}

/// `GET /contacts[?page=<n>][&limit=<n>]`
///
/// Never rejects its query string: anything unreadable means default paging.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: ContactStore,
{
  let params = query
    .map(|Query(pairs)| ListParams::from_pairs(pairs))
    .unwrap_or_default();
  let window = params.page_request();
  let page = store
    .list(window.skip(), window.limit)
    .await
    .map_err(store_error)?;

  Ok(Json(ListResponse {
    metadata: ListMetadata {
      total_contacts: page.total,
      current_page:   window.page,
      limit:          window.limit,
      total_pages:    window.total_pages(page.total),
    },
    contacts: page.contacts,
  }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&raw_id)?;
  let contact = store
    .get(id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(draft) = body?;
  let fields = draft.into_fields()?;

  let contact = store.create(fields).await.map_err(store_error)?;
  tracing::info!(id = %contact.id, "created contact");
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id` — replaces name, email and phone together.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  body: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&raw_id)?;
  let Json(draft) = body?;
  let fields = draft.into_fields()?;

  let contact = store
    .update(id, fields)
    .await
    .map_err(|e| store_error(e).on_update())?;
  tracing::info!(%id, "updated contact");
  Ok(Json(contact))
}

// ─── Soft delete ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
  pub message:         &'static str,
  pub deleted_contact: Contact,
}

/// `DELETE /contacts/:id` — marks the contact deleted; it stays reachable by
/// id but drops out of listings.
pub async fn soft_delete<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&raw_id)?;
  let contact = store.soft_delete(id).await.map_err(store_error)?;
  tracing::info!(%id, "soft-deleted contact");
  Ok(Json(DeleteResponse {
    message:         "Contact deleted successfully",
    deleted_contact: contact,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leading_number_parsing() {
    assert_eq!(parse_leading_number(None), None);
    assert_eq!(parse_leading_number(Some("")), None);
    assert_eq!(parse_leading_number(Some("abc")), None);
    assert_eq!(parse_leading_number(Some("-2")), None);
    assert_eq!(parse_leading_number(Some("3abc")), Some(3));
    assert_eq!(parse_leading_number(Some(" 12")), Some(12));
  }

  fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn first_occurrence_of_repeated_key_wins() {
    let params = ListParams::from_pairs(pairs(&[
      ("page", "2"),
      ("sort", "name"),
      ("page", "5"),
      ("limit", "3"),
    ]));
    assert_eq!(params.page.as_deref(), Some("2"));
    assert_eq!(params.limit.as_deref(), Some("3"));
    assert_eq!(params.page_request(), PageRequest::new(Some(2), Some(3)));
  }

  #[test]
  fn garbage_params_fall_back_to_defaults() {
    let params = ListParams { page: Some("x".into()), limit: Some("0".into()) };
    assert_eq!(params.page_request(), PageRequest::default());
  }
}
