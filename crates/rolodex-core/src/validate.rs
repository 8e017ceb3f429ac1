//! Field presence checks and normalisation shared by the create and update
//! paths.

use serde::Deserialize;

use crate::{Error, Result, contact::ContactFields};

/// Unvalidated contact input, exactly as a caller supplied it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactDraft {
  pub name:  Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
}

impl ContactDraft {
  /// Check that every field is present and non-blank, then normalise.
  ///
  /// All three fields are inspected before failing so the error names every
  /// missing one, in declaration order.
  pub fn into_fields(self) -> Result<ContactFields> {
    let name = present(self.name);
    let email = present(self.email);
    let phone = present(self.phone);

    match (name, email, phone) {
      (Some(name), Some(email), Some(phone)) => Ok(ContactFields {
        name,
        email: email.to_lowercase(),
        phone,
      }),
      (name, email, phone) => {
        let missing = [("name", name), ("email", email), ("phone", phone)]
          .into_iter()
          .filter(|(_, v)| v.is_none())
          .map(|(field, _)| field)
          .collect();
        Err(Error::MissingFields(missing))
      }
    }
  }
}

/// The trimmed value, or `None` if absent or blank.
fn present(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> ContactDraft {
    ContactDraft {
      name:  name.map(Into::into),
      email: email.map(Into::into),
      phone: phone.map(Into::into),
    }
  }

  #[test]
  fn normalises_all_fields() {
    let fields = draft(Some("  Ada Lovelace "), Some(" Ada@Example.COM "), Some(" 555-0100\t"))
      .into_fields()
      .unwrap();
    assert_eq!(fields.name, "Ada Lovelace");
    assert_eq!(fields.email, "ada@example.com");
    assert_eq!(fields.phone, "555-0100");
  }

  #[test]
  fn reports_every_missing_field() {
    let err = draft(None, Some("a@b.c"), Some("   ")).into_fields().unwrap_err();
    match err {
      Error::MissingFields(fields) => assert_eq!(fields, vec!["name", "phone"]),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn empty_string_counts_as_missing() {
    let err = draft(Some("Ada"), Some(""), Some("555")).into_fields().unwrap_err();
    assert!(matches!(err, Error::MissingFields(f) if f == vec!["email"]));
  }

  #[test]
  fn deserialises_partial_body() {
    let d: ContactDraft = serde_json::from_str(r#"{"email":"x@y.z"}"#).unwrap();
    assert!(d.name.is_none());
    assert_eq!(d.email.as_deref(), Some("x@y.z"));
  }

  #[test]
  fn non_string_phone_is_rejected() {
    let res = serde_json::from_str::<ContactDraft>(
      r#"{"name":"Ada","email":"a@b.c","phone":9876500000}"#,
    );
    assert!(res.is_err());
  }
}
