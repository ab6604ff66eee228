//! Form validation for submitted catalog data
//!
//! Each form holds the raw submitted strings. Validation either yields a
//! typed record ready for the repository or a [`FieldErrors`] map with one
//! message per failing field, which the handler renders back inline.

pub mod auth;
pub mod author;
pub mod book;
pub mod genre;
pub mod user;

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

pub use auth::{LoginForm, SignupForm};
pub use author::AuthorForm;
pub use book::BookForm;
pub use genre::GenreForm;
pub use user::UserForm;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const INVALID_DATE: &str = "Not a valid date value.";

/// Outcome of validating a form
pub type Validated<T> = Result<T, FieldErrors>;

/// Field name to error message, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already failed
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(value)` when nothing failed
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Validated<T> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

/// Submitted value, or `None` when absent or blank
///
/// Blank values fail the required check before any length rule runs.
pub(crate) fn present(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .cloned()
}

/// Parse submitted ids, deduplicated and sorted; `None` if any is malformed
pub(crate) fn parse_ids(values: &[String]) -> Option<Vec<i32>> {
    let mut ids = values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().parse::<i32>().ok())
        .collect::<Option<Vec<_>>>()?;
    ids.sort_unstable();
    ids.dedup();
    Some(ids)
}

/// True when every requested id was found
pub(crate) fn all_exist(requested: &[i32], found: &[i32]) -> bool {
    requested.iter().all(|id| found.contains(id))
}
