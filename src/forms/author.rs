//! Author create form

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{present, FieldErrors, Validated};
use crate::models::NewAuthor;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 80, message = "Your author name needs to be between 1 and 80 chars.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 3, max = 240, message = "Your author biography needs to be between 3 and 240 chars.")
    )]
    pub biography: Option<String>,
}

impl AuthorForm {
    pub fn validated(&self) -> Validated<NewAuthor> {
        let normalized = Self {
            name: present(&self.name),
            biography: present(&self.biography),
        };
        if let Err(e) = normalized.validate() {
            return Err(FieldErrors::from(e));
        }
        match (normalized.name, normalized.biography) {
            (Some(name), Some(biography)) => Ok(NewAuthor { name, biography }),
            _ => Err(FieldErrors::new()),
        }
    }
}
