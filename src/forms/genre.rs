//! Genre create form

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{present, FieldErrors, Validated};
use crate::models::NewGenre;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenreForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 3, max = 80, message = "Your genre name needs to be between 3 and 80 chars.")
    )]
    pub name: Option<String>,
}

impl GenreForm {
    pub fn validated(&self) -> Validated<NewGenre> {
        let normalized = Self {
            name: present(&self.name),
        };
        normalized.validate().map_err(FieldErrors::from)?;
        normalized
            .name
            .map(|name| NewGenre { name })
            .ok_or_else(FieldErrors::new)
    }
}
