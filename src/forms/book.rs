//! Book create/edit form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{all_exist, parse_ids, present, FieldErrors, Validated, INVALID_CHOICE, INVALID_DATE};
use crate::{
    error::AppResult,
    models::{Audience, BookDetail, NewBook},
    repository::ReferenceLookup,
};

/// Submitted book fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 3, max = 80, message = "Field must be between 3 and 80 characters long.")
    )]
    pub title: Option<String>,
    /// `YYYY-MM-DD`
    pub publish_date: Option<String>,
    /// Author id
    pub author: Option<String>,
    /// One of the audience identifiers
    pub audience: Option<String>,
    /// Genre ids (may be empty)
    #[serde(default)]
    pub genres: Vec<String>,
}

impl BookForm {
    /// Form pre-populated with a stored book
    pub fn from_detail(detail: &BookDetail) -> Self {
        Self {
            title: Some(detail.book.title.clone()),
            publish_date: Some(detail.book.publish_date.format("%Y-%m-%d").to_string()),
            author: Some(detail.book.author_id.to_string()),
            audience: Some(detail.book.audience.as_str().to_string()),
            genres: detail.genres.iter().map(|g| g.id.to_string()).collect(),
        }
    }

    /// Check every field, resolving author and genre selections through `lookup`
    pub async fn validate_against<L>(&self, lookup: &L) -> AppResult<Validated<NewBook>>
    where
        L: ReferenceLookup + ?Sized,
    {
        let normalized = Self {
            title: present(&self.title),
            ..self.clone()
        };
        let mut errors = match normalized.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let publish_date = present(&self.publish_date)
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
        if publish_date.is_none() {
            errors.add("publish_date", INVALID_DATE);
        }

        let audience = self.audience.as_deref().and_then(Audience::from_identifier);
        if audience.is_none() {
            errors.add("audience", INVALID_CHOICE);
        }

        let mut author_id = present(&self.author).and_then(|a| a.trim().parse::<i32>().ok());
        if let Some(id) = author_id {
            let found = lookup.existing_author_ids(&[id]).await?;
            if !all_exist(&[id], &found) {
                author_id = None;
            }
        }
        if author_id.is_none() {
            errors.add("author", INVALID_CHOICE);
        }

        let mut genre_ids = parse_ids(&self.genres);
        if let Some(ids) = genre_ids.as_ref().filter(|ids| !ids.is_empty()) {
            let found = lookup.existing_genre_ids(ids).await?;
            if !all_exist(ids, &found) {
                genre_ids = None;
            }
        }
        if genre_ids.is_none() {
            errors.add("genres", INVALID_CHOICE);
        }

        match (normalized.title, publish_date, author_id, audience, genre_ids) {
            (Some(title), Some(publish_date), Some(author_id), Some(audience), Some(genre_ids))
                if errors.is_empty() =>
            {
                Ok(Ok(NewBook {
                    title,
                    publish_date,
                    author_id,
                    audience,
                    genre_ids,
                }))
            }
            _ => Ok(Err(errors)),
        }
    }
}
