//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::Author, enums::Audience, genre::Genre};

/// Book row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub publish_date: NaiveDate,
    /// Exactly one author per book
    pub author_id: i32,
    pub audience: Audience,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with its author and genre set resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
}

impl BookDetail {
    pub fn genre_ids(&self) -> Vec<i32> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

/// Validated book fields, ready to be written (create or full overwrite)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub publish_date: NaiveDate,
    pub author_id: i32,
    pub audience: Audience,
    /// Deduplicated, ascending
    pub genre_ids: Vec<i32>,
}
