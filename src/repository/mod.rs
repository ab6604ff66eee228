//! Repository layer for database operations
//!
//! Handlers and services only see the store traits; [`Repository`] is the
//! PostgreSQL implementation.

pub mod authors;
pub mod books;
pub mod genres;
pub mod users;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, Genre, NewAuthor, NewBook, NewGenre, NewUser, ProfileUpdate, User},
};

/// Existence checks for selectable references
///
/// Each method returns the subset of `ids` that exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    async fn existing_author_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>>;
    async fn existing_genre_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>>;
    async fn existing_book_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>>;
    /// Round-trip to the backing store
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: i32) -> AppResult<Book>;
    /// Insert the book and its genre links in one transaction
    async fn create_book(&self, book: &NewBook) -> AppResult<Book>;
    /// Overwrite every mutable field and replace the genre set
    async fn update_book(&self, id: i32, book: &NewBook) -> AppResult<Book>;
    async fn book_genres(&self, book_id: i32) -> AppResult<Vec<Genre>>;
}

#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: i32) -> AppResult<Author>;
    async fn create_author(&self, author: &NewAuthor) -> AppResult<Author>;
}

#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn create_genre(&self, genre: &NewGenre) -> AppResult<Genre>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> AppResult<Vec<User>>;
    async fn get_user(&self, id: i32) -> AppResult<User>;
    /// Exact-match lookup; returns every matching row
    async fn find_users_by_username(&self, username: &str) -> AppResult<Vec<User>>;
    async fn username_exists(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool>;
    async fn create_user(&self, user: &NewUser) -> AppResult<User>;
    /// Rename and replace the favorites set in one transaction
    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> AppResult<User>;
    async fn favorite_books(&self, user_id: i32) -> AppResult<Vec<Book>>;
    async fn is_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool>;
    /// Returns false when the pair was already present
    async fn add_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool>;
    /// Returns false when the pair was absent
    async fn remove_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool>;
}

/// Everything the catalog needs from persistence
pub trait CatalogStore: BookStore + AuthorStore + GenreStore + UserStore + ReferenceLookup {}

impl<T> CatalogStore for T where T: BookStore + AuthorStore + GenreStore + UserStore + ReferenceLookup {}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn existing_ids(&self, table: &str, ids: &[i32]) -> AppResult<Vec<i32>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT id FROM {} WHERE id = ANY($1) ORDER BY id", table);
        let found = sqlx::query_scalar::<_, i32>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(found)
    }
}

#[async_trait]
impl ReferenceLookup for Repository {
    async fn existing_author_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        self.existing_ids("authors", ids).await
    }

    async fn existing_genre_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        self.existing_ids("genres", ids).await
    }

    async fn existing_book_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        self.existing_ids("books", ids).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
