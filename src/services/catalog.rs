//! Catalog management service

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    forms::{AuthorForm, BookForm, GenreForm, Validated},
    models::{Audience, AudienceChoice, Author, Book, BookDetail, Genre, User},
    repository::CatalogStore,
};

/// Selectable values for the book form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub audiences: Vec<AudienceChoice>,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Whether the store answers
    pub async fn store_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store ping failed");
                false
            }
        }
    }

    /// All books and all users, for the homepage
    pub async fn overview(&self) -> AppResult<(Vec<Book>, Vec<User>)> {
        let books = self.store.list_books().await?;
        let users = self.store.list_users().await?;
        Ok((books, users))
    }

    pub async fn book_choices(&self) -> AppResult<BookChoices> {
        Ok(BookChoices {
            authors: self.store.list_authors().await?,
            genres: self.store.list_genres().await?,
            audiences: Audience::choices(),
        })
    }

    /// Book with author and genres resolved
    pub async fn book_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.store.get_book(id).await?;
        let author = self.store.get_author(book.author_id).await?;
        let genres = self.store.book_genres(book.id).await?;
        Ok(BookDetail {
            book,
            author,
            genres,
        })
    }

    /// Whether `viewer` has the book in their favorites; anonymous viewers never do
    pub async fn is_favorited(&self, book_id: i32, viewer: Option<i32>) -> AppResult<bool> {
        match viewer {
            Some(user_id) => self.store.is_favorite(user_id, book_id).await,
            None => Ok(false),
        }
    }

    pub async fn create_book(&self, form: &BookForm) -> AppResult<Validated<Book>> {
        let book = match form.validate_against(self.store.as_ref()).await? {
            Ok(book) => book,
            Err(errors) => return Ok(Err(errors)),
        };
        let created = self.store.create_book(&book).await?;
        tracing::info!(book_id = created.id, title = %created.title, "Book created");
        Ok(Ok(created))
    }

    /// Overwrite all mutable fields of an existing book
    pub async fn update_book(&self, id: i32, form: &BookForm) -> AppResult<Validated<Book>> {
        self.store.get_book(id).await?;

        let book = match form.validate_against(self.store.as_ref()).await? {
            Ok(book) => book,
            Err(errors) => return Ok(Err(errors)),
        };
        let updated = self.store.update_book(id, &book).await?;
        tracing::info!(book_id = id, "Book updated");
        Ok(Ok(updated))
    }

    pub async fn create_author(&self, form: &AuthorForm) -> AppResult<Validated<Author>> {
        let author = match form.validated() {
            Ok(author) => author,
            Err(errors) => return Ok(Err(errors)),
        };
        let created = self.store.create_author(&author).await?;
        tracing::info!(author_id = created.id, "Author created");
        Ok(Ok(created))
    }

    pub async fn create_genre(&self, form: &GenreForm) -> AppResult<Validated<Genre>> {
        let genre = match form.validated() {
            Ok(genre) => genre,
            Err(errors) => return Ok(Err(errors)),
        };
        let created = self.store.create_genre(&genre).await?;
        tracing::info!(genre_id = created.id, "Genre created");
        Ok(Ok(created))
    }

    /// Add the book to the user's favorites; false if it already was one
    pub async fn favorite_book(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        self.store.get_book(book_id).await?;
        let added = self.store.add_favorite(user_id, book_id).await?;
        if added {
            tracing::info!(user_id, book_id, "Book favorited");
        }
        Ok(added)
    }

    /// Remove the book from the user's favorites; false if it was not one
    pub async fn unfavorite_book(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        self.store.get_book(book_id).await?;
        let removed = self.store.remove_favorite(user_id, book_id).await?;
        if removed {
            tracing::info!(user_id, book_id, "Book unfavorited");
        }
        Ok(removed)
    }
}
