//! In-memory store used by router tests

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{AuthorStore, BookStore, GenreStore, ReferenceLookup, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Genre, NewAuthor, NewBook, NewGenre, NewUser, ProfileUpdate, User},
};

#[derive(Default)]
struct Tables {
    authors: Vec<Author>,
    genres: Vec<Genre>,
    books: Vec<Book>,
    users: Vec<User>,
    book_genres: BTreeSet<(i32, i32)>,
    favorites: BTreeSet<(i32, i32)>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    /// Make `ping` fail
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Insert a user without the uniqueness check, to seed duplicate usernames
    pub fn insert_user_unchecked(&self, username: &str) -> User {
        let mut t = self.lock();
        let user = User {
            id: t.next_id(),
            username: username.to_string(),
            password_hash: "unused".to_string(),
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        user
    }

    pub fn author_count(&self) -> usize {
        self.lock().authors.len()
    }

    pub fn book_count(&self) -> usize {
        self.lock().books.len()
    }

    pub fn favorite_count(&self, user_id: i32) -> usize {
        self.lock().favorites.iter().filter(|(u, _)| *u == user_id).count()
    }
}

fn subset(ids: &[i32], existing: impl Iterator<Item = i32>) -> Vec<i32> {
    let existing: BTreeSet<i32> = existing.collect();
    ids.iter().copied().filter(|id| existing.contains(id)).collect()
}

#[async_trait]
impl ReferenceLookup for MemoryStore {
    async fn existing_author_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        Ok(subset(ids, self.lock().authors.iter().map(|a| a.id)))
    }

    async fn existing_genre_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        Ok(subset(ids, self.lock().genres.iter().map(|g| g.id)))
    }

    async fn existing_book_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        Ok(subset(ids, self.lock().books.iter().map(|b| b.id)))
    }

    async fn ping(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Internal("memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.lock().books.clone())
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.lock()
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create_book(&self, book: &NewBook) -> AppResult<Book> {
        let mut t = self.lock();
        let now = Utc::now();
        let created = Book {
            id: t.next_id(),
            title: book.title.clone(),
            publish_date: book.publish_date,
            author_id: book.author_id,
            audience: book.audience,
            created_at: now,
            updated_at: now,
        };
        for genre_id in &book.genre_ids {
            t.book_genres.insert((created.id, *genre_id));
        }
        t.books.push(created.clone());
        Ok(created)
    }

    async fn update_book(&self, id: i32, book: &NewBook) -> AppResult<Book> {
        let mut t = self.lock();
        let stored = t
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        stored.title = book.title.clone();
        stored.publish_date = book.publish_date;
        stored.author_id = book.author_id;
        stored.audience = book.audience;
        stored.updated_at = Utc::now();
        let updated = stored.clone();
        t.book_genres.retain(|(b, _)| *b != id);
        for genre_id in &book.genre_ids {
            t.book_genres.insert((id, *genre_id));
        }
        Ok(updated)
    }

    async fn book_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let t = self.lock();
        Ok(t.genres
            .iter()
            .filter(|g| t.book_genres.contains(&(book_id, g.id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        Ok(self.lock().authors.clone())
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.lock()
            .authors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn create_author(&self, author: &NewAuthor) -> AppResult<Author> {
        let mut t = self.lock();
        let created = Author {
            id: t.next_id(),
            name: author.name.clone(),
            biography: author.biography.clone(),
            created_at: Utc::now(),
        };
        t.authors.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.lock().genres.clone())
    }

    async fn create_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        let mut t = self.lock();
        let created = Genre {
            id: t.next_id(),
            name: genre.name.clone(),
            created_at: Utc::now(),
        };
        t.genres.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.lock().users.clone())
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.lock()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    async fn find_users_by_username(&self, username: &str) -> AppResult<Vec<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|u| u.username == username)
            .cloned()
            .collect())
    }

    async fn username_exists(&self, username: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|u| u.username == username && Some(u.id) != exclude_id))
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<User> {
        let mut t = self.lock();
        if t.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("username already exists".into()));
        }
        let created = User {
            id: t.next_id(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        t.users.push(created.clone());
        Ok(created)
    }

    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> AppResult<User> {
        let mut t = self.lock();
        let stored = t
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;
        stored.username = update.username.clone();
        let updated = stored.clone();
        t.favorites.retain(|(u, _)| *u != user_id);
        for book_id in &update.favorite_book_ids {
            t.favorites.insert((user_id, *book_id));
        }
        Ok(updated)
    }

    async fn favorite_books(&self, user_id: i32) -> AppResult<Vec<Book>> {
        let t = self.lock();
        Ok(t.books
            .iter()
            .filter(|b| t.favorites.contains(&(user_id, b.id)))
            .cloned()
            .collect())
    }

    async fn is_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        Ok(self.lock().favorites.contains(&(user_id, book_id)))
    }

    async fn add_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        Ok(self.lock().favorites.insert((user_id, book_id)))
    }

    async fn remove_favorite(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        Ok(self.lock().favorites.remove(&(user_id, book_id)))
    }
}
