//! User profiles, signup and login

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    forms::{
        auth::{UNKNOWN_USERNAME, USERNAME_TAKEN, WRONG_PASSWORD},
        FieldErrors, LoginForm, SignupForm, UserForm, Validated,
    },
    models::{Book, NewUser, User, UserClaims},
    repository::CatalogStore,
};

/// A user with their favorites and the books they can choose from
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Profile {
    pub user: User,
    pub favorites: Vec<Book>,
    pub books: Vec<Book>,
}

/// Successful login: the user and their signed session token
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn CatalogStore>,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(store: Arc<dyn CatalogStore>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Resolve a username that must match exactly one user
    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        let mut matches = self.store.find_users_by_username(username).await?;
        match matches.len() {
            0 => Err(AppError::NotFound(format!("User {} not found", username))),
            1 => Ok(matches.remove(0)),
            n => Err(AppError::Internal(format!(
                "{} users share the username {}",
                n, username
            ))),
        }
    }

    pub async fn profile(&self, username: &str) -> AppResult<Profile> {
        let user = self.get_by_username(username).await?;
        let favorites = self.store.favorite_books(user.id).await?;
        let books = self.store.list_books().await?;
        Ok(Profile {
            user,
            favorites,
            books,
        })
    }

    /// Rename the user and replace their favorites
    pub async fn update_profile(&self, username: &str, form: &UserForm) -> AppResult<Validated<User>> {
        let user = self.get_by_username(username).await?;

        let update = match form.validate_against(self.store.as_ref()).await? {
            Ok(update) => update,
            Err(errors) => return Ok(Err(errors)),
        };

        if update.username != user.username
            && self.store.username_exists(&update.username, Some(user.id)).await?
        {
            return Err(AppError::Conflict(format!(
                "Username {} is already taken",
                update.username
            )));
        }

        let updated = self.store.update_profile(user.id, &update).await?;
        tracing::info!(user_id = updated.id, "Profile updated");
        Ok(Ok(updated))
    }

    pub async fn signup(&self, form: &SignupForm) -> AppResult<Validated<User>> {
        let creds = match form.validated() {
            Ok(creds) => creds,
            Err(errors) => return Ok(Err(errors)),
        };

        if self.store.username_exists(&creds.username, None).await? {
            let mut errors = FieldErrors::new();
            errors.add("username", USERNAME_TAKEN);
            return Ok(Err(errors));
        }

        let user = self
            .store
            .create_user(&NewUser {
                username: creds.username,
                password_hash: self.hash_password(&creds.password)?,
            })
            .await?;
        tracing::info!(user_id = user.id, "User signed up");
        Ok(Ok(user))
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, form: &LoginForm) -> AppResult<Validated<Session>> {
        let creds = match form.validated() {
            Ok(creds) => creds,
            Err(errors) => return Ok(Err(errors)),
        };

        let mut errors = FieldErrors::new();
        let user = match self.get_by_username(&creds.username).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                errors.add("username", UNKNOWN_USERNAME);
                return Ok(Err(errors));
            }
            Err(e) => return Err(e),
        };

        if !self.verify_password(&user, &creds.password)? {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            errors.add("password", WRONG_PASSWORD);
            return Ok(Err(errors));
        }

        let token = self.create_token(&user)?;
        Ok(Ok(Session { user, token }))
    }

    /// Signed session token for a user
    pub fn create_token(&self, user: &User) -> AppResult<String> {
        UserClaims::for_user(user, self.config.session_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
