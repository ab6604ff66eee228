//! HTTP handlers for the Bookshelf catalog

pub mod auth;
pub mod authors;
pub mod catalog;
pub mod flash;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod profile;
pub mod view;


use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tower_http::trace::TraceLayer;

use crate::{error::AppError, models::UserClaims, AppState};

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::homepage))
        .route(
            "/create_book",
            get(catalog::create_book_form).post(catalog::create_book),
        )
        .route(
            "/create_author",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route(
            "/create_genre",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route(
            "/book/:book_id",
            get(catalog::book_detail).post(catalog::update_book),
        )
        .route(
            "/profile/:username",
            get(profile::profile).post(profile::update_profile),
        )
        .route("/favorite/:book_id", post(catalog::favorite_book))
        .route("/unfavorite/:book_id", post(catalog::unfavorite_book))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/health", get(health::health_check))
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}

/// `:book_id` path segment; a non-numeric id is a missing book
pub struct BookId(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BookId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;
        raw.parse()
            .map(BookId)
            .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
    }
}

/// Extractor for the logged-in user, from the session cookie or a Bearer token
///
/// Rejects with a redirect to the login page, before the body is read.
/// Use `Option<AuthenticatedUser>` where anonymous access is allowed.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = bearer.or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
        });

        token
            .and_then(|t| UserClaims::from_token(&t, &state.config.auth.jwt_secret).ok())
            .map(AuthenticatedUser)
            .ok_or_else(|| LoginRedirect::after(parts.uri.path()))
    }
}

/// Redirect to the login page, returning to `next` afterwards
#[derive(Debug)]
pub struct LoginRedirect {
    next: String,
}

impl LoginRedirect {
    pub fn after(next: &str) -> Self {
        Self {
            next: next.to_string(),
        }
    }
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        tracing::debug!(next = %self.next, "Unauthenticated request redirected to login");
        Redirect::to(&format!("/login?next={}", urlencoding::encode(&self.next))).into_response()
    }
}
