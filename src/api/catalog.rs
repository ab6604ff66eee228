//! Homepage, book pages and favorites

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use serde::Serialize;
use utoipa::ToSchema;

use super::{flash, view::Page, AuthenticatedUser, BookId};
use crate::{
    error::AppResult,
    forms::BookForm,
    models::{Book, BookDetail, User},
    services::catalog::BookChoices,
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HomeView {
    pub books: Vec<Book>,
    pub users: Vec<User>,
}

#[derive(Serialize, ToSchema)]
pub struct BookFormView {
    pub form: BookForm,
    pub choices: BookChoices,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailView {
    pub book: BookDetail,
    pub form: BookForm,
    pub choices: BookChoices,
    /// Whether the current viewer has this book in their favorites
    pub favorited: bool,
}

/// List every book and every user
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "Homepage", body = HomeView)
    )
)]
pub async fn homepage(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Page<HomeView>)> {
    let (books, users) = state.services.catalog.overview().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Page::new("home", HomeView { books, users }).with_flashes(flashes)))
}

/// Empty book creation form
#[utoipa::path(
    get,
    path = "/create_book",
    tag = "catalog",
    responses(
        (status = 200, description = "Book form", body = BookFormView),
        (status = 303, description = "Not logged in, redirected to /login")
    )
)]
pub async fn create_book_form(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Page<BookFormView>)> {
    let choices = state.services.catalog.book_choices().await?;
    let (jar, flashes) = flash::take(jar);
    let page = Page::new(
        "create_book",
        BookFormView {
            form: BookForm::default(),
            choices,
        },
    );
    Ok((jar, page.with_flashes(flashes)))
}

/// Create a book, then redirect to its page
#[utoipa::path(
    post,
    path = "/create_book",
    tag = "catalog",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirected to /book/{id}; or not logged in"),
        (status = 422, description = "Form re-rendered with field errors", body = BookFormView)
    )
)]
pub async fn create_book(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book(&form).await? {
        Ok(book) => {
            let jar = flash::push(jar, "New book was created successfully.");
            Ok((jar, Redirect::to(&format!("/book/{}", book.id))).into_response())
        }
        Err(errors) => {
            let choices = state.services.catalog.book_choices().await?;
            let page = Page::new("create_book", BookFormView { form, choices }).with_errors(errors);
            Ok(page.into_response())
        }
    }
}

/// Show a book with its edit form pre-populated
#[utoipa::path(
    get,
    path = "/book/{book_id}",
    tag = "catalog",
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book page", body = BookDetailView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_detail(
    State(state): State<AppState>,
    BookId(book_id): BookId,
    viewer: Option<AuthenticatedUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Page<BookDetailView>)> {
    let catalog = &state.services.catalog;
    let book = catalog.book_detail(book_id).await?;
    let favorited = catalog
        .is_favorited(book_id, viewer.map(|AuthenticatedUser(claims)| claims.user_id))
        .await?;
    let view = BookDetailView {
        form: BookForm::from_detail(&book),
        choices: catalog.book_choices().await?,
        book,
        favorited,
    };
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Page::new("book_detail", view).with_flashes(flashes)))
}

/// Overwrite a book's fields
#[utoipa::path(
    post,
    path = "/book/{book_id}",
    tag = "catalog",
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirected to /book/{book_id}"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Form re-rendered with field errors", body = BookDetailView)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookId(book_id): BookId,
    viewer: Option<AuthenticatedUser>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let catalog = &state.services.catalog;
    match catalog.update_book(book_id, &form).await? {
        Ok(_) => {
            let jar = flash::push(jar, "Book updated successfully.");
            Ok((jar, Redirect::to(&format!("/book/{}", book_id))).into_response())
        }
        Err(errors) => {
            let book = catalog.book_detail(book_id).await?;
            let favorited = catalog
                .is_favorited(book_id, viewer.map(|AuthenticatedUser(claims)| claims.user_id))
                .await?;
            let view = BookDetailView {
                book,
                form,
                choices: catalog.book_choices().await?,
                favorited,
            };
            Ok(Page::new("book_detail", view).with_errors(errors).into_response())
        }
    }
}

/// Add a book to the current user's favorites (no-op if already there)
#[utoipa::path(
    post,
    path = "/favorite/{book_id}",
    tag = "favorites",
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirected to /book/{book_id}, or to /login"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn favorite_book(
    AuthenticatedUser(claims): AuthenticatedUser,
    State(state): State<AppState>,
    BookId(book_id): BookId,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let added = state
        .services
        .catalog
        .favorite_book(claims.user_id, book_id)
        .await?;
    let jar = if added {
        flash::push(jar, "Book added to favorites successfully.")
    } else {
        jar
    };
    Ok((jar, Redirect::to(&format!("/book/{}", book_id))))
}

/// Remove a book from the current user's favorites (no-op if absent)
#[utoipa::path(
    post,
    path = "/unfavorite/{book_id}",
    tag = "favorites",
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirected to /book/{book_id}, or to /login"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn unfavorite_book(
    AuthenticatedUser(claims): AuthenticatedUser,
    State(state): State<AppState>,
    BookId(book_id): BookId,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let removed = state
        .services
        .catalog
        .unfavorite_book(claims.user_id, book_id)
        .await?;
    let jar = if removed {
        flash::push(jar, "Book removed from favorites successfully.")
    } else {
        jar
    };
    Ok((jar, Redirect::to(&format!("/book/{}", book_id))))
}
