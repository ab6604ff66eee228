//! Genre creation pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use serde::Serialize;
use utoipa::ToSchema;

use super::{flash, view::Page, AuthenticatedUser};
use crate::{error::AppResult, forms::GenreForm, AppState};

#[derive(Serialize, ToSchema)]
pub struct GenreFormView {
    pub form: GenreForm,
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/create_genre",
    tag = "catalog",
    responses(
        (status = 200, description = "Genre form", body = GenreFormView),
        (status = 303, description = "Not logged in, redirected to /login")
    )
)]
pub async fn create_genre_form(
    _user: AuthenticatedUser,
    jar: CookieJar,
) -> (CookieJar, Page<GenreFormView>) {
    let (jar, flashes) = flash::take(jar);
    let page = Page::new(
        "create_genre",
        GenreFormView {
            form: GenreForm::default(),
        },
    );
    (jar, page.with_flashes(flashes))
}

/// Create a genre, then return to the homepage
#[utoipa::path(
    post,
    path = "/create_genre",
    tag = "catalog",
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirected to /; or not logged in"),
        (status = 422, description = "Form re-rendered with field errors", body = GenreFormView)
    )
)]
pub async fn create_genre(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_genre(&form).await? {
        Ok(_) => {
            let jar = flash::push(jar, "New genre was created successfully.");
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(errors) => Ok(Page::new("create_genre", GenreFormView { form })
            .with_errors(errors)
            .into_response()),
    }
}
