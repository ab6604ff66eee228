//! Author creation pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use serde::Serialize;
use utoipa::ToSchema;

use super::{flash, view::Page, AuthenticatedUser};
use crate::{error::AppResult, forms::AuthorForm, AppState};

#[derive(Serialize, ToSchema)]
pub struct AuthorFormView {
    pub form: AuthorForm,
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/create_author",
    tag = "catalog",
    responses(
        (status = 200, description = "Author form", body = AuthorFormView),
        (status = 303, description = "Not logged in, redirected to /login")
    )
)]
pub async fn create_author_form(
    _user: AuthenticatedUser,
    jar: CookieJar,
) -> (CookieJar, Page<AuthorFormView>) {
    let (jar, flashes) = flash::take(jar);
    let page = Page::new(
        "create_author",
        AuthorFormView {
            form: AuthorForm::default(),
        },
    );
    (jar, page.with_flashes(flashes))
}

/// Create an author, then return to the homepage
#[utoipa::path(
    post,
    path = "/create_author",
    tag = "catalog",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirected to /; or not logged in"),
        (status = 422, description = "Form re-rendered with field errors", body = AuthorFormView)
    )
)]
pub async fn create_author(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_author(&form).await? {
        Ok(_) => {
            let jar = flash::push(jar, "New Author was created successfully.");
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(errors) => Ok(Page::new("create_author", AuthorFormView { form })
            .with_errors(errors)
            .into_response()),
    }
}
