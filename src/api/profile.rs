//! User profile pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use serde::Serialize;
use utoipa::ToSchema;

use super::{flash, view::Page};
use crate::{error::AppResult, forms::UserForm, services::users::Profile, AppState};

#[derive(Serialize, ToSchema)]
pub struct ProfileView {
    pub profile: Profile,
    pub form: UserForm,
}

/// Show a user's profile with the edit form pre-populated
#[utoipa::path(
    get,
    path = "/profile/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "Profile page", body = ProfileView),
        (status = 404, description = "No such user")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Page<ProfileView>)> {
    let profile = state.services.users.profile(&username).await?;
    let form = UserForm::from_user(&profile.user, &profile.favorites);
    let (jar, flashes) = flash::take(jar);
    Ok((
        jar,
        Page::new("profile", ProfileView { profile, form }).with_flashes(flashes),
    ))
}

/// Update username and favorites
#[utoipa::path(
    post,
    path = "/profile/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Exact username")),
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirected to /profile/{new username}"),
        (status = 404, description = "No such user"),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Form re-rendered with field errors", body = ProfileView)
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: CookieJar,
    Form(form): Form<UserForm>,
) -> AppResult<Response> {
    let users = &state.services.users;
    match users.update_profile(&username, &form).await? {
        Ok(user) => {
            let jar = flash::push(jar, "User updated successfully.");
            let location = format!("/profile/{}", urlencoding::encode(&user.username));
            Ok((jar, Redirect::to(&location)).into_response())
        }
        Err(errors) => {
            let profile = users.profile(&username).await?;
            Ok(Page::new("profile", ProfileView { profile, form })
                .with_errors(errors)
                .into_response())
        }
    }
}
