//! Login, signup and logout

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, Form,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{flash, view::Page, SESSION_COOKIE};
use crate::{
    error::AppResult,
    forms::{auth::CredentialsEcho, LoginForm, SignupForm},
    AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NextQuery {
    /// Local path to return to after logging in
    pub next: Option<String>,
}

impl NextQuery {
    /// `next` when it is a local path, else the homepage
    fn target(&self) -> String {
        self.next
            .as_deref()
            .filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
            .filter(|n| n.chars().all(|c| c.is_ascii_graphic()))
            .unwrap_or("/")
            .to_string()
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginView {
    pub form: CredentialsEcho,
    pub next: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SignupView {
    pub form: CredentialsEcho,
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    params(NextQuery),
    responses((status = 200, description = "Login form", body = LoginView))
)]
pub async fn login_form(
    Query(query): Query<NextQuery>,
    jar: CookieJar,
) -> (CookieJar, Page<LoginView>) {
    let (jar, flashes) = flash::take(jar);
    let view = LoginView {
        form: CredentialsEcho::default(),
        next: query.next,
    };
    (jar, Page::new("login", view).with_flashes(flashes))
}

/// Check credentials and start a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    params(NextQuery),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, session cookie set, redirected to next"),
        (status = 422, description = "Form re-rendered with field errors", body = LoginView)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state.services.users.login(&form).await? {
        Ok(session) => {
            tracing::info!(user_id = session.user.id, "User logged in");
            let cookie = Cookie::build((SESSION_COOKIE, session.token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.config.auth.cookie_secure)
                .build();
            Ok((jar.add(cookie), Redirect::to(&query.target())).into_response())
        }
        Err(errors) => {
            let view = LoginView {
                form: form.echo(),
                next: query.next,
            };
            Ok(Page::new("login", view).with_errors(errors).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/signup",
    tag = "auth",
    responses((status = 200, description = "Signup form", body = SignupView))
)]
pub async fn signup_form() -> Page<SignupView> {
    Page::new(
        "signup",
        SignupView {
            form: CredentialsEcho::default(),
        },
    )
}

/// Create an account, then go to the login page
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirected to /login"),
        (status = 422, description = "Form re-rendered with field errors", body = SignupView)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    match state.services.users.signup(&form).await? {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(errors) => Ok(Page::new("signup", SignupView { form: form.echo() })
            .with_errors(errors)
            .into_response()),
    }
}

/// End the session
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses((status = 303, description = "Session cookie cleared, redirected to /"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Redirect::to("/"))
}
