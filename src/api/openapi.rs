//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, catalog, genres, health, profile};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf",
        version = "0.1.0",
        description = "Book, author and genre catalog with per-user favorites. \
                       Pages are returned as JSON view payloads; submissions are form-encoded.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        health::health_check,
        catalog::homepage,
        catalog::create_book_form,
        catalog::create_book,
        catalog::book_detail,
        catalog::update_book,
        catalog::favorite_book,
        catalog::unfavorite_book,
        authors::create_author_form,
        authors::create_author,
        genres::create_genre_form,
        genres::create_genre,
        profile::profile,
        profile::update_profile,
        auth::login_form,
        auth::login,
        auth::signup_form,
        auth::signup,
        auth::logout,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::BookDetail,
            crate::models::Author,
            crate::models::Genre,
            crate::models::User,
            crate::models::Audience,
            crate::models::AudienceChoice,
            crate::forms::BookForm,
            crate::forms::AuthorForm,
            crate::forms::GenreForm,
            crate::forms::UserForm,
            crate::forms::LoginForm,
            crate::forms::SignupForm,
            crate::forms::auth::CredentialsEcho,
            crate::forms::FieldErrors,
            crate::services::catalog::BookChoices,
            crate::services::users::Profile,
            catalog::HomeView,
            catalog::BookFormView,
            catalog::BookDetailView,
            authors::AuthorFormView,
            genres::GenreFormView,
            profile::ProfileView,
            auth::LoginView,
            auth::SignupView,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "catalog", description = "Books, authors and genres"),
        (name = "favorites", description = "Per-user favorite books"),
        (name = "users", description = "User profiles"),
        (name = "auth", description = "Login session")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
