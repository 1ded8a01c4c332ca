//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.1.0",
        description = "Library catalog pages. Page routes answer with {view, model} JSON; form posts redirect with 303."
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::search,
        books::list_books,
        books::get_book,
        books::show_create_form,
        books::create_book,
        books::assign_user,
        books::edit_book,
        books::show_edit_form,
        books::delete_book,
        books::release_book,
        // Users
        users::list_users,
        users::get_user,
        users::show_create_form,
        users::create_user,
    ),
    components(
        schemas(
            // Books
            crate::models::BookDto,
            crate::models::AssignForm,
            books::SearchView,
            books::BooksView,
            books::BookInfoView,
            books::BookFormView,
            // Users
            crate::models::UserDto,
            users::UsersView,
            users::UserInfoView,
            users::UserFormView,
            // Health
            health::HealthResponse,
            // Errors
            crate::validation::FieldError,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "users", description = "Readers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
