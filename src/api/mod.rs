//! HTTP handlers for Shelfmark pages.
//!
//! Page handlers return a [`View`]: the template name plus the model a
//! template layer renders. Form posts either redirect or re-render their
//! form with field errors.

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::AppState;

/// A rendered page: template name and its model
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub view: &'static str,
    pub model: T,
}

impl<T> View<T> {
    pub fn new(view: &'static str, model: T) -> Self {
        Self { view, model }
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Result of a form submission
#[derive(Debug)]
pub enum FormOutcome<T> {
    /// Accepted, continue at this path
    Redirect(&'static str),
    /// Rejected, show the form again
    Invalid(View<T>),
}

impl<T: Serialize> IntoResponse for FormOutcome<T> {
    fn into_response(self) -> Response {
        match self {
            FormOutcome::Redirect(to) => Redirect::to(to).into_response(),
            FormOutcome::Invalid(view) => (StatusCode::UNPROCESSABLE_ENTITY, view).into_response(),
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let pages = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/search", get(books::search))
        .route("/books/new", get(books::show_create_form).post(books::create_book))
        .route("/books/edit/:id", get(books::show_edit_form).post(books::edit_book))
        .route("/books/:id", get(books::get_book).post(books::delete_book))
        .route("/books/:id/assign", post(books::assign_user))
        .route("/books/:id/release", post(books::release_book))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/new", get(users::show_create_form).post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .with_state(state);

    Router::new()
        .merge(pages)
        .merge(openapi::create_openapi_router())
}
