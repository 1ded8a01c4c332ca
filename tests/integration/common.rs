//! Shared helpers for router tests

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use shelfmark::{
    models::{Book, User},
    repository::Repository,
    AppConfig, AppState,
};

pub struct TestApp {
    pub router: Router,
    pub repository: Repository,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Repository::in_memory();
        let router = shelfmark::api::router(AppState::new(AppConfig::default(), repository.clone()));
        Self { router, repository }
    }

    pub async fn add_book(&self, title: &str, author: &str, year: i32) -> Book {
        self.repository
            .books
            .create(&Book {
                id: None,
                title: title.to_string(),
                author: author.to_string(),
                year,
                holder: None,
            })
            .await
            .unwrap()
    }

    pub async fn add_user(&self, full_name: &str) -> User {
        self.repository
            .users
            .create(&User {
                id: 0,
                full_name: full_name.to_string(),
                year_of_birth: 1990,
            })
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, json_body(response).await)
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a 303 redirect to `to`
pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], to);
}
