//! Shelfmark Library Catalog
//!
//! Backend for the staff pages of a small library: search, paginate,
//! create, edit, lend, release and delete books, and register readers.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
