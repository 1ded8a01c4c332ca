//! Repository layer for storage operations.
//!
//! Services talk to the traits below; `Repository` bundles one implementation
//! of each. PostgreSQL is the production backend, the in-memory store backs
//! development runs and tests.

pub mod books;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, Page, PageRequest, User},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    /// Get book by ID with its holder resolved
    async fn get_by_id(&self, id: i64) -> AppResult<Book>;

    async fn page(&self, request: PageRequest) -> AppResult<Page<Book>>;

    /// Books whose title starts with `prefix`, ignoring case
    async fn find_by_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>>;

    /// Books currently held by a user
    async fn find_by_holder(&self, user_id: i64) -> AppResult<Vec<Book>>;

    async fn count(&self) -> AppResult<i64>;

    /// Insert a new book, ignoring `book.id`
    async fn create(&self, book: &Book) -> AppResult<Book>;

    /// Overwrite every column of an existing book, holder included
    async fn update(&self, book: &Book) -> AppResult<Book>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<User>;

    /// All users ordered by name
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Case-insensitive exact match on the full name
    async fn find_by_full_name(&self, full_name: &str) -> AppResult<Option<User>>;

    /// Insert a new user, ignoring `user.id`
    async fn create(&self, user: &User) -> AppResult<User>;
}

/// Main repository struct holding one implementation per aggregate
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BooksRepository>,
    pub users: Arc<dyn UsersRepository>,
}

impl Repository {
    pub fn new(books: Arc<dyn BooksRepository>, users: Arc<dyn UsersRepository>) -> Self {
        Self { books, users }
    }

    /// Create a repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::PgBooksRepository::new(pool.clone())),
            users: Arc::new(users::PgUsersRepository::new(pool)),
        }
    }

    /// Create a repository backed by a fresh, empty in-process store
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::default();
        Self {
            books: Arc::new(store.clone()),
            users: Arc::new(store),
        }
    }
}
