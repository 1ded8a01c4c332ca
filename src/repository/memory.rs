//! In-process store implementing both repositories.
//!
//! Books keep only the holder id, like the `holder_id` column, and resolve
//! the holder on every read.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BooksRepository, UsersRepository};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookSort, Page, PageRequest, User},
};

#[derive(Debug, Clone)]
struct StoredBook {
    title: String,
    author: String,
    year: i32,
    holder_id: Option<i64>,
}

#[derive(Debug, Default)]
struct State {
    books: BTreeMap<i64, StoredBook>,
    users: BTreeMap<i64, User>,
    last_book_id: i64,
    last_user_id: i64,
}

impl State {
    fn resolve(&self, id: i64, stored: &StoredBook) -> Book {
        Book {
            id: Some(id),
            title: stored.title.clone(),
            author: stored.author.clone(),
            year: stored.year,
            holder: stored.holder_id.and_then(|uid| self.users.get(&uid).cloned()),
        }
    }

    fn book(&self, id: i64) -> AppResult<Book> {
        self.books
            .get(&id)
            .map(|stored| self.resolve(id, stored))
            .ok_or_else(|| AppError::BookNotFound(format!("Book with id {} not found", id)))
    }

    /// Mirrors the foreign key on `books.holder_id`
    fn stored(&self, book: &Book) -> AppResult<StoredBook> {
        let holder_id = match &book.holder {
            Some(user) if !self.users.contains_key(&user.id) => {
                return Err(AppError::UserNotFound(format!(
                    "User with id {} not found",
                    user.id
                )));
            }
            Some(user) => Some(user.id),
            None => None,
        };

        Ok(StoredBook {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            holder_id,
        })
    }

    fn resolve_all<'a, I>(&self, entries: I) -> Vec<Book>
    where
        I: Iterator<Item = (&'a i64, &'a StoredBook)>,
    {
        entries.map(|(id, stored)| self.resolve(*id, stored)).collect()
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_title(a: &Book, b: &Book) -> std::cmp::Ordering {
    a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl BooksRepository for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.state.read().await.book(id)
    }

    async fn page(&self, request: PageRequest) -> AppResult<Page<Book>> {
        let state = self.state.read().await;

        let mut books = state.resolve_all(state.books.iter());
        if request.sort() == BookSort::YearAsc {
            // stable, so equal years keep id order
            books.sort_by_key(|b| b.year);
        }

        let total = books.len() as i64;
        let content = books
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size()).unwrap_or(usize::MAX))
            .collect();

        Ok(Page::new(content, &request, total))
    }

    async fn find_by_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        let prefix = prefix.to_lowercase();
        let state = self.state.read().await;

        let mut books = state.resolve_all(
            state
                .books
                .iter()
                .filter(|(_, b)| b.title.to_lowercase().starts_with(&prefix)),
        );
        books.sort_by(by_title);
        Ok(books)
    }

    async fn find_by_holder(&self, user_id: i64) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;

        let mut books = state.resolve_all(
            state
                .books
                .iter()
                .filter(|(_, b)| b.holder_id == Some(user_id)),
        );
        books.sort_by(by_title);
        Ok(books)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.state.read().await.books.len() as i64)
    }

    async fn create(&self, book: &Book) -> AppResult<Book> {
        let mut state = self.state.write().await;

        let stored = state.stored(book)?;
        state.last_book_id += 1;
        let id = state.last_book_id;
        state.books.insert(id, stored);

        state.book(id)
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        let id = book
            .id
            .ok_or_else(|| AppError::Internal("Cannot update a book without id".to_string()))?;

        let mut state = self.state.write().await;
        if !state.books.contains_key(&id) {
            return Err(AppError::BookNotFound(format!("Book with id {} not found", id)));
        }

        let stored = state.stored(book)?;
        state.books.insert(id, stored);

        state.book(id)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.state
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::BookNotFound(format!("Book with id {} not found", id)))
    }
}

#[async_trait]
impl UsersRepository for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.state
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::UserNotFound(format!("User with id {} not found", id)))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.state.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn find_by_full_name(&self, full_name: &str) -> AppResult<Option<User>> {
        let wanted = full_name.to_lowercase();
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.full_name.to_lowercase() == wanted)
            .cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut state = self.state.write().await;

        // Mirrors the unique index on LOWER(users.full_name)
        let wanted = user.full_name.to_lowercase();
        if state.users.values().any(|u| u.full_name.to_lowercase() == wanted) {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                user.full_name
            )));
        }

        state.last_user_id += 1;
        let created = User {
            id: state.last_user_id,
            ..user.clone()
        };
        state.users.insert(created.id, created.clone());

        Ok(created)
    }
}
