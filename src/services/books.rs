//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::{Book, Page, PageRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Get one page of the catalog
    pub async fn get_page(&self, request: PageRequest) -> AppResult<Page<Book>> {
        self.repository.books.page(request).await
    }

    /// Books whose title starts with `text`, ignoring case
    pub async fn get_by_title_prefix(&self, text: &str) -> AppResult<Vec<Book>> {
        self.repository.books.find_by_title_prefix(text).await
    }

    /// Books currently held by a user
    pub async fn get_held_by(&self, user_id: i64) -> AppResult<Vec<Book>> {
        self.repository.books.find_by_holder(user_id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.books.count().await
    }

    /// Persist a book as-is: insert when it has no id, overwrite otherwise
    pub async fn save(&self, book: Book) -> AppResult<Book> {
        match book.id {
            None => {
                let created = self.repository.books.create(&book).await?;
                tracing::info!("Catalog: created book id={:?} title={:?}", created.id, created.title);
                Ok(created)
            }
            Some(_) => self.repository.books.update(&book).await,
        }
    }

    /// Update title, author and year of an existing book, keeping its holder
    pub async fn update(&self, mut book: Book) -> AppResult<Book> {
        let id = book
            .id
            .ok_or_else(|| AppError::BadRequest("Book id is required for update".to_string()))?;

        let existing = self.repository.books.get_by_id(id).await?;
        book.holder = existing.holder;

        let updated = self.repository.books.update(&book).await?;
        tracing::info!("Catalog: updated book id={}", id);
        Ok(updated)
    }

    /// Delete a book
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Catalog: deleted book id={}", id);
        Ok(())
    }

    /// Hand a book to a user, replacing any previous holder
    pub async fn assign(&self, book_id: i64, user_id: i64) -> AppResult<Book> {
        let mut book = self.repository.books.get_by_id(book_id).await?;
        let user = self.repository.users.get_by_id(user_id).await?;

        if let Some(previous) = &book.holder {
            if previous.id != user.id {
                tracing::info!(
                    "Catalog: book id={} moves from user id={} to user id={}",
                    book_id, previous.id, user.id
                );
            }
        }

        book.holder = Some(user);
        let saved = self.save(book).await?;
        tracing::info!("Catalog: assigned book id={} to user id={}", book_id, user_id);
        Ok(saved)
    }

    /// Return a book to the shelf
    pub async fn release(&self, book_id: i64) -> AppResult<Book> {
        let mut book = self.repository.books.get_by_id(book_id).await?;
        if !book.is_assigned() {
            tracing::debug!("Catalog: book id={} already on the shelf", book_id);
        }

        book.holder = None;
        let saved = self.save(book).await?;
        tracing::info!("Catalog: released book id={}", book_id);
        Ok(saved)
    }
}
