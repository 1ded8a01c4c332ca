//! Books repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres};

use super::BooksRepository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookSort, Page, PageRequest, User},
};

const SELECT_BOOK: &str = r#"
    SELECT b.id, b.title, b.author, b.year,
           u.id AS holder_id,
           u.full_name AS holder_full_name,
           u.year_of_birth AS holder_year_of_birth
    FROM books b
    LEFT JOIN users u ON u.id = b.holder_id
"#;

/// Escape `LIKE` wildcards so user input matches literally
pub fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    year: i32,
    holder_id: Option<i64>,
    holder_full_name: Option<String>,
    holder_year_of_birth: Option<i32>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let holder = match (row.holder_id, row.holder_full_name, row.holder_year_of_birth) {
            (Some(id), Some(full_name), Some(year_of_birth)) => Some(User {
                id,
                full_name,
                year_of_birth,
            }),
            _ => None,
        };

        Book {
            id: Some(row.id),
            title: row.title,
            author: row.author,
            year: row.year,
            holder,
        }
    }
}

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, BookRow>(&format!("{} WHERE b.id = $1", SELECT_BOOK))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Book::from)
            .ok_or_else(|| AppError::BookNotFound(format!("Book with id {} not found", id)))
    }

    async fn page(&self, request: PageRequest) -> AppResult<Page<Book>> {
        let order = match request.sort() {
            BookSort::Unsorted => "b.id ASC",
            BookSort::YearAsc => "b.year ASC, b.id ASC",
        };

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "{} ORDER BY {} LIMIT $1 OFFSET $2",
            SELECT_BOOK, order
        ))
        .bind(request.size())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(
            rows.into_iter().map(Book::from).collect(),
            &request,
            total,
        ))
    }

    async fn find_by_title_prefix(&self, prefix: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));

        let rows = sqlx::query_as::<_, BookRow>(&format!(
            r#"{} WHERE LOWER(b.title) LIKE $1 ESCAPE '\' ORDER BY b.title, b.id"#,
            SELECT_BOOK
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_holder(&self, user_id: i64) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "{} WHERE b.holder_id = $1 ORDER BY b.title, b.id",
            SELECT_BOOK
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn create(&self, book: &Book) -> AppResult<Book> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, author, year, holder_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(book.holder.as_ref().map(|u| u.id))
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        let id = book
            .id
            .ok_or_else(|| AppError::Internal("Cannot update a book without id".to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, year = $3, holder_id = $4
            WHERE id = $5
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(book.holder.as_ref().map(|u| u.id))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BookNotFound(format!("Book with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BookNotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
