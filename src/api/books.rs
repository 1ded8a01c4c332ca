//! Book catalog pages

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Form,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    mapper,
    models::{AssignForm, BookDto, BookSort, PageRequest, UserDto},
    validation::{validate_book, FieldError},
    AppState,
};

use super::{FormOutcome, View};

pub const SEARCH_VIEW: &str = "book/search_book";
pub const LIST_VIEW: &str = "book/books";
pub const INFO_VIEW: &str = "book/book_info";
pub const ADD_VIEW: &str = "book/add_book";
pub const EDIT_VIEW: &str = "book/edit_book";

const BOOKS_PATH: &str = "/books";

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";
pub const NO_MATCH_MESSAGE: &str = "Nothing matched your query.";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Search page model: either `books` or a `message`
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchView {
    pub query: Option<String>,
    pub books: Vec<BookDto>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub sort_by_year: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// One page of the catalog with the numbers pagination controls need
#[derive(Debug, Serialize, ToSchema)]
pub struct BooksView {
    pub books: Vec<BookDto>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total_books: i64,
    pub page_size: i64,
    pub sort_by_year: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookInfoView {
    pub book: BookDto,
    /// `None` when the book is on the shelf
    pub holder: Option<UserDto>,
    /// Candidates for the assignment dropdown
    pub users: Vec<UserDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormView {
    pub book: BookDto,
    pub errors: Vec<FieldError>,
}

/// Search books by title prefix
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(
        ("query" = Option<String>, Query, description = "Title prefix, case-insensitive")
    ),
    responses(
        (status = 200, description = "View book/search_book", body = SearchView)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<View<SearchView>> {
    let query = params.query.filter(|q| !q.is_empty());

    let Some(text) = query.as_deref() else {
        return Ok(View::new(
            SEARCH_VIEW,
            SearchView {
                query: None,
                books: Vec::new(),
                message: Some(EMPTY_QUERY_MESSAGE.to_string()),
            },
        ));
    };

    let books = state.services.books.get_by_title_prefix(text).await?;
    let message = books.is_empty().then(|| NO_MATCH_MESSAGE.to_string());

    Ok(View::new(
        SEARCH_VIEW,
        SearchView {
            query,
            books: mapper::books_to_dtos(&books),
            message,
        },
    ))
}

/// List books page by page
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("sort_by_year" = Option<String>, Query, description = "\"true\" orders by year ascending"),
        ("page" = Option<i64>, Query, description = "Zero-based page number (default: 0)"),
        ("size" = Option<i64>, Query, description = "Books per page (default: 3)")
    ),
    responses(
        (status = 200, description = "View book/books", body = BooksView),
        (status = 400, description = "Negative page or size below one")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<View<BooksView>> {
    let sort_by_year = params
        .sort_by_year
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("true"));
    let sort = if sort_by_year {
        BookSort::YearAsc
    } else {
        BookSort::Unsorted
    };

    let size = params
        .size
        .unwrap_or(state.config.catalog.default_page_size);
    let request = PageRequest::new(params.page.unwrap_or(0), size, sort)?;

    let page = state.services.books.get_page(request).await?;

    Ok(View::new(
        LIST_VIEW,
        BooksView {
            books: mapper::books_to_dtos(&page.content),
            total_pages: page.total_pages(),
            current_page: page.number,
            total_books: page.total_elements,
            page_size: size,
            sort_by_year,
        },
    ))
}

/// Show a book with its holder and the users it can be assigned to
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "View book/book_info", body = BookInfoView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<View<BookInfoView>> {
    let book = state.services.books.get_by_id(id).await?;
    let users = state.services.users.get_users().await?;

    Ok(View::new(
        INFO_VIEW,
        BookInfoView {
            holder: book.holder.as_ref().map(mapper::user_to_dto),
            book: mapper::book_to_dto(&book),
            users: mapper::users_to_dtos(&users),
        },
    ))
}

/// Empty form for a new book
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses(
        (status = 200, description = "View book/add_book", body = BookFormView)
    )
)]
pub async fn show_create_form() -> View<BookFormView> {
    View::new(
        ADD_VIEW,
        BookFormView {
            book: BookDto::default(),
            errors: Vec::new(),
        },
    )
}

/// Create a book from the submitted form
#[utoipa::path(
    post,
    path = "/books/new",
    tag = "books",
    request_body(content = BookDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to /books"),
        (status = 422, description = "View book/add_book with field errors", body = BookFormView)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Form(dto): Form<BookDto>,
) -> AppResult<FormOutcome<BookFormView>> {
    let errors = validate_book(&dto);
    if !errors.is_empty() {
        tracing::debug!("Rejected new book form: {:?}", errors);
        return Ok(FormOutcome::Invalid(View::new(
            ADD_VIEW,
            BookFormView { book: dto, errors },
        )));
    }

    let mut book = mapper::dto_to_book(dto);
    // a new book starts unsaved and on the shelf
    book.id = None;
    book.holder = None;
    state.services.books.save(book).await?;

    Ok(FormOutcome::Redirect(BOOKS_PATH))
}

/// Assign a book to a user
#[utoipa::path(
    post,
    path = "/books/{id}/assign",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body(content = AssignForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Assigned, redirect to /books"),
        (status = 400, description = "No user selected"),
        (status = 404, description = "Book or user not found")
    )
)]
pub async fn assign_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AssignForm>,
) -> AppResult<Redirect> {
    let user_id = form
        .user_id
        .ok_or_else(|| AppError::BadRequest("user.id is required".to_string()))?;

    state.services.books.assign(id, user_id).await?;
    Ok(Redirect::to(BOOKS_PATH))
}

/// Update a book from the submitted form
#[utoipa::path(
    post,
    path = "/books/edit/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body(content = BookDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to /books"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "View book/edit_book with field errors", body = BookFormView)
    )
)]
pub async fn edit_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(mut dto): Form<BookDto>,
) -> AppResult<FormOutcome<BookFormView>> {
    dto.id = Some(id);

    let errors = validate_book(&dto);
    if !errors.is_empty() {
        tracing::debug!("Rejected edit form for book id={}: {:?}", id, errors);
        return Ok(FormOutcome::Invalid(View::new(
            EDIT_VIEW,
            BookFormView { book: dto, errors },
        )));
    }

    state.services.books.update(mapper::dto_to_book(dto)).await?;
    Ok(FormOutcome::Redirect(BOOKS_PATH))
}

/// Edit form pre-filled from the stored book
#[utoipa::path(
    get,
    path = "/books/edit/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "View book/edit_book", body = BookFormView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn show_edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<View<BookFormView>> {
    let book = state.services.books.get_by_id(id).await?;

    Ok(View::new(
        EDIT_VIEW,
        BookFormView {
            book: mapper::book_to_dto(&book),
            errors: Vec::new(),
        },
    ))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirect to /books"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    state.services.books.delete(id).await?;
    Ok(Redirect::to(BOOKS_PATH))
}

/// Put a book back on the shelf
#[utoipa::path(
    post,
    path = "/books/{id}/release",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Released, redirect to /books"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn release_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    state.services.books.release(id).await?;
    Ok(Redirect::to(BOOKS_PATH))
}
