//! Conversions between persisted entities and their form/view projections

use crate::models::{Book, BookDto, User, UserDto};

pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        id: Some(user.id),
        full_name: Some(user.full_name.clone()),
        year_of_birth: Some(user.year_of_birth.to_string()),
    }
}

/// Missing fields become zero/empty values; a form that passed validation
/// always carries them.
pub fn dto_to_user(dto: UserDto) -> User {
    User {
        id: dto.id.unwrap_or_default(),
        full_name: dto.full_name.map(|s| s.trim().to_string()).unwrap_or_default(),
        year_of_birth: parse_year(dto.year_of_birth.as_deref()),
    }
}

pub fn users_to_dtos(users: &[User]) -> Vec<UserDto> {
    users.iter().map(user_to_dto).collect()
}

pub fn book_to_dto(book: &Book) -> BookDto {
    BookDto {
        id: book.id,
        title: Some(book.title.clone()),
        author: Some(book.author.clone()),
        year: Some(book.year.to_string()),
        user: book.holder.as_ref().map(user_to_dto),
    }
}

pub fn dto_to_book(dto: BookDto) -> Book {
    Book {
        id: dto.id,
        title: dto.title.map(|s| s.trim().to_string()).unwrap_or_default(),
        author: dto.author.map(|s| s.trim().to_string()).unwrap_or_default(),
        year: parse_year(dto.year.as_deref()),
        holder: dto.user.map(dto_to_user),
    }
}

pub fn books_to_dtos(books: &[Book]) -> Vec<BookDto> {
    books.iter().map(book_to_dto).collect()
}

fn parse_year(value: Option<&str>) -> i32 {
    value.and_then(|y| y.trim().parse().ok()).unwrap_or_default()
}
