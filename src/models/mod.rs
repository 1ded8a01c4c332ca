//! Data models for Shelfmark

pub mod book;
pub mod page;
pub mod user;

// Re-export commonly used types
pub use book::{AssignForm, Book, BookDto};
pub use page::{BookSort, Page, PageRequest};
pub use user::{User, UserDto};
