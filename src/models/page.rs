//! Pagination primitives shared by repositories and views

use crate::error::{AppError, AppResult};

/// Ordering applied to a book page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSort {
    /// Storage order (ascending id)
    #[default]
    Unsorted,
    YearAsc,
}

/// A request for one zero-based page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
    sort: BookSort,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: BookSort) -> AppResult<Self> {
        if page < 0 {
            return Err(AppError::BadRequest("Page index must not be negative".to_string()));
        }
        if size < 1 {
            return Err(AppError::BadRequest("Page size must be at least one".to_string()));
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn sort(&self) -> BookSort {
        self.sort
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// One slice of a larger result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements / self.size + i64::from(self.total_elements % self.size != 0)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
