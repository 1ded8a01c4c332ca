//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::ToSchema;
use validator::Validate;

use super::user::{User, UserDto};

/// Book as persisted.
///
/// `id` is `None` until the book is first inserted. `holder` is the user
/// currently borrowing the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub holder: Option<User>,
}

impl Book {
    pub fn is_assigned(&self) -> bool {
        self.holder.is_some()
    }
}

/// Book projection bound from forms and rendered into views.
///
/// Every scalar is optional so that a missing form field surfaces as a
/// validation error instead of a rejected request. Empty form values bind
/// as `None`. `year` stays as the submitted text so a non-numeric value
/// comes back to the form as a field error.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookDto {
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    pub id: Option<i64>,
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        required(message = "Title is required"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: Option<String>,
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        required(message = "Author is required"),
        length(max = 255, message = "Author must be at most 255 characters")
    )]
    pub author: Option<String>,
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(required(message = "Year is required"))]
    pub year: Option<String>,
    /// Current holder, `None` when the book is on the shelf
    #[serde(default)]
    pub user: Option<UserDto>,
}

/// Form posted by the assignment dropdown (`user.id=<id>`)
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AssignForm {
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default, rename = "user.id")]
    pub user_id: Option<i64>,
}
