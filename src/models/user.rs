//! User (borrower) model and related types

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Borrower as stored in the database.
///
/// `id` is ignored on insert; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub year_of_birth: i32,
}

/// User projection used by forms and views.
///
/// `year_of_birth` is kept as submitted and parsed during validation.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserDto {
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    pub id: Option<i64>,
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        required(message = "Full name is required"),
        length(min = 2, max = 100, message = "Full name must be 2 to 100 characters")
    )]
    pub full_name: Option<String>,
    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(required(message = "Year of birth is required"))]
    pub year_of_birth: Option<String>,
}
