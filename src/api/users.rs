//! Reader management pages

use axum::{
    extract::{Path, State},
    Form,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    mapper,
    models::{BookDto, UserDto},
    validation::{validate_user, FieldError},
    AppState,
};

use super::{FormOutcome, View};

pub const LIST_VIEW: &str = "user/users";
pub const INFO_VIEW: &str = "user/user_info";
pub const ADD_VIEW: &str = "user/add_user";

const USERS_PATH: &str = "/users";

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersView {
    pub users: Vec<UserDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfoView {
    pub user: UserDto,
    /// Books the user currently holds
    pub books: Vec<BookDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserFormView {
    pub user: UserDto,
    pub errors: Vec<FieldError>,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "View user/users", body = UsersView)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<View<UsersView>> {
    let users = state.services.users.get_users().await?;

    Ok(View::new(
        LIST_VIEW,
        UsersView {
            users: mapper::users_to_dtos(&users),
        },
    ))
}

/// Show a user with the books they hold
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "View user/user_info", body = UserInfoView),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<View<UserInfoView>> {
    let user = state.services.users.get_user_by_id(id).await?;
    let books = state.services.books.get_held_by(id).await?;

    Ok(View::new(
        INFO_VIEW,
        UserInfoView {
            user: mapper::user_to_dto(&user),
            books: mapper::books_to_dtos(&books),
        },
    ))
}

/// Empty form for a new user
#[utoipa::path(
    get,
    path = "/users/new",
    tag = "users",
    responses(
        (status = 200, description = "View user/add_user", body = UserFormView)
    )
)]
pub async fn show_create_form() -> View<UserFormView> {
    View::new(
        ADD_VIEW,
        UserFormView {
            user: UserDto::default(),
            errors: Vec::new(),
        },
    )
}

/// Register a user from the submitted form
#[utoipa::path(
    post,
    path = "/users/new",
    tag = "users",
    request_body(content = UserDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to /users"),
        (status = 422, description = "View user/add_user with field errors", body = UserFormView)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Form(dto): Form<UserDto>,
) -> AppResult<FormOutcome<UserFormView>> {
    let errors = validate_user(&dto);
    if !errors.is_empty() {
        return Ok(invalid(dto, errors));
    }

    let mut user = mapper::dto_to_user(dto.clone());
    user.id = 0;

    match state.services.users.create(user).await {
        Ok(_) => Ok(FormOutcome::Redirect(USERS_PATH)),
        Err(AppError::Conflict(_)) => Ok(invalid(
            dto,
            vec![FieldError::new(
                "full_name",
                "A user with this name already exists",
            )],
        )),
        Err(e) => Err(e),
    }
}

fn invalid(user: UserDto, errors: Vec<FieldError>) -> FormOutcome<UserFormView> {
    tracing::debug!("Rejected new user form: {:?}", errors);
    FormOutcome::Invalid(View::new(ADD_VIEW, UserFormView { user, errors }))
}
