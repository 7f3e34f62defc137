//! User handlers.
//!
//! Each handler decodes the request, makes exactly one service call and
//! encodes the outcome. Failures render through `AppError`.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

use common::AppResult;
use domain::{ErrorMessage, User, UserFields};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(fetch_all_users).post(create_user))
        .route(
            "/user/:id",
            get(fetch_user).put(edit_user).delete(delete_user),
        )
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserFields,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Invalid attributes, malformed body or email already used",
            body = Vec<ErrorMessage>)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<UserFields>,
) -> AppResult<impl IntoResponse> {
    let user = state.user_service.create_user(fields).await?;
    let location = format!("/user/{}", user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 404, description = "User not found", body = ErrorMessage)
    )
)]
pub async fn fetch_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.user_service.fetch_user(&id).await?;
    Ok(Json(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>)
    )
)]
pub async fn fetch_all_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.fetch_all_users().await?;
    Ok(Json(users))
}

/// Replace every attribute of a user
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserFields,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Invalid attributes, malformed body or email already used",
            body = Vec<ErrorMessage>),
        (status = 404, description = "User not found", body = ErrorMessage)
    )
)]
pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(fields): JsonBody<UserFields>,
) -> AppResult<Json<User>> {
    let user = state.user_service.edit_user(&id, fields).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorMessage)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
