//! Axum route handlers for user accounts.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::errors::{AppError, FieldError};
use crate::extract::{ApiPath, ApiQuery, JsonBody};
use crate::models::{UserDocument, UserResponse};
use crate::state::AppState;
use crate::users::validation::{validate_account_update, validate_registration};
use crate::users::{check_body_id, load_user, save_user};

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// POST /users
///
/// Registers a new account. Validation failures are 422s naming the field.
pub async fn handle_register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let credentials = validate_registration(&body).map_err(|e| {
        warn!("Registration rejected: {} ({})", e.message, e.location);
        e
    })?;

    if state
        .store
        .find_by_username(&credentials.username)
        .await?
        .is_some()
    {
        return Err(FieldError::username_taken().into());
    }

    let hash = hash_password(credentials.password, state.config.bcrypt_cost).await?;
    let user = state
        .store
        .create(UserDocument::new(credentials.username, hash))
        .await?;
    info!("Registered user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.store.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/user?username=
pub async fn handle_get_user_by_username(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UsernameQuery>,
) -> Result<Json<UserResponse>, AppError> {
    state
        .store
        .find_by_username(&query.username)
        .await?
        .map(|u| Json(u.into()))
        .ok_or(AppError::NotFound)
}

/// GET /users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = load_user(state.store.as_ref(), id).await?;
    Ok(Json(user.into()))
}

/// PUT /users/:id
///
/// Changes the username and/or password. Both follow the registration rules.
pub async fn handle_update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    check_body_id(id, &body)?;
    let update = validate_account_update(&body)?;

    let mut user = load_user(state.store.as_ref(), id).await?;

    if let Some(username) = update.username {
        if username != user.username {
            if let Some(existing) = state.store.find_by_username(&username).await? {
                if existing.id != user.id {
                    return Err(FieldError::username_taken().into());
                }
            }
            user.username = username;
        }
    }
    if let Some(password) = update.password {
        user.password_hash = hash_password(password, state.config.bcrypt_cost).await?;
    }

    save_user(state.store.as_ref(), &user).await?;
    info!("Updated user {}", user.id);

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    info!("Deleted user {id}");
    Ok(StatusCode::NO_CONTENT)
}
