//! Axum route handlers for the Auth API.

use anyhow::Context;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::jwt::{issue_token, AuthUser, TokenUser};
use crate::auth::local::{authenticate, LoginRequest};
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    pub auth_token: String,
}

fn sign(state: &AppState, user: &TokenUser) -> Result<Json<AuthTokenResponse>, AppError> {
    let auth_token = issue_token(user, &state.config.jwt_secret, state.config.jwt_expiry_secs)
        .context("failed to sign token")?;
    Ok(Json(AuthTokenResponse { auth_token }))
}

/// POST /api/auth/login
///
/// Exchanges a username and password for a signed token.
pub async fn handle_login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<AuthTokenResponse>, AppError> {
    let request = LoginRequest::from_body(&body)?;
    let user = authenticate(state.store.as_ref(), request).await?;
    sign(&state, &TokenUser::from(&user))
}

/// POST /api/auth/refresh
///
/// Issues a new token for the identity carried by a still-valid one.
pub async fn handle_refresh(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<AuthTokenResponse>, AppError> {
    info!("Refreshing token for {}", claims.user.username);
    sign(&state, &claims.user)
}

/// GET /api/protected
pub async fn handle_protected(AuthUser(_claims): AuthUser) -> Json<Value> {
    Json(json!({ "data": "rosebud" }))
}
