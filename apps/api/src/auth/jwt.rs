use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use anyhow::Context;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::UserDocument;
use crate::state::AppState;

/// The user identity embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: Uuid,
    pub username: String,
}

impl From<&UserDocument> for TokenUser {
    fn from(user: &UserDocument) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    pub sub: String, // username
    pub iat: i64,
    pub exp: i64,
}

/// Signs an HS256 token for `user` valid for `expiry_secs` from now.
pub fn issue_token(
    user: &TokenUser,
    secret: &str,
    expiry_secs: i64,
) -> anyhow::Result<String> {
    let now = Utc::now().timestamp();
    let exp = now
        .checked_add(expiry_secs)
        .context("token expiry overflows the timestamp range")?;
    let claims = Claims {
        user: user.clone(),
        sub: user.username.clone(),
        iat: now,
        exp,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies signature, algorithm and expiry. No leeway is granted on `exp`.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// A request authenticated by a valid bearer token.
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => value.to_str().map_err(|_| {
                warn!("Authorization header is not valid ASCII");
                AppError::Unauthorized
            })?,
            None => {
                warn!("Missing Authorization header");
                return Err(AppError::Unauthorized);
            }
        };

        let token = bearer_token(header).ok_or_else(|| {
            warn!("Invalid Authorization header format");
            AppError::Unauthorized
        })?;

        let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
            warn!("Token verification failed: {e}");
            AppError::Unauthorized
        })?;

        Ok(AuthUser(claims))
    }
}
