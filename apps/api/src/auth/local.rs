//! Local strategy: username and password checked against the stored hash.

use serde_json::Value;
use tracing::{info, warn};

use crate::auth::password::verify_password;
use crate::errors::AppError;
use crate::models::UserDocument;
use crate::store::UserStore;

pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Both fields must be present strings, otherwise the request is malformed.
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);
        match (field("username"), field("password")) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(AppError::BadRequest("Bad Request".to_string())),
        }
    }
}

/// Returns the user when the credentials match; `Unauthorized` otherwise.
pub async fn authenticate(
    store: &dyn UserStore,
    request: LoginRequest,
) -> Result<UserDocument, AppError> {
    let Some(user) = store.find_by_username(&request.username).await? else {
        warn!("Login rejected: unknown username '{}'", request.username);
        return Err(AppError::Unauthorized);
    };

    if !verify_password(request.password, user.password_hash.clone()).await? {
        warn!("Login rejected: wrong password for '{}'", user.username);
        return Err(AppError::Unauthorized);
    }

    info!("User {} logged in", user.username);
    Ok(user)
}
