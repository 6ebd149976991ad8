use anyhow::{Context, Result};

/// Hashes a password with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("password hashing task panicked")?
        .context("failed to hash password")
}

/// Compares a password against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task panicked")?
        .context("stored password hash is malformed")
}
