//! Authentication: password hashing, the local username/password strategy,
//! and JWT issue / verification.

pub mod handlers;
pub mod jwt;
pub mod local;
pub mod password;
