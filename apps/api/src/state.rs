use std::sync::Arc;

use crate::config::Config;
use crate::store::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store backend. Postgres in production, in-memory for tests
    /// and `DATABASE_URL=memory://`.
    pub store: Arc<dyn UserStore>,
    pub config: Config,
}
