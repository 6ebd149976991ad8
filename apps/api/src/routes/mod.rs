pub mod health;


use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::errors::AppError;
use crate::state::AppState;
use crate::users::{handlers as users, jobs, skills};

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Replaces axum's empty 405 body with the JSON error shape, keeping `Allow`.
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let mut json = AppError::MethodNotAllowed.into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        json.headers_mut().insert(header::ALLOW, allow.clone());
    }
    json
}

pub fn build_router(state: AppState) -> Router {
    let users = users_router();

    Router::new()
        .route("/health", get(health::health_handler))
        // Users API, reachable with or without the /api prefix
        .nest("/users", users.clone())
        .nest("/api/users", users)
        // Auth API
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/refresh", post(auth::handle_refresh))
        .route("/api/protected", get(auth::handle_protected))
        .fallback(not_found)
        .layer(middleware::map_response(json_method_not_allowed))
        .with_state(state)
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::handle_register).get(users::handle_list_users))
        .route("/user", get(users::handle_get_user_by_username))
        .route(
            "/:id",
            get(users::handle_get_user)
                .put(users::handle_update_user)
                .delete(users::handle_delete_user),
        )
        // Skills
        .route("/skills/:id", get(skills::handle_list_skills))
        .route("/:id/skills/:skill_id", get(skills::handle_get_skill))
        .route("/new/skills/:id", post(skills::handle_add_skill))
        .route("/edit/:user_id/skills/:id", put(skills::handle_update_skill))
        .route("/delete/:user_id/skills/:id", delete(skills::handle_delete_skill))
        // Jobs
        .route("/jobs/:id", get(jobs::handle_list_jobs))
        .route("/:id/jobs/:job_id", get(jobs::handle_get_job))
        .route("/new/jobs/:id", post(jobs::handle_add_job))
        .route("/edit/:user_id/jobs/:id", put(jobs::handle_update_job))
        .route("/delete/:user_id/jobs/:id", delete(jobs::handle_delete_job))
}
