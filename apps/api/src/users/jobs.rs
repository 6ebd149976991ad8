//! Handlers for the job applications embedded in a user document.

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{ApiPath, JsonBody};
use crate::models::{Job, RequiredSkill, UserResponse};
use crate::state::AppState;
use crate::users::{
    check_body_id, explicit_null, load_user, parse_input, require_non_empty_fields, save_user,
};

const REQUIRED_JOB_FIELDS: &[&str] = &["title", "company", "location"];

/// A required skill as sent by clients. New entries have no id yet.
#[derive(Debug, Deserialize)]
struct RequiredSkillInput {
    id: Option<Uuid>,
    skill: String,
    experience: f64,
}

impl From<RequiredSkillInput> for RequiredSkill {
    fn from(input: RequiredSkillInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            skill: input.skill,
            experience: input.experience,
        }
    }
}

/// A required skill on a new job. Any client-sent `id` is ignored.
#[derive(Debug, Deserialize)]
struct NewRequiredSkill {
    skill: String,
    experience: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewJob {
    title: String,
    company: String,
    location: String,
    #[serde(default)]
    required: Vec<NewRequiredSkill>,
    #[serde(default)]
    date_applied: Option<NaiveDate>,
    #[serde(default)]
    progress: Vec<String>,
}

impl From<NewJob> for Job {
    fn from(input: NewJob) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            company: input.company,
            location: input.location,
            required: input
                .required
                .into_iter()
                .map(|r| RequiredSkill {
                    id: Uuid::new_v4(),
                    skill: r.skill,
                    experience: r.experience,
                })
                .collect(),
            date_applied: input.date_applied,
            progress: input.progress,
        }
    }
}

/// Fields a job update may replace. Absent fields are left untouched;
/// `dateApplied: null` clears the date.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobPatch {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    required: Option<Vec<RequiredSkillInput>>,
    #[serde(default, deserialize_with = "explicit_null")]
    date_applied: Option<Option<NaiveDate>>,
    progress: Option<Vec<String>>,
}

impl JobPatch {
    fn validate(&self) -> Result<(), AppError> {
        let named = [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
        ];
        for (name, value) in named {
            if value.as_deref().is_some_and(str::is_empty) {
                return Err(AppError::BadRequest(format!(
                    "Bad request: '{name}' cannot be empty"
                )));
            }
        }
        Ok(())
    }

    fn apply(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(company) = self.company {
            job.company = company;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(required) = self.required {
            job.required = required.into_iter().map(RequiredSkill::from).collect();
        }
        if let Some(date_applied) = self.date_applied {
            job.date_applied = date_applied;
        }
        if let Some(progress) = self.progress {
            job.progress = progress;
        }
    }
}

/// GET /users/jobs/:id
///
/// The user's job applications in stored order.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<Job>>, AppError> {
    let user = load_user(state.store.as_ref(), user_id).await?;
    Ok(Json(user.jobs))
}

/// GET /users/:id/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    ApiPath((user_id, job_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Job>, AppError> {
    let user = load_user(state.store.as_ref(), user_id).await?;
    user.jobs
        .into_iter()
        .find(|j| j.id == job_id)
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// POST /users/new/jobs/:id
///
/// Appends a job application to the user and returns the updated user.
pub async fn handle_add_job(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    require_non_empty_fields(&body, REQUIRED_JOB_FIELDS)?;
    let input: NewJob = parse_input(body)?;

    let mut user = load_user(state.store.as_ref(), user_id).await?;
    let job = Job::from(input);
    info!("Adding job {} ({} at {}) to user {}", job.id, job.title, job.company, user.id);
    user.jobs.push(job);
    save_user(state.store.as_ref(), &user).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/edit/:user_id/jobs/:id
///
/// Replaces the supplied fields of one job. The body `id` must match the path.
pub async fn handle_update_job(
    State(state): State<AppState>,
    ApiPath((user_id, job_id)): ApiPath<(Uuid, Uuid)>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    check_body_id(job_id, &body)?;
    let patch: JobPatch = parse_input(body)?;
    patch.validate()?;

    let mut user = load_user(state.store.as_ref(), user_id).await?;
    let job = user.job_mut(job_id).ok_or(AppError::NotFound)?;
    patch.apply(job);
    save_user(state.store.as_ref(), &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/delete/:user_id/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    ApiPath((user_id, job_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let mut user = load_user(state.store.as_ref(), user_id).await?;
    if !user.remove_job(job_id) {
        return Err(AppError::NotFound);
    }
    save_user(state.store.as_ref(), &user).await?;
    info!("Removed job {job_id} from user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}
