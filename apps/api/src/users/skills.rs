//! Handlers for the skills embedded in a user document.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{ApiPath, JsonBody};
use crate::models::{Skill, UserResponse};
use crate::state::AppState;
use crate::users::{check_body_id, load_user, parse_input, require_fields, save_user};

#[derive(Debug, Deserialize)]
struct NewSkill {
    skill: String,
    experience: f64,
}

/// Fields a skill update may replace. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
struct SkillPatch {
    skill: Option<String>,
    experience: Option<f64>,
}

impl SkillPatch {
    fn apply(self, skill: &mut Skill) {
        if let Some(name) = self.skill {
            skill.skill = name;
        }
        if let Some(experience) = self.experience {
            skill.experience = experience;
        }
    }
}

/// GET /users/skills/:id
///
/// The user's skills in stored order.
pub async fn handle_list_skills(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Vec<Skill>>, AppError> {
    let user = load_user(state.store.as_ref(), user_id).await?;
    Ok(Json(user.skills))
}

/// GET /users/:id/skills/:skill_id
pub async fn handle_get_skill(
    State(state): State<AppState>,
    ApiPath((user_id, skill_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Skill>, AppError> {
    let user = load_user(state.store.as_ref(), user_id).await?;
    user.skills
        .into_iter()
        .find(|s| s.id == skill_id)
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// POST /users/new/skills/:id
///
/// Appends a skill to the user and returns the updated user.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    require_fields(&body, &["skill", "experience"])?;
    let input: NewSkill = parse_input(body)?;

    let mut user = load_user(state.store.as_ref(), user_id).await?;
    let skill = Skill::new(input.skill, input.experience);
    info!("Adding skill {} to user {}", skill.id, user.id);
    user.skills.push(skill);
    save_user(state.store.as_ref(), &user).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /users/edit/:user_id/skills/:id
///
/// Replaces the supplied fields of one skill. The body `id` must match the path.
pub async fn handle_update_skill(
    State(state): State<AppState>,
    ApiPath((user_id, skill_id)): ApiPath<(Uuid, Uuid)>,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    check_body_id(skill_id, &body)?;
    let patch: SkillPatch = parse_input(body)?;

    let mut user = load_user(state.store.as_ref(), user_id).await?;
    let skill = user.skill_mut(skill_id).ok_or(AppError::NotFound)?;
    patch.apply(skill);
    save_user(state.store.as_ref(), &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/delete/:user_id/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    ApiPath((user_id, skill_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let mut user = load_user(state.store.as_ref(), user_id).await?;
    if !user.remove_skill(skill_id) {
        return Err(AppError::NotFound);
    }
    save_user(state.store.as_ref(), &user).await?;
    info!("Removed skill {skill_id} from user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_replaces_only_supplied_fields() {
        let mut skill = Skill::new("rust", 2.0);
        let patch: SkillPatch = parse_input(json!({ "id": "x", "experience": 4 })).unwrap();
        patch.apply(&mut skill);
        assert_eq!(skill.skill, "rust");
        assert_eq!(skill.experience, 4.0);
    }

    #[test]
    fn test_new_skill_rejects_wrong_type() {
        let err = parse_input::<NewSkill>(json!({ "skill": "rust", "experience": "lots" }))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
