use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Job, Skill};

/// The stored user document. Skills and jobs are embedded sub-documents.
#[derive(Debug, Clone)]
pub struct UserDocument {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub skills: Vec<Skill>,
    pub jobs: Vec<Job>,
    pub created_at: DateTime<Utc>,
}

impl UserDocument {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            skills: Vec::new(),
            jobs: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn skill_mut(&mut self, skill_id: Uuid) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == skill_id)
    }

    pub fn job_mut(&mut self, job_id: Uuid) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == job_id)
    }

    /// Removes a skill by id. Returns false if no such skill exists.
    pub fn remove_skill(&mut self, skill_id: Uuid) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s.id != skill_id);
        self.skills.len() != before
    }

    /// Removes a job by id. Returns false if no such job exists.
    pub fn remove_job(&mut self, job_id: Uuid) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != job_id);
        self.jobs.len() != before
    }
}

/// API representation of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub skills: Vec<Skill>,
    pub jobs: Vec<Job>,
}

impl From<UserDocument> for UserResponse {
    fn from(user: UserDocument) -> Self {
        Self {
            id: user.id,
            username: user.username,
            skills: user.skills,
            jobs: user.jobs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_user() -> UserDocument {
        let mut user = UserDocument::new("ada".to_string(), "$2b$04$hash".to_string());
        user.skills.push(Skill::new("rust", 3.0));
        user.skills.push(Skill::new("sql", 1.0));
        user
    }

    #[test]
    fn test_remove_skill_keeps_order_of_the_rest() {
        let mut user = make_user();
        let first = user.skills[0].id;
        assert!(user.remove_skill(first));
        assert_eq!(user.skills.len(), 1);
        assert_eq!(user.skills[0].skill, "sql");
    }

    #[test]
    fn test_remove_unknown_skill_is_reported() {
        let mut user = make_user();
        assert!(!user.remove_skill(Uuid::new_v4()));
        assert_eq!(user.skills.len(), 2);
    }

    #[test]
    fn test_response_omits_password() {
        let value = serde_json::to_value(UserResponse::from(make_user())).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], json!("ada"));
        assert_eq!(value["skills"][0]["skill"], json!("rust"));
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let job = Job {
            id: Uuid::new_v4(),
            title: "Backend".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            required: vec![],
            date_applied: None,
            progress: vec!["resume submitted".to_string()],
        };
        let value = serde_json::to_value(&job).unwrap();
        assert!(value.get("dateApplied").is_some());
        assert_eq!(value["dateApplied"], json!(null));
        assert_eq!(value["progress"][0], json!("resume submitted"));
    }
}
