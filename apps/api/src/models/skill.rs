use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A skill the user holds, embedded in the user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub skill: String,
    /// Experience level, usually years.
    pub experience: f64,
}

impl Skill {
    pub fn new(skill: impl Into<String>, experience: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            skill: skill.into(),
            experience,
        }
    }
}
