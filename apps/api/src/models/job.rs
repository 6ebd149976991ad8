use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A skill a job posting asks for, embedded in its job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub id: Uuid,
    pub skill: String,
    pub experience: f64,
}

/// A job application, embedded in the user document.
///
/// `progress` is an ordered log of status strings ("resume submitted",
/// "phone screen", ...), oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub required: Vec<RequiredSkill>,
    #[serde(default)]
    pub date_applied: Option<NaiveDate>,
    #[serde(default)]
    pub progress: Vec<String>,
}
