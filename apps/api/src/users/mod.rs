//! The Users API: accounts plus the skills and jobs embedded in them.
//!
//! Every sub-document mutation loads the parent user, changes it in memory
//! and saves the whole document back.

pub mod handlers;
pub mod jobs;
pub mod skills;
pub mod validation;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::UserDocument;
use crate::store::UserStore;

/// Loads a user document or fails with `NotFound`.
pub(crate) async fn load_user(store: &dyn UserStore, id: Uuid) -> Result<UserDocument, AppError> {
    store.find_by_id(id).await?.ok_or(AppError::NotFound)
}

/// Saves a user document; a document deleted in the meantime is `NotFound`.
pub(crate) async fn save_user(store: &dyn UserStore, user: &UserDocument) -> Result<(), AppError> {
    if store.save(user).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

/// The body of an update must name the same id as the path.
pub(crate) fn check_body_id(path_id: Uuid, body: &Value) -> Result<(), AppError> {
    let body_id = body.get("id");
    let matches = body_id
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .is_some_and(|id| id == path_id);
    if matches {
        return Ok(());
    }

    let shown = match body_id {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    };
    let message = format!(
        "Bad Request: Request path id ({path_id}) and request body id ({shown}) must match"
    );
    tracing::warn!("{message}");
    Err(AppError::BadRequest(message))
}

/// Fails on the first field that is absent or null.
pub(crate) fn require_fields(body: &Value, fields: &[&str]) -> Result<(), AppError> {
    report_missing(fields.iter().find(|f| is_absent(body.get(**f))))
}

/// Like [`require_fields`], but an empty string also counts as missing.
pub(crate) fn require_non_empty_fields(body: &Value, fields: &[&str]) -> Result<(), AppError> {
    report_missing(fields.iter().find(|f| match body.get(**f) {
        Some(Value::String(s)) => s.is_empty(),
        other => is_absent(other),
    }))
}

fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn report_missing(missing: Option<&&str>) -> Result<(), AppError> {
    match missing {
        Some(field) => {
            let message = format!("Bad request: missing '{field}' in request body");
            tracing::warn!("{message}");
            Err(AppError::BadRequest(message))
        }
        None => Ok(()),
    }
}

/// Deserializes a typed input from a request body, reporting serde errors as 400s.
pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(format!("Bad request: {e}")))
}

/// Distinguishes an absent field (`None`) from an explicit null (`Some(None)`).
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_body_id_match() {
        let id = Uuid::new_v4();
        assert!(check_body_id(id, &json!({ "id": id.to_string() })).is_ok());
    }

    #[test]
    fn test_check_body_id_mismatch_message() {
        let id = Uuid::new_v4();
        let err = check_body_id(id, &json!({ "id": "abc" })).unwrap_err();
        match err {
            AppError::BadRequest(message) => assert_eq!(
                message,
                format!("Bad Request: Request path id ({id}) and request body id (abc) must match")
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_body_id_missing() {
        let err = check_body_id(Uuid::new_v4(), &json!({})).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m.contains("(undefined)")));
    }

    #[test]
    fn test_require_fields_reports_first_missing() {
        let body = json!({ "title": "Dev", "company": null });
        let err = require_fields(&body, &["title", "company", "location"]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Bad request: missing 'company' in request body"));
    }

    #[test]
    fn test_require_fields_accepts_empty_string() {
        let body = json!({ "skill": "", "experience": 1 });
        assert!(require_fields(&body, &["skill", "experience"]).is_ok());
    }

    #[test]
    fn test_require_non_empty_fields_rejects_empty_string() {
        let body = json!({ "title": "Dev", "company": "" });
        let err = require_non_empty_fields(&body, &["title", "company", "location"]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "Bad request: missing 'company' in request body"));
    }

    #[test]
    fn test_require_fields_ok() {
        let body = json!({ "skill": "rust", "experience": 0 });
        assert!(require_fields(&body, &["skill", "experience"]).is_ok());
    }
}
