//! Account field validation for registration and account updates.
//!
//! Checks run in a fixed order and the first failure wins:
//! missing → non-string → untrimmed → too short → too long.
//! Too-short is reported before too-long across all fields.

use serde_json::Value;

use crate::errors::FieldError;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

/// Length bounds in characters for an account field.
#[derive(Debug, Clone, Copy)]
pub struct SizedField {
    pub name: &'static str,
    pub min: usize,
    pub max: usize,
}

pub const SIZED_FIELDS: &[SizedField] = &[
    SizedField {
        name: USERNAME,
        min: 3,
        max: 8,
    },
    SizedField {
        name: PASSWORD,
        min: 3,
        max: 8,
    },
];

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Validates a registration body. Both fields are required.
pub fn validate_registration(body: &Value) -> Result<Credentials, FieldError> {
    let fields = [USERNAME, PASSWORD];

    if let Some(missing) = fields.iter().find(|f| body.get(**f).is_none()) {
        return Err(FieldError::new("Missing field", *missing));
    }

    let present: Vec<(&'static str, &Value)> = fields
        .iter()
        .filter_map(|f| body.get(*f).map(|v| (*f, v)))
        .collect();
    let values = check_fields(&present)?;

    Ok(Credentials {
        username: values[0].to_string(),
        password: values[1].to_string(),
    })
}

/// Validated account update. Each field is present only if the body supplied it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validates the optional `username` / `password` fields of an account update
/// with the same rules as registration.
pub fn validate_account_update(body: &Value) -> Result<AccountUpdate, FieldError> {
    let present: Vec<(&'static str, &Value)> = [USERNAME, PASSWORD]
        .iter()
        .filter_map(|f| body.get(*f).map(|v| (*f, v)))
        .collect();
    let values = check_fields(&present)?;

    let mut update = AccountUpdate::default();
    for ((name, _), value) in present.iter().zip(values) {
        match *name {
            USERNAME => update.username = Some(value.to_string()),
            _ => update.password = Some(value.to_string()),
        }
    }
    Ok(update)
}

fn bounds(name: &str) -> Option<&'static SizedField> {
    SIZED_FIELDS.iter().find(|f| f.name == name)
}

fn check_fields<'a>(fields: &[(&'static str, &'a Value)]) -> Result<Vec<&'a str>, FieldError> {
    let mut strings = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        match value.as_str() {
            Some(s) => strings.push((*name, s)),
            None => {
                return Err(FieldError::new(
                    "Incorrect field type: expected string",
                    *name,
                ))
            }
        }
    }

    if let Some((name, _)) = strings.iter().find(|(_, s)| s.trim() != *s) {
        return Err(FieldError::new("Cannot start or end with whitespace", *name));
    }

    for (name, s) in &strings {
        if let Some(sized) = bounds(*name) {
            if s.chars().count() < sized.min {
                return Err(FieldError::new(
                    format!("Must be at least {} characters long", sized.min),
                    *name,
                ));
            }
        }
    }
    for (name, s) in &strings {
        if let Some(sized) = bounds(*name) {
            if s.chars().count() > sized.max {
                return Err(FieldError::new(
                    format!("Must be at most {} characters long", sized.max),
                    *name,
                ));
            }
        }
    }

    Ok(strings.into_iter().map(|(_, s)| s).collect())
}
