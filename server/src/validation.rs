//! Request validation at the service boundary.
//!
//! Bodies arrive as untyped JSON so that type mismatches (a numeric `name`,
//! a string `bought`) are reported as constraint violations instead of
//! framework deserialization errors. Every check runs before any store call.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::item::{BoughtUpdate, NewItem};

pub const MAX_NAME_LEN: usize = 100;

/// A single violated input constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("request body must be valid JSON")]
    MalformedBody,

    #[error("name is required and must be a string")]
    NameMissing,

    #[error("name cannot be empty")]
    NameEmpty,

    #[error("name cannot exceed {MAX_NAME_LEN} characters")]
    NameTooLong,

    #[error("bought must be a boolean")]
    BoughtNotBoolean,
}

/// Non-empty list of violations for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn one(violation: Violation) -> Self {
        Self(vec![violation])
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self::one(violation)
    }
}

/// Checks a create body: `name` present and a string, non-empty after
/// trimming, at most [`MAX_NAME_LEN`] characters after trimming.
pub fn validate_create(body: &Value) -> Result<NewItem, Violations> {
    let name = match body.get("name") {
        Some(Value::String(name)) => name,
        _ => return Err(Violation::NameMissing.into()),
    };

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Violation::NameEmpty.into());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(Violation::NameTooLong.into());
    }

    Ok(NewItem {
        name: trimmed.to_string(),
    })
}

/// Checks an update body: `bought` must be a JSON boolean.
pub fn validate_update(body: &Value) -> Result<BoughtUpdate, Violations> {
    match body.get("bought") {
        Some(Value::Bool(bought)) => Ok(BoughtUpdate { bought: *bought }),
        _ => Err(Violation::BoughtNotBoolean.into()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_err(body: Value) -> Violation {
        validate_create(&body).unwrap_err().as_slice()[0]
    }

    #[test]
    fn create_trims_name() {
        let item = validate_create(&json!({ "name": "  Milk \n" })).unwrap();
        assert_eq!(item.name, "Milk");
    }

    #[test]
    fn create_ignores_unknown_fields() {
        let item = validate_create(&json!({ "name": "Bread", "bought": true })).unwrap();
        assert_eq!(item.name, "Bread");
    }

    #[test]
    fn create_rejects_missing_or_non_string_name() {
        assert_eq!(create_err(json!({})), Violation::NameMissing);
        assert_eq!(create_err(json!({ "name": null })), Violation::NameMissing);
        assert_eq!(create_err(json!({ "name": 42 })), Violation::NameMissing);
        assert_eq!(create_err(json!({ "name": ["Milk"] })), Violation::NameMissing);
        assert_eq!(create_err(json!("Milk")), Violation::NameMissing);
    }

    #[test]
    fn create_rejects_empty_and_whitespace_names() {
        assert_eq!(create_err(json!({ "name": "" })), Violation::NameEmpty);
        assert_eq!(create_err(json!({ "name": "   \t " })), Violation::NameEmpty);
    }

    #[test]
    fn create_length_limit_applies_to_trimmed_name() {
        let exact = "a".repeat(MAX_NAME_LEN);
        assert!(validate_create(&json!({ "name": exact })).is_ok());

        let padded = format!("  {}  ", "a".repeat(MAX_NAME_LEN));
        assert!(validate_create(&json!({ "name": padded })).is_ok());

        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert_eq!(create_err(json!({ "name": long })), Violation::NameTooLong);
    }

    #[test]
    fn create_length_counts_characters_not_bytes() {
        let name = "ä".repeat(MAX_NAME_LEN);
        assert!(validate_create(&json!({ "name": name })).is_ok());
    }

    #[test]
    fn update_requires_strict_boolean() {
        assert_eq!(
            validate_update(&json!({ "bought": true })).unwrap(),
            BoughtUpdate { bought: true }
        );
        assert_eq!(
            validate_update(&json!({ "bought": false })).unwrap(),
            BoughtUpdate { bought: false }
        );
        for body in [
            json!({}),
            json!({ "bought": "true" }),
            json!({ "bought": 1 }),
            json!({ "bought": null }),
        ] {
            assert_eq!(
                validate_update(&body).unwrap_err().as_slice(),
                &[Violation::BoughtNotBoolean]
            );
        }
    }

    #[test]
    fn violations_display_joins_messages() {
        let violations = Violations(vec![Violation::NameEmpty, Violation::BoughtNotBoolean]);
        assert_eq!(
            violations.to_string(),
            "name cannot be empty; bought must be a boolean"
        );
        assert_eq!(violations.messages().len(), 2);
    }
}
