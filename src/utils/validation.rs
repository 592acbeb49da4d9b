use crate::utils::error::{CrudError, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A single field-level rule: when `check` returns false the rule is violated
/// and `message` is reported against `field`.
pub struct Rule<T> {
    pub field: &'static str,
    pub message: &'static str,
    pub check: fn(&T) -> bool,
}

/// Runs the rules in order and reports the first violation.
pub fn apply_rules<T>(target: &T, rules: &[Rule<T>]) -> Result<()> {
    match rules.iter().find(|rule| !(rule.check)(target)) {
        Some(rule) => {
            tracing::warn!("Validation failed on {}: {}", rule.field, rule.message);
            Err(CrudError::validation(rule.field, rule.message))
        }
        None => Ok(()),
    }
}

pub fn is_present_and_not_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn is_within_length(value: Option<&str>, max_chars: usize) -> bool {
    value.map_or(true, |v| v.chars().count() <= max_chars)
}

pub fn is_email_or_absent(value: Option<&str>) -> bool {
    value.map_or(true, |v| EMAIL_PATTERN.is_match(v))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CrudError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CrudError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(CrudError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Expected one of: {}", allowed.join(", ")),
    })
}
