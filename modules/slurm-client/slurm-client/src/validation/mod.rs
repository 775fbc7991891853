//! Input validation, run before any wire call.
//!
//! Every check fails fast: the first violated rule is reported and nothing
//! else is evaluated. Required-field and at-least-one-of rules live in the
//! generated [`rules`] module; cross-field rules in [`domain`].

use chrono::{DateTime, Utc};
use slurm_client_sdk::{Origin, SlurmError};
use thiserror::Error;

pub mod domain;
pub mod rules;

/// How a required field was found missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    EmptyString,
    ZeroTime,
    EmptySlice,
    Nil,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Violation {
    pub field: Option<&'static str>,
    pub check: Option<Check>,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(field: Option<&'static str>, message: impl Into<String>) -> Self {
        Self {
            field,
            check: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn into_error(self, origin: Origin) -> SlurmError {
        SlurmError::validation(origin, self.field, self.message)
    }
}

pub trait Validate {
    /// # Errors
    /// Returns the first rule the input violates.
    fn validate(&self) -> Result<(), Violation>;
}

/// Values a required-field rule can inspect.
pub trait Presence {
    /// The check that failed, or `None` when the value is present.
    fn missing(&self) -> Option<Check>;
}

impl Presence for str {
    fn missing(&self) -> Option<Check> {
        self.trim().is_empty().then_some(Check::EmptyString)
    }
}

impl Presence for String {
    fn missing(&self) -> Option<Check> {
        self.as_str().missing()
    }
}

impl<T> Presence for Vec<T> {
    fn missing(&self) -> Option<Check> {
        self.is_empty().then_some(Check::EmptySlice)
    }
}

impl Presence for DateTime<Utc> {
    fn missing(&self) -> Option<Check> {
        (self.timestamp() == 0).then_some(Check::ZeroTime)
    }
}

impl Presence for u32 {
    fn missing(&self) -> Option<Check> {
        None
    }
}

impl<T: Presence> Presence for Option<T> {
    fn missing(&self) -> Option<Check> {
        match self {
            Some(v) => v.missing(),
            None => Some(Check::Nil),
        }
    }
}

/// # Errors
/// Returns `"<field> is required"` when `value` is missing.
pub fn require<T: Presence + ?Sized>(field: &'static str, value: &T) -> Result<(), Violation> {
    match value.missing() {
        Some(check) => Err(Violation {
            field: Some(field),
            check: Some(check),
            message: format!("{field} is required"),
        }),
        None => Ok(()),
    }
}

/// # Errors
/// Returns a violation when no flag is set.
pub fn at_least_one(fields: &[(&'static str, bool)]) -> Result<(), Violation> {
    if fields.iter().any(|(_, set)| *set) {
        return Ok(());
    }
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    Err(Violation::new(
        None,
        format!("at least one of {} must be set", names.join(", ")),
    ))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn presence_checks() {
        assert_eq!(require("name", "  ").unwrap_err().check, Some(Check::EmptyString));
        assert_eq!(
            require::<Vec<String>>("users", &vec![]).unwrap_err().check,
            Some(Check::EmptySlice)
        );
        assert_eq!(require::<Option<u32>>("min", &None).unwrap_err().check, Some(Check::Nil));
        let epoch = DateTime::<Utc>::from_timestamp(0, 0);
        assert_eq!(require("start_time", &epoch).unwrap_err().check, Some(Check::ZeroTime));
        assert!(require("min", &Some(0_u32)).is_ok());
    }

    #[test]
    fn require_names_the_field() {
        let v = require("script", "").unwrap_err();
        assert_eq!(v.field, Some("script"));
        assert_eq!(v.to_string(), "script is required");
    }

    #[test]
    fn at_least_one_lists_candidates() {
        assert!(at_least_one(&[("a", false), ("b", true)]).is_ok());
        let v = at_least_one(&[("reason", false), ("state", false)]).unwrap_err();
        assert_eq!(v.to_string(), "at least one of reason, state must be set");
        assert_eq!(v.field, None);
    }
}
