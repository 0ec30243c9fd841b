//! Declarative per-field check chains

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidateLength;

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

/// A single check applied to a field value.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    NotEmpty,
    Alphanumeric,
    IsoDate,
    Identifier,
    OneOf(&'static [&'static str]),
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::NotEmpty => value.validate_length(Some(1), None, None),
            Check::Alphanumeric => ALPHANUMERIC.is_match(value),
            Check::IsoDate => parse_iso8601(value).is_some(),
            Check::Identifier => Uuid::parse_str(value).is_ok(),
            Check::OneOf(allowed) => allowed.iter().any(|a| *a == value),
        }
    }
}

/// Parse an ISO-8601 calendar date, with or without a time part.
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// One failed field, in the shape the form templates list them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub param: &'static str,
    pub msg: &'static str,
    pub value: String,
}

/// Ordered checks for one field. The first failing check's message wins.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    trim: bool,
    optional: bool,
    checks: Vec<(Check, &'static str)>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            trim: false,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Strip surrounding whitespace before any check runs.
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Skip the checks when the value is absent or empty.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push((check, message));
        self
    }

    /// Run the chain against one value, returning the (trimmed) value and
    /// the first failure if any.
    pub fn apply(&self, raw: Option<&str>) -> (String, Option<FieldError>) {
        let raw = raw.unwrap_or_default();
        let value = if self.trim { raw.trim() } else { raw }.to_string();

        if self.optional && value.is_empty() {
            return (value, None);
        }

        let failure = self
            .checks
            .iter()
            .find(|(check, _)| !check.passes(&value))
            .map(|(_, msg)| FieldError {
                param: self.field,
                msg: *msg,
                value: value.clone(),
            });
        (value, failure)
    }
}

/// Collects failures across independent fields, in the order they are checked.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, rule: &FieldRule, raw: Option<&str>) -> String {
        let (value, failure) = rule.apply(raw);
        self.errors.extend(failure);
        value
    }

    /// Check every element of a multi-valued field. One failure is reported
    /// per field, like a scalar field.
    pub fn each(&mut self, rule: &FieldRule, values: Vec<String>) -> Vec<String> {
        let mut reported = false;
        values
            .into_iter()
            .map(|raw| {
                let (value, failure) = rule.apply(Some(&raw));
                if let Some(failure) = failure {
                    if !reported {
                        self.errors.push(failure);
                        reported = true;
                    }
                }
                value
            })
            .collect()
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_rule() -> FieldRule {
        FieldRule::new("first_name")
            .trim()
            .check(Check::NotEmpty, "First name must be specified.")
            .check(Check::Alphanumeric, "First name has non-alphanumeric characters.")
    }

    #[test]
    fn first_failing_check_wins() {
        let (_, failure) = name_rule().apply(Some("   "));
        assert_eq!(failure.map(|f| f.msg), Some("First name must be specified."));

        let (_, failure) = name_rule().apply(Some("Jo hn"));
        assert_eq!(failure.map(|f| f.msg), Some("First name has non-alphanumeric characters."));

        let (value, failure) = name_rule().apply(Some("  John "));
        assert_eq!(value, "John");
        assert!(failure.is_none());
    }

    #[test]
    fn optional_fields_accept_empty_values() {
        let rule = FieldRule::new("date_of_birth")
            .optional()
            .check(Check::IsoDate, "Invalid date of birth");
        assert!(rule.apply(None).1.is_none());
        assert!(rule.apply(Some("")).1.is_none());
        assert!(rule.apply(Some("1920-01-02")).1.is_none());
        assert_eq!(rule.apply(Some("02/01/1920")).1.map(|f| f.msg), Some("Invalid date of birth"));
    }

    #[test]
    fn validator_collects_failures_in_field_order() {
        let family = FieldRule::new("family_name")
            .trim()
            .check(Check::NotEmpty, "Family name must be specified.");
        let mut v = Validator::new();
        v.field(&name_rule(), Some(""));
        v.field(&family, None);
        let errors = v.finish().unwrap_err();
        let params: Vec<_> = errors.iter().map(|e| e.param).collect();
        assert_eq!(params, vec!["first_name", "family_name"]);
    }

    #[test]
    fn passing_fields_raise_nothing() {
        let mut v = Validator::new();
        v.field(&name_rule(), Some("Isaac"));
        assert!(v.finish().is_ok());
    }

    #[test]
    fn each_reports_one_failure_per_field() {
        let rule = FieldRule::new("genre").check(Check::Identifier, "Genre must be a valid identifier.");
        let mut v = Validator::new();
        let values = v.each(&rule, vec!["nope".into(), "also-nope".into()]);
        assert_eq!(values.len(), 2);
        assert_eq!(v.finish().unwrap_err().len(), 1);
    }

    #[test]
    fn iso8601_accepts_datetimes() {
        let expected = NaiveDate::from_ymd_opt(1965, 8, 1);
        assert_eq!(parse_iso8601("1965-08-01"), expected);
        assert_eq!(parse_iso8601("1965-08-01T10:00:00Z"), expected);
        assert_eq!(parse_iso8601("1965-08-01T10:00"), expected);
        assert_eq!(parse_iso8601("1965-13-01"), None);
    }
}
