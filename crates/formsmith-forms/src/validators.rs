//! Shape validators used by compiled field rules
//!
//! This module provides the email shape check, compiled `pattern`
//! constraints and number parsing for form values.

use crate::field::{FieldError, FieldResult};
use regex::Regex;
use std::sync::LazyLock;

// Local part, a single `@`, and a dotted domain; no whitespace anywhere.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Validates that a string has the shape of an email address.
///
/// # Examples
///
/// ```
/// use formsmith_forms::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("a@b.com").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// assert!(validator.validate("user@").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}

	pub fn validate(&self, value: &str) -> FieldResult<()> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			Err(FieldError::InvalidEmail)
		}
	}
}

/// A compiled `pattern` constraint.
///
/// Matching is unanchored: the pattern must match somewhere in the value, so
/// descriptors anchor with `^`/`$` when they need a full match. The dialect
/// includes look-around and backreferences. Two patterns compare equal when
/// their sources are equal.
#[derive(Debug, Clone)]
pub struct Pattern(fancy_regex::Regex);

impl Pattern {
	/// Compile a pattern
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::Pattern;
	///
	/// let pattern = Pattern::new("^[A-Z].+$").unwrap();
	/// assert!(pattern.is_match("Hello"));
	/// assert!(!pattern.is_match("hello"));
	/// assert!(Pattern::new("(unclosed").is_err());
	///
	/// let strong = Pattern::new("^(?=.*[0-9]).{8,}$").unwrap();
	/// assert!(strong.is_match("abcdefg1"));
	/// ```
	pub fn new(source: &str) -> Result<Self, fancy_regex::Error> {
		fancy_regex::Regex::new(source).map(Self)
	}

	pub fn as_str(&self) -> &str {
		self.0.as_str()
	}

	/// A match attempt that exceeds the backtracking limit counts as no match
	pub fn is_match(&self, value: &str) -> bool {
		self.0.is_match(value).unwrap_or(false)
	}
}

impl PartialEq for Pattern {
	fn eq(&self, other: &Self) -> bool {
		self.as_str() == other.as_str()
	}
}

/// Interpret a form value as a finite number.
///
/// JSON numbers are taken as is; strings are trimmed and parsed as decimals.
/// Everything else, including `NaN` and infinities, is not a number.
///
/// # Examples
///
/// ```
/// use formsmith_forms::parse_number;
/// use serde_json::json;
///
/// assert_eq!(parse_number(&json!(3)), Some(3.0));
/// assert_eq!(parse_number(&json!(" 2.5 ")), Some(2.5));
/// assert_eq!(parse_number(&json!("abc")), None);
/// assert_eq!(parse_number(&json!("inf")), None);
/// assert_eq!(parse_number(&json!(true)), None);
/// ```
pub fn parse_number(value: &serde_json::Value) -> Option<f64> {
	let number = match value {
		serde_json::Value::Number(n) => n.as_f64()?,
		serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
		_ => return None,
	};
	number.is_finite().then_some(number)
}
