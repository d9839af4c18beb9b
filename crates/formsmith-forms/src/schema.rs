//! Compilation of field descriptors into validation rules and defaults
//!
//! [`compile`] is pure: the same descriptor always yields an equal
//! [`CompiledForm`], and nothing is cached between calls.
//!
//! ## Check order
//!
//! For every field the compiled [`FieldRule`] runs:
//!
//! 1. Required check. A missing value (absent, `null`, `""`, or `false` for a
//!    checkbox) fails with [`FieldError::Required`] when the field is
//!    required and passes silently otherwise.
//! 2. Shape check (number parsing, email shape, text value).
//! 3. Constraint checks in declaration order: min length, max length,
//!    pattern for text; min, max for numbers; option membership for selects.
//!
//! Only the first failure is reported for a field.

use crate::field::{FieldDescriptor, FieldError, FieldKind, FieldResult, TextConstraints};
use crate::form::{FormDescriptor, FormError, FormResult};
use crate::validators::{EmailValidator, Pattern, parse_number};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Field name to value.
pub type FormValues = HashMap<String, Value>;

/// Compiled length and pattern checks of a text-like field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRule {
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub pattern: Option<Pattern>,
}

impl TextRule {
	fn compile(field: &FieldDescriptor, constraints: &TextConstraints) -> FormResult<Self> {
		if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length)
			&& min > max
		{
			return Err(FormError::InvalidBounds {
				field: field.name.clone(),
				message: format!("minLength {} is greater than maxLength {}", min, max),
			});
		}

		let pattern = constraints
			.pattern
			.as_deref()
			.map(Pattern::new)
			.transpose()
			.map_err(|e| FormError::InvalidPattern {
				field: field.name.clone(),
				message: e.to_string(),
			})?;

		Ok(Self {
			min_length: constraints.min_length,
			max_length: constraints.max_length,
			pattern,
		})
	}

	fn check(&self, value: &str, label: &str) -> FieldResult<()> {
		// Character count, not byte count
		let length = value.chars().count();
		if let Some(min) = self.min_length
			&& length < min
		{
			return Err(FieldError::TooShort {
				label: label.to_string(),
				min,
			});
		}
		if let Some(max) = self.max_length
			&& length > max
		{
			return Err(FieldError::TooLong {
				label: label.to_string(),
				max,
			});
		}
		if let Some(pattern) = &self.pattern
			&& !pattern.is_match(value)
		{
			return Err(FieldError::PatternMismatch {
				label: label.to_string(),
			});
		}
		Ok(())
	}
}

/// Type-specific part of a compiled rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
	/// Text, password, textarea and date fields
	Text(TextRule),
	Email(TextRule),
	Number { min: Option<f64>, max: Option<f64> },
	Select { options: Vec<Value> },
	Checkbox,
}

/// Composed validation rule for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
	pub name: String,
	/// Label used in messages (already resolved to the name when empty)
	pub label: String,
	pub required: bool,
	pub kind: RuleKind,
}

impl FieldRule {
	/// Compile the rule for one descriptor
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FieldRule};
	/// use serde_json::json;
	///
	/// let rule = FieldRule::compile(&FieldDescriptor::email("email", "Email").required()).unwrap();
	/// assert!(rule.check(Some(&json!("a@b.com"))).is_ok());
	/// assert_eq!(rule.check(Some(&json!(""))).unwrap_err().to_string(), "Required");
	/// ```
	pub fn compile(field: &FieldDescriptor) -> FormResult<Self> {
		let kind = match &field.kind {
			FieldKind::Number(constraints) => {
				if let (Some(min), Some(max)) = (constraints.min, constraints.max)
					&& min > max
				{
					return Err(FormError::InvalidBounds {
						field: field.name.clone(),
						message: format!("min {} is greater than max {}", min, max),
					});
				}
				RuleKind::Number {
					min: constraints.min,
					max: constraints.max,
				}
			}
			FieldKind::Email(constraints) => RuleKind::Email(TextRule::compile(field, constraints)?),
			FieldKind::Text(constraints)
			| FieldKind::Password(constraints)
			| FieldKind::Textarea(constraints)
			| FieldKind::Date(constraints) => RuleKind::Text(TextRule::compile(field, constraints)?),
			FieldKind::Select { options } => RuleKind::Select {
				options: options.iter().map(|o| o.value.clone()).collect(),
			},
			FieldKind::Checkbox => RuleKind::Checkbox,
		};

		Ok(Self {
			name: field.name.clone(),
			label: field.display_label().to_string(),
			required: field.required,
			kind,
		})
	}

	/// Check a value against this rule, reporting the first failure
	pub fn check(&self, value: Option<&Value>) -> FieldResult<()> {
		let value = match value {
			Some(v) if !self.is_missing(v) => v,
			_ if self.required => return Err(FieldError::Required),
			_ => return Ok(()),
		};

		match &self.kind {
			RuleKind::Number { min, max } => {
				let number = parse_number(value).ok_or_else(|| FieldError::NotANumber {
					label: self.label.clone(),
				})?;
				if let Some(min) = *min
					&& number < min
				{
					return Err(FieldError::BelowMin {
						label: self.label.clone(),
						min,
					});
				}
				if let Some(max) = *max
					&& number > max
				{
					return Err(FieldError::AboveMax {
						label: self.label.clone(),
						max,
					});
				}
				Ok(())
			}
			RuleKind::Email(rule) => {
				let text = self.as_text(value)?;
				EmailValidator::new().validate(&text)?;
				rule.check(&text, &self.label)
			}
			RuleKind::Text(rule) => {
				let text = self.as_text(value)?;
				rule.check(&text, &self.label)
			}
			RuleKind::Select { options } => {
				if options.iter().any(|option| option_matches(option, value)) {
					Ok(())
				} else {
					Err(FieldError::NotAnOption {
						label: self.label.clone(),
						options: options.iter().map(display_value).collect(),
					})
				}
			}
			RuleKind::Checkbox => Ok(()),
		}
	}

	fn is_missing(&self, value: &Value) -> bool {
		match value {
			Value::Null => true,
			Value::String(s) => s.is_empty(),
			Value::Bool(false) => matches!(self.kind, RuleKind::Checkbox),
			_ => false,
		}
	}

	fn as_text(&self, value: &Value) -> FieldResult<String> {
		match value {
			Value::String(s) => Ok(s.clone()),
			Value::Number(n) => Ok(n.to_string()),
			Value::Bool(b) => Ok(b.to_string()),
			_ => Err(FieldError::NotText {
				label: self.label.clone(),
			}),
		}
	}
}

// A select control reports its value as a string, so `"1"` matches option `1`.
fn option_matches(option: &Value, value: &Value) -> bool {
	option == value || display_value(option) == display_value(value)
}

fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Per-field validation failures, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
	errors: HashMap<String, FieldError>,
}

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.errors.len()
	}

	pub fn get(&self, name: &str) -> Option<&FieldError> {
		self.errors.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.errors.contains_key(name)
	}

	/// Display message of a field's error
	pub fn message(&self, name: &str) -> Option<String> {
		self.errors.get(name).map(ToString::to_string)
	}

	pub fn insert(&mut self, name: impl Into<String>, error: FieldError) {
		self.errors.insert(name.into(), error);
	}

	pub fn remove(&mut self, name: &str) -> Option<FieldError> {
		self.errors.remove(name)
	}

	pub fn clear(&mut self) {
		self.errors.clear();
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
		self.errors.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Field name to display message
	pub fn messages(&self) -> HashMap<String, String> {
		self.errors
			.iter()
			.map(|(k, v)| (k.clone(), v.to_string()))
			.collect()
	}
}

/// Compiled rules for a whole form, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRuleset {
	rules: Vec<FieldRule>,
}

impl ValidationRuleset {
	pub fn get(&self, name: &str) -> Option<&FieldRule> {
		self.rules.iter().find(|r| r.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
		self.rules.iter()
	}

	/// Field names in descriptor order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.rules.iter().map(|r| r.name.as_str())
	}

	/// Validate a value map against every rule
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FieldKind, NumberConstraints, compile_ruleset};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let ruleset = compile_ruleset(&[FieldDescriptor::new(
	///     "rating",
	///     "Rating",
	///     FieldKind::Number(NumberConstraints::new().with_min(1.0).with_max(5.0)),
	/// )])
	/// .unwrap();
	///
	/// let mut values = HashMap::new();
	/// values.insert("rating".to_string(), json!(10));
	/// let errors = ruleset.validate(&values);
	/// assert_eq!(errors.message("rating").as_deref(), Some("Rating must be ≤ 5"));
	///
	/// values.insert("rating".to_string(), json!(3));
	/// assert!(ruleset.validate(&values).is_empty());
	/// ```
	pub fn validate(&self, values: &FormValues) -> ValidationErrors {
		let mut errors = ValidationErrors::new();
		for rule in &self.rules {
			if let Err(e) = rule.check(values.get(&rule.name)) {
				errors.insert(rule.name.clone(), e);
			}
		}
		errors
	}

	/// Validate a single field. Returns `None` for unknown names.
	pub fn validate_field(&self, name: &str, value: Option<&Value>) -> Option<FieldResult<()>> {
		self.get(name).map(|rule| rule.check(value))
	}
}

/// Output of [`compile`]: the ruleset and the initial value map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledForm {
	pub ruleset: ValidationRuleset,
	pub defaults: FormValues,
}

/// Compile a descriptor into its ruleset and initial values
///
/// External `initial_values` on the descriptor replace the derived defaults
/// entirely; they are not merged.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FieldDescriptor, FormDescriptor, compile};
///
/// let form = FormDescriptor::new(vec![
///     FieldDescriptor::text("name", "Name"),
///     FieldDescriptor::text("name", "Name again"),
/// ]);
/// assert!(compile(&form).is_err());
/// ```
pub fn compile(form: &FormDescriptor) -> FormResult<CompiledForm> {
	let ruleset = compile_ruleset(&form.fields)?;
	let defaults = match &form.initial_values {
		Some(values) => values.clone(),
		None => derive_defaults(&form.fields),
	};
	Ok(CompiledForm { ruleset, defaults })
}

/// Compile one rule per field, rejecting empty or duplicate names
pub fn compile_ruleset(fields: &[FieldDescriptor]) -> FormResult<ValidationRuleset> {
	let mut seen = HashSet::new();
	let mut rules = Vec::with_capacity(fields.len());
	for (position, field) in fields.iter().enumerate() {
		if field.name.is_empty() {
			return Err(FormError::EmptyFieldName(position));
		}
		if !seen.insert(field.name.as_str()) {
			return Err(FormError::DuplicateField(field.name.clone()));
		}
		rules.push(FieldRule::compile(field)?);
	}
	Ok(ValidationRuleset { rules })
}

/// Derive the initial value of every field
///
/// An explicit `default_value` wins, even when falsy; otherwise checkboxes
/// start at `false` and everything else at `""`.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FieldDescriptor, derive_defaults};
/// use serde_json::json;
///
/// let defaults = derive_defaults(&[
///     FieldDescriptor::number("count", "Count").with_default(0),
///     FieldDescriptor::checkbox("subscribe", "Subscribe"),
///     FieldDescriptor::text("subject", "Subject"),
/// ]);
/// assert_eq!(defaults["count"], json!(0));
/// assert_eq!(defaults["subscribe"], json!(false));
/// assert_eq!(defaults["subject"], json!(""));
/// ```
pub fn derive_defaults(fields: &[FieldDescriptor]) -> FormValues {
	fields
		.iter()
		.map(|field| {
			let value = match &field.default_value {
				Some(value) => value.clone(),
				None if field.kind.is_checkbox() => Value::Bool(false),
				None => Value::String(String::new()),
			};
			(field.name.clone(), value)
		})
		.collect()
}
