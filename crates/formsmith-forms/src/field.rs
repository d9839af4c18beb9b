//! Field descriptors and per-field validation errors

use serde::{Deserialize, Serialize};

/// Length and pattern constraints shared by the text-like field types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConstraints {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	/// Regular expression source, matched anywhere in the value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pattern: Option<String>,
}

impl TextConstraints {
	/// Create constraints with nothing enforced
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::TextConstraints;
	///
	/// let constraints = TextConstraints::new().with_min_length(2).with_max_length(40);
	/// assert_eq!(constraints.min_length, Some(2));
	/// assert_eq!(constraints.max_length, Some(40));
	/// assert_eq!(constraints.pattern, None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.pattern = Some(pattern.into());
		self
	}
}

/// Inclusive bounds for number fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberConstraints {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
}

impl NumberConstraints {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
	pub label: String,
	/// String, number or boolean value submitted when the option is chosen
	pub value: serde_json::Value,
}

impl SelectOption {
	/// Create a new option
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::SelectOption;
	/// use serde_json::json;
	///
	/// let option = SelectOption::new("Admin", "admin");
	/// assert_eq!(option.label, "Admin");
	/// assert_eq!(option.value, json!("admin"));
	/// ```
	pub fn new(label: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

/// Field type together with the constraints that only make sense for it.
///
/// Serialized with an internal `type` tag, so `{"type": "number", "min": 1}`
/// and `{"type": "text", "minLength": 2}` both deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
	Text(TextConstraints),
	Email(TextConstraints),
	Password(TextConstraints),
	Textarea(TextConstraints),
	Date(TextConstraints),
	Number(NumberConstraints),
	Select {
		#[serde(default)]
		options: Vec<SelectOption>,
	},
	Checkbox,
}

impl FieldKind {
	/// Type name as used in descriptors and as the HTML input type
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, TextConstraints};
	///
	/// assert_eq!(FieldKind::Checkbox.type_name(), "checkbox");
	/// assert_eq!(FieldKind::Textarea(TextConstraints::new()).type_name(), "textarea");
	/// ```
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Text(_) => "text",
			Self::Email(_) => "email",
			Self::Password(_) => "password",
			Self::Textarea(_) => "textarea",
			Self::Date(_) => "date",
			Self::Number(_) => "number",
			Self::Select { .. } => "select",
			Self::Checkbox => "checkbox",
		}
	}

	/// Text constraints for the text-like kinds, `None` otherwise
	pub fn text_constraints(&self) -> Option<&TextConstraints> {
		match self {
			Self::Text(c) | Self::Email(c) | Self::Password(c) | Self::Textarea(c) | Self::Date(c) => {
				Some(c)
			}
			_ => None,
		}
	}

	pub fn is_checkbox(&self) -> bool {
		matches!(self, Self::Checkbox)
	}
}

/// Declarative description of one form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
	/// Unique key within a form
	pub name: String,
	#[serde(default)]
	pub label: String,
	#[serde(flatten)]
	pub kind: FieldKind,
	#[serde(default)]
	pub required: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub helper_text: Option<String>,
	/// Seed value, used verbatim even when falsy (`0`, `""`, `false`)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<serde_json::Value>,
}

impl FieldDescriptor {
	/// Create a new optional field
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FieldKind, NumberConstraints};
	///
	/// let field = FieldDescriptor::new(
	///     "age",
	///     "Age",
	///     FieldKind::Number(NumberConstraints::new().with_min(0.0)),
	/// );
	/// assert_eq!(field.name, "age");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			kind,
			required: false,
			placeholder: None,
			helper_text: None,
			default_value: None,
		}
	}

	pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Text(TextConstraints::new()))
	}

	pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Email(TextConstraints::new()))
	}

	pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Password(TextConstraints::new()))
	}

	pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Textarea(TextConstraints::new()))
	}

	pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Date(TextConstraints::new()))
	}

	pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Number(NumberConstraints::new()))
	}

	pub fn select(
		name: impl Into<String>,
		label: impl Into<String>,
		options: Vec<SelectOption>,
	) -> Self {
		Self::new(name, label, FieldKind::Select { options })
	}

	pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self::new(name, label, FieldKind::Checkbox)
	}

	/// Mark the field as required
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FieldDescriptor;
	///
	/// let field = FieldDescriptor::text("name", "Full name").required();
	/// assert!(field.required);
	/// ```
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_helper_text(mut self, helper_text: impl Into<String>) -> Self {
		self.helper_text = Some(helper_text.into());
		self
	}

	pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	/// Label used in messages; falls back to the field name when empty
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FieldDescriptor;
	///
	/// assert_eq!(FieldDescriptor::text("name", "Full name").display_label(), "Full name");
	/// assert_eq!(FieldDescriptor::text("name", "").display_label(), "name");
	/// ```
	pub fn display_label(&self) -> &str {
		if self.label.is_empty() {
			&self.name
		} else {
			&self.label
		}
	}
}

/// Classification of a field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Value fails a declared type or format check
	Shape,
	/// Length, range, pattern or option membership violated
	Constraint,
	/// Mandatory value missing or falsy
	Required,
}

/// A single field's validation failure. The `Display` output is the message
/// shown next to the field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("Required")]
	Required,
	#[error("{label} must be a number")]
	NotANumber { label: String },
	#[error("{label} must be ≥ {min}")]
	BelowMin { label: String, min: f64 },
	#[error("{label} must be ≤ {max}")]
	AboveMax { label: String, max: f64 },
	#[error("Invalid email address")]
	InvalidEmail,
	#[error("{label} must be a text value")]
	NotText { label: String },
	#[error("{label} must be at least {min} characters")]
	TooShort { label: String, min: usize },
	#[error("{label} must be at most {max} characters")]
	TooLong { label: String, max: usize },
	#[error("{label} is invalid")]
	PatternMismatch { label: String },
	#[error("{label} must be one of the following values: {}", .options.join(", "))]
	NotAnOption { label: String, options: Vec<String> },
}

impl FieldError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Required => ErrorKind::Required,
			Self::NotANumber { .. } | Self::InvalidEmail | Self::NotText { .. } => ErrorKind::Shape,
			Self::BelowMin { .. }
			| Self::AboveMax { .. }
			| Self::TooShort { .. }
			| Self::TooLong { .. }
			| Self::PatternMismatch { .. }
			| Self::NotAnOption { .. } => ErrorKind::Constraint,
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;
