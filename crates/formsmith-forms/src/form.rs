//! Form descriptors and configuration errors

use crate::field::FieldDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Submit button text used when a descriptor does not provide one.
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// Configuration errors raised while compiling a descriptor or driving a
/// session. Field validation failures are never reported through this type.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Duplicate field name: {0}")]
	DuplicateField(String),
	#[error("Field at position {0} has an empty name")]
	EmptyFieldName(usize),
	#[error("Invalid pattern for field {field}: {message}")]
	InvalidPattern { field: String, message: String },
	#[error("Invalid bounds for field {field}: {message}")]
	InvalidBounds { field: String, message: String },
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("Form is being submitted")]
	Submitting,
	#[error("Invalid form descriptor: {0}")]
	Deserialize(#[from] serde_json::Error),
}

pub type FormResult<T> = Result<T, FormError>;

/// Ordered list of field descriptors plus form-level presentation.
///
/// Field order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub submit_label: Option<String>,
	#[serde(default)]
	pub fields: Vec<FieldDescriptor>,
	/// Externally supplied initial values. When present they replace the
	/// derived defaults entirely.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub initial_values: Option<HashMap<String, serde_json::Value>>,
}

impl FormDescriptor {
	/// Create a descriptor from an ordered field list
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FormDescriptor};
	///
	/// let form = FormDescriptor::new(vec![FieldDescriptor::text("subject", "Subject")])
	///     .with_title("Contact Us")
	///     .with_submit_label("Send Message");
	/// assert_eq!(form.fields.len(), 1);
	/// assert_eq!(form.submit_label(), "Send Message");
	/// ```
	pub fn new(fields: Vec<FieldDescriptor>) -> Self {
		Self {
			fields,
			..Self::default()
		}
	}

	/// Parse a descriptor from its JSON form
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormDescriptor;
	///
	/// let form = FormDescriptor::from_json(r#"{
	///     "title": "Newsletter",
	///     "fields": [{"name": "email", "label": "Email", "type": "email", "required": true}]
	/// }"#).unwrap();
	/// assert_eq!(form.title.as_deref(), Some("Newsletter"));
	/// assert!(form.fields[0].required);
	/// ```
	pub fn from_json(json: &str) -> FormResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
		self.submit_label = Some(label.into());
		self
	}

	pub fn with_initial_values(mut self, values: HashMap<String, serde_json::Value>) -> Self {
		self.initial_values = Some(values);
		self
	}

	pub fn add_field(&mut self, field: FieldDescriptor) {
		self.fields.push(field);
	}

	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn submit_label(&self) -> &str {
		self.submit_label.as_deref().unwrap_or(DEFAULT_SUBMIT_LABEL)
	}
}
