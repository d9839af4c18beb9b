//! Control mapping and HTML rendering
//!
//! A [`FormView`] is a snapshot of a form as a flat list of [`Control`]s, one
//! per declared field and in declaration order. It can be produced from a
//! live session (`FormSession::view`) or straight from a descriptor, and
//! rendered to plain HTML with [`FormView::to_html`].

use formsmith_forms::{
	FieldDescriptor, FieldKind, FormDescriptor, FormResult, FormSettings, FormValues, compile,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Widget type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetType {
	/// Text input field
	TextInput,
	/// Password input field
	PasswordInput,
	/// Email input field
	EmailInput,
	/// Number input field
	NumberInput,
	/// Date input field
	DateInput,
	/// Textarea (multiline text)
	Textarea,
	/// Checkbox input
	Checkbox,
	/// Select dropdown
	Select,
}

impl WidgetType {
	/// Widget used for a field kind
	pub fn for_kind(kind: &FieldKind) -> Self {
		match kind {
			FieldKind::Text(_) => Self::TextInput,
			FieldKind::Email(_) => Self::EmailInput,
			FieldKind::Password(_) => Self::PasswordInput,
			FieldKind::Textarea(_) => Self::Textarea,
			FieldKind::Date(_) => Self::DateInput,
			FieldKind::Number(_) => Self::NumberInput,
			FieldKind::Select { .. } => Self::Select,
			FieldKind::Checkbox => Self::Checkbox,
		}
	}

	/// `type` attribute of `<input>` widgets
	pub fn input_type(&self) -> Option<&'static str> {
		match self {
			Self::TextInput => Some("text"),
			Self::PasswordInput => Some("password"),
			Self::EmailInput => Some("email"),
			Self::NumberInput => Some("number"),
			Self::DateInput => Some("date"),
			Self::Checkbox => Some("checkbox"),
			Self::Textarea | Self::Select => None,
		}
	}

	/// Whether the widget carries a `placeholder` attribute
	///
	/// Selects show their placeholder as a leading disabled option instead.
	pub fn accepts_placeholder(&self) -> bool {
		matches!(
			self,
			Self::TextInput
				| Self::PasswordInput
				| Self::EmailInput
				| Self::NumberInput
				| Self::Textarea
		)
	}
}

/// One `(label, value)` choice of a select control, value already rendered
/// as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlOption {
	pub label: String,
	pub value: String,
	pub selected: bool,
}

/// A renderable control bound to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
	pub name: String,
	pub label: String,
	pub required: bool,
	pub widget: WidgetType,
	/// Current value as text; empty for checkboxes
	pub value: String,
	/// Checked state; only meaningful for checkboxes
	pub checked: bool,
	pub options: Vec<ControlOption>,
	pub helper_text: Option<String>,
	pub placeholder: Option<String>,
	/// Minimum visible rows; set for textareas only
	pub min_rows: Option<u32>,
	/// Keep the label above the input even when empty (date inputs)
	pub shrink_label: bool,
	/// Error message displayed under the control
	pub error: Option<String>,
}

impl Control {
	fn build(
		field: &FieldDescriptor,
		value: Option<&Value>,
		error: Option<&String>,
		settings: &FormSettings,
	) -> Self {
		let widget = WidgetType::for_kind(&field.kind);
		let text = value.map(value_text).unwrap_or_default();
		let options = match &field.kind {
			FieldKind::Select { options } => options
				.iter()
				.map(|option| {
					let option_value = value_text(&option.value);
					ControlOption {
						label: option.label.clone(),
						selected: !text.is_empty() && option_value == text,
						value: option_value,
					}
				})
				.collect(),
			_ => Vec::new(),
		};

		Self {
			name: field.name.clone(),
			label: field.display_label().to_string(),
			required: field.required,
			widget,
			checked: widget == WidgetType::Checkbox && value == Some(&Value::Bool(true)),
			value: if widget == WidgetType::Checkbox {
				String::new()
			} else {
				text
			},
			options,
			helper_text: field.helper_text.clone(),
			placeholder: field.placeholder.clone(),
			min_rows: (widget == WidgetType::Textarea).then_some(settings.textarea_min_rows),
			shrink_label: widget == WidgetType::DateInput,
			error: error.cloned(),
		}
	}

	/// Render the control, its helper text and its error
	///
	/// The element id is `{id_prefix}-{name}`, so controls of different forms
	/// on one page never share an id.
	pub fn to_html(&self, id_prefix: &str, disabled: bool) -> String {
		let name = html_escape(&self.name);
		let label = html_escape(&self.label);
		let id = format!("{}-{}", html_escape(id_prefix), name);
		let mut attrs = format!(r#"id="{}" name="{}""#, id, name);
		if self.required {
			attrs.push_str(" required");
		}
		if disabled {
			attrs.push_str(" disabled");
		}
		if let Some(placeholder) = &self.placeholder
			&& self.widget.accepts_placeholder()
		{
			attrs.push_str(&format!(r#" placeholder="{}""#, html_escape(placeholder)));
		}
		if self.error.is_some() {
			attrs.push_str(r#" aria-invalid="true""#);
		}

		let mut html = String::from(r#"<div class="form-field">"#);
		match self.widget {
			WidgetType::Checkbox => {
				html.push_str(&format!(r#"<input type="checkbox" {}"#, attrs));
				if self.checked {
					html.push_str(" checked");
				}
				html.push_str(&format!(r#"><label for="{}">{}</label>"#, id, label));
			}
			WidgetType::Select => {
				html.push_str(&format!(r#"<label for="{}">{}</label>"#, id, label));
				html.push_str(&format!("<select {}>", attrs));
				if let Some(placeholder) = &self.placeholder {
					html.push_str(r#"<option value="" disabled"#);
					if !self.options.iter().any(|o| o.selected) {
						html.push_str(" selected");
					}
					html.push('>');
					html.push_str(&html_escape(placeholder));
					html.push_str("</option>");
				}
				for option in &self.options {
					html.push_str(&format!(
						r#"<option value="{}""#,
						html_escape(&option.value)
					));
					if option.selected {
						html.push_str(" selected");
					}
					html.push('>');
					html.push_str(&html_escape(&option.label));
					html.push_str("</option>");
				}
				html.push_str("</select>");
			}
			WidgetType::Textarea => {
				html.push_str(&format!(r#"<label for="{}">{}</label>"#, id, label));
				html.push_str(&format!(
					r#"<textarea {} rows="{}">{}</textarea>"#,
					attrs,
					self.min_rows.unwrap_or(1),
					html_escape(&self.value)
				));
			}
			widget => {
				let class = if self.shrink_label {
					r#" class="shrink""#
				} else {
					""
				};
				html.push_str(&format!(
					r#"<label for="{}"{}>{}</label>"#,
					id, class, label
				));
				html.push_str(&format!(
					r#"<input type="{}" {} value="{}">"#,
					widget.input_type().unwrap_or("text"),
					attrs,
					html_escape(&self.value)
				));
			}
		}
		if let Some(helper) = &self.helper_text {
			html.push_str(&format!(
				r#"<p class="helper-text">{}</p>"#,
				html_escape(helper)
			));
		}
		if let Some(error) = &self.error {
			html.push_str(&format!(r#"<p class="error">{}</p>"#, html_escape(error)));
		}
		html.push_str("</div>");
		html
	}
}

/// Snapshot of a whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormView {
	/// Id of the `<form>` element and prefix of every control id
	pub id_prefix: String,
	pub title: Option<String>,
	pub submit_label: String,
	/// Submit button and inputs are disabled while a submission is in flight
	pub submitting: bool,
	pub width: u32,
	pub controls: Vec<Control>,
}

impl FormView {
	/// Build a view of a descriptor with its initial values and no errors
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FormDescriptor, FormSettings};
	/// use formsmith_pages::{FormView, WidgetType};
	///
	/// let descriptor = FormDescriptor::new(vec![FieldDescriptor::date("dob", "Date of birth")]);
	/// let view = FormView::from_descriptor(&descriptor, &FormSettings::default()).unwrap();
	///
	/// assert_eq!(view.controls[0].widget, WidgetType::DateInput);
	/// assert!(view.controls[0].shrink_label);
	/// assert_eq!(view.submit_label, "Submit");
	/// ```
	pub fn from_descriptor(
		descriptor: &FormDescriptor,
		settings: &FormSettings,
	) -> FormResult<Self> {
		let compiled = compile(descriptor)?;
		Ok(build_view(
			descriptor,
			&compiled.defaults,
			&HashMap::new(),
			settings,
			false,
		))
	}

	/// Override the id prefix, for pages holding forms with the same title
	pub fn with_id_prefix(mut self, id_prefix: impl Into<String>) -> Self {
		self.id_prefix = id_prefix.into();
		self
	}

	pub fn control(&self, name: &str) -> Option<&Control> {
		self.controls.iter().find(|c| c.name == name)
	}

	/// Render the form as an HTML fragment
	pub fn to_html(&self) -> String {
		let mut html = format!(
			r#"<form id="{}" class="formsmith-form" style="max-width: {}px" novalidate>"#,
			html_escape(&self.id_prefix),
			self.width
		);
		if let Some(title) = &self.title {
			html.push_str(&format!("<h2>{}</h2>", html_escape(title)));
		}
		for control in &self.controls {
			html.push_str(&control.to_html(&self.id_prefix, self.submitting));
		}
		html.push_str(r#"<button type="submit""#);
		if self.submitting {
			html.push_str(" disabled");
		}
		html.push('>');
		html.push_str(&html_escape(&self.submit_label));
		html.push_str("</button></form>");
		html
	}
}

pub(crate) fn build_view(
	descriptor: &FormDescriptor,
	values: &FormValues,
	errors: &HashMap<String, String>,
	settings: &FormSettings,
	submitting: bool,
) -> FormView {
	FormView {
		id_prefix: descriptor
			.title
			.as_deref()
			.map(slugify)
			.filter(|slug| !slug.is_empty())
			.unwrap_or_else(|| DEFAULT_ID_PREFIX.to_string()),
		title: descriptor.title.clone(),
		submit_label: descriptor.submit_label().to_string(),
		submitting,
		width: settings.width,
		controls: descriptor
			.fields
			.iter()
			.map(|field| {
				Control::build(
					field,
					values.get(&field.name),
					errors.get(&field.name),
					settings,
				)
			})
			.collect(),
	}
}

/// Id prefix of forms without a title.
pub const DEFAULT_ID_PREFIX: &str = "form";

// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(title: &str) -> String {
	title
		.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|part| !part.is_empty())
		.map(str::to_ascii_lowercase)
		.collect::<Vec<_>>()
		.join("-")
}

fn value_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// HTML escape utility
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
	use super::*;
	use formsmith_forms::{SelectOption, TextConstraints};
	use rstest::rstest;
	use serde_json::json;

	fn view_of(fields: Vec<FieldDescriptor>) -> FormView {
		FormView::from_descriptor(&FormDescriptor::new(fields), &FormSettings::default()).unwrap()
	}

	#[rstest]
	#[case(FieldDescriptor::text("a", "A"), WidgetType::TextInput)]
	#[case(FieldDescriptor::email("a", "A"), WidgetType::EmailInput)]
	#[case(FieldDescriptor::password("a", "A"), WidgetType::PasswordInput)]
	#[case(FieldDescriptor::number("a", "A"), WidgetType::NumberInput)]
	#[case(FieldDescriptor::date("a", "A"), WidgetType::DateInput)]
	#[case(FieldDescriptor::textarea("a", "A"), WidgetType::Textarea)]
	#[case(FieldDescriptor::checkbox("a", "A"), WidgetType::Checkbox)]
	#[case(FieldDescriptor::select("a", "A", vec![]), WidgetType::Select)]
	fn test_widget_for_field(#[case] field: FieldDescriptor, #[case] expected: WidgetType) {
		assert_eq!(view_of(vec![field]).controls[0].widget, expected);
	}

	#[rstest]
	fn test_textarea_rows_from_settings() {
		let field = FieldDescriptor::new(
			"message",
			"Message",
			FieldKind::Textarea(TextConstraints::new().with_min_length(10)),
		);
		let settings = FormSettings {
			textarea_min_rows: 5,
			..FormSettings::default()
		};

		let view =
			FormView::from_descriptor(&FormDescriptor::new(vec![field]), &settings).unwrap();

		assert_eq!(view.controls[0].min_rows, Some(5));
		assert!(view.to_html().contains(r#"rows="5""#));
	}

	#[rstest]
	fn test_select_marks_current_option() {
		let field = FieldDescriptor::select(
			"role",
			"Role",
			vec![SelectOption::new("User", "user"), SelectOption::new("Admin", "admin")],
		)
		.with_default("admin")
		.with_helper_text("Choose your role");

		let view = view_of(vec![field]);
		let control = view.control("role").unwrap();

		assert_eq!(control.options.len(), 2);
		assert!(!control.options[0].selected);
		assert!(control.options[1].selected);
		let html = view.to_html();
		assert!(html.contains(r#"<option value="admin" selected>Admin</option>"#));
		assert!(html.contains(r#"<p class="helper-text">Choose your role</p>"#));
	}

	#[rstest]
	fn test_numeric_option_values_render_as_text() {
		let field = FieldDescriptor::select("level", "Level", vec![SelectOption::new("One", 1)])
			.with_default(json!("1"));

		let view = view_of(vec![field]);

		assert_eq!(view.controls[0].options[0].value, "1");
		assert!(view.controls[0].options[0].selected);
	}

	#[rstest]
	fn test_checkbox_checked_state() {
		let view = view_of(vec![FieldDescriptor::checkbox("tos", "I agree").with_default(true)]);

		let control = &view.controls[0];
		assert!(control.checked);
		assert!(control.value.is_empty());
		assert!(view.to_html().contains(" checked>"));
	}

	#[rstest]
	fn test_title_and_submit_label() {
		let descriptor = FormDescriptor::new(vec![FieldDescriptor::text("name", "Name")])
			.with_title("Contact Us")
			.with_submit_label("Send Message");

		let html = FormView::from_descriptor(&descriptor, &FormSettings::default())
			.unwrap()
			.to_html();

		assert!(html.contains("<h2>Contact Us</h2>"));
		assert!(html.contains(r#"<button type="submit">Send Message</button>"#));
	}

	#[rstest]
	fn test_submitting_disables_button() {
		let mut view = view_of(vec![FieldDescriptor::text("name", "Name")]);
		view.submitting = true;

		let html = view.to_html();

		assert!(html.contains(r#"<button type="submit" disabled>Submit</button>"#));
		assert!(html.contains(r#"name="name" disabled"#));
	}

	#[rstest]
	fn test_error_rendered_under_control() {
		let mut view = view_of(vec![FieldDescriptor::email("email", "Email").required()]);
		view.controls[0].error = Some("Required".to_string());

		let html = view.to_html();

		assert!(html.contains(r#"aria-invalid="true""#));
		assert!(html.contains(r#"<p class="error">Required</p></div>"#));
	}

	#[rstest]
	#[case(Some("Create an account"), "create-an-account")]
	#[case(Some("Contact Us!"), "contact-us")]
	#[case(Some("¿?"), DEFAULT_ID_PREFIX)]
	#[case(None, DEFAULT_ID_PREFIX)]
	fn test_ids_are_scoped_by_title(#[case] title: Option<&str>, #[case] prefix: &str) {
		let mut descriptor = FormDescriptor::new(vec![FieldDescriptor::email("email", "Email")]);
		descriptor.title = title.map(str::to_string);

		let view = FormView::from_descriptor(&descriptor, &FormSettings::default()).unwrap();
		let html = view.to_html();

		assert_eq!(view.id_prefix, prefix);
		assert!(html.contains(&format!(r#"<form id="{}""#, prefix)));
		assert!(html.contains(&format!(r#"id="{}-email""#, prefix)));
		assert!(html.contains(&format!(r#"<label for="{}-email">"#, prefix)));
	}

	#[rstest]
	fn test_with_id_prefix_overrides_title() {
		let view = view_of(vec![FieldDescriptor::text("name", "Name")]).with_id_prefix("billing");

		assert!(view.to_html().contains(r#"id="billing-name""#));
	}

	#[rstest]
	fn test_placeholder_only_on_text_like_widgets() {
		let view = view_of(vec![
			FieldDescriptor::text("name", "Name").with_placeholder("Jane"),
			FieldDescriptor::textarea("bio", "Bio").with_placeholder("About you"),
			FieldDescriptor::date("dob", "Born").with_placeholder("yyyy-mm-dd"),
			FieldDescriptor::checkbox("tos", "Terms").with_placeholder("ignored"),
			FieldDescriptor::select("role", "Role", vec![SelectOption::new("User", "user")])
				.with_placeholder("Pick one"),
		]);

		let html = view.to_html();

		assert!(html.contains(r#"placeholder="Jane""#));
		assert!(html.contains(r#"placeholder="About you""#));
		assert!(!html.contains("yyyy-mm-dd"));
		assert!(!html.contains("ignored"));
		assert!(!html.contains(r#"placeholder="Pick one""#));
		assert!(html.contains(r#"<option value="" disabled selected>Pick one</option>"#));
	}

	#[rstest]
	fn test_select_placeholder_not_selected_when_value_set() {
		let field = FieldDescriptor::select("role", "Role", vec![SelectOption::new("User", "user")])
			.with_placeholder("Pick one")
			.with_default("user");

		let html = view_of(vec![field]).to_html();

		assert!(html.contains(r#"<option value="" disabled>Pick one</option>"#));
		assert!(html.contains(r#"<option value="user" selected>User</option>"#));
	}

	#[rstest]
	fn test_html_escape() {
		assert_eq!(
			html_escape(r#"<script>alert("x") & 'y'</script>"#),
			"&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
		);
	}

	#[rstest]
	fn test_user_text_is_escaped() {
		let view = view_of(vec![
			FieldDescriptor::text("bio", "<b>Bio</b>").with_default("\"quoted\""),
		]);

		let html = view.to_html();

		assert!(html.contains("&lt;b&gt;Bio&lt;/b&gt;"));
		assert!(html.contains(r#"value="&quot;quoted&quot;""#));
		assert!(!html.contains("<b>"));
	}
}
