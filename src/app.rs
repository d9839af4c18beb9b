//! The stock application: a signup form wired to the user store and a
//! contact form that acknowledges each message.

use crate::config::AppConfig;
use formsmith_auth::{UserState, UserStore};
use formsmith_forms::{FieldDescriptor, FieldKind, FormDescriptor, FormResult, FormValues};
use formsmith_forms::{SelectOption, TextConstraints};
use formsmith_pages::form::rendering::html_escape;
use formsmith_pages::{FormSession, SubmitCallback};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Notice recorded after every successful contact submission.
pub const CONTACT_NOTICE: &str = "Thank you for reaching out!";

/// "Create an account" form
pub fn signup_form() -> FormDescriptor {
	FormDescriptor::new(vec![
		FieldDescriptor::new(
			"name",
			"Full name",
			FieldKind::Text(TextConstraints::new().with_min_length(2)),
		)
		.required(),
		FieldDescriptor::email("email", "Email").required(),
		FieldDescriptor::select(
			"role",
			"Role",
			vec![
				SelectOption::new("User", "user"),
				SelectOption::new("Admin", "admin"),
			],
		)
		.with_helper_text("Choose your role"),
		FieldDescriptor::checkbox("tos", "I agree to the Terms").required(),
	])
	.with_title("Create an account")
	.with_submit_label("Save")
}

/// "Contact Us" form
pub fn contact_form() -> FormDescriptor {
	FormDescriptor::new(vec![
		FieldDescriptor::text("fullName", "Full Name").required(),
		FieldDescriptor::email("email", "Email").required(),
		FieldDescriptor::text("subject", "Subject").required(),
		FieldDescriptor::new(
			"message",
			"Message",
			FieldKind::Textarea(TextConstraints::new().with_min_length(10)),
		)
		.required()
		.with_helper_text("At least 10 characters"),
		FieldDescriptor::checkbox("subscribe", "Subscribe to newsletter"),
	])
	.with_title("Contact Us")
	.with_submit_label("Send Message")
}

/// Both stock forms plus the user store they act on.
///
/// # Examples
///
/// ```
/// use formsmith::{App, AppConfig};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let app = App::new(AppConfig::default()).unwrap();
/// let signup = app.signup();
/// signup.set_value("name", json!("Ada Lovelace")).unwrap();
/// signup.set_value("email", json!("ada@example.com")).unwrap();
/// signup.set_value("tos", json!(true)).unwrap();
///
/// signup.submit().await.unwrap();
/// assert_eq!(app.user().state().name.as_deref(), Some("Ada Lovelace"));
/// # });
/// ```
pub struct App {
	config: AppConfig,
	user: UserStore,
	signup: FormSession,
	contact: FormSession,
	notices: Rc<RefCell<Vec<String>>>,
}

impl App {
	pub fn new(config: AppConfig) -> FormResult<Self> {
		Self::with_user_store(config, UserStore::new())
	}

	/// Build the application around an existing user store
	pub fn with_user_store(config: AppConfig, user: UserStore) -> FormResult<Self> {
		let on_signup = SubmitCallback::from_fn({
			let user = user.clone();
			move |values| {
				let name = text_value(&values, "name");
				let email = text_value(&values, "email");
				user.login(name, email);
				Ok(())
			}
		});
		let signup = FormSession::with_settings(signup_form(), on_signup, config.forms.clone())?;

		let notices = Rc::new(RefCell::new(Vec::new()));
		let on_contact = SubmitCallback::from_fn({
			let notices = Rc::clone(&notices);
			move |values| {
				info!(values = ?values, "contact form submitted");
				notices.borrow_mut().push(CONTACT_NOTICE.to_string());
				Ok(())
			}
		});
		let contact = FormSession::with_settings(contact_form(), on_contact, config.forms.clone())?;

		debug!(heading = %config.heading, "application assembled");
		Ok(Self {
			config,
			user,
			signup,
			contact,
			notices,
		})
	}

	pub fn config(&self) -> &AppConfig {
		&self.config
	}

	pub fn user(&self) -> &UserStore {
		&self.user
	}

	pub fn signup(&self) -> &FormSession {
		&self.signup
	}

	pub fn contact(&self) -> &FormSession {
		&self.contact
	}

	/// Notices recorded so far, oldest first
	pub fn notices(&self) -> Vec<String> {
		self.notices.borrow().clone()
	}

	/// Sign the current user out
	pub fn logout(&self) -> UserState {
		self.user.logout()
	}

	/// Render the page: heading, both forms and the user state
	pub fn render_html(&self) -> String {
		let mut html = String::from(r#"<main class="formsmith-app">"#);
		html.push_str(&format!("<h1>{}</h1>", html_escape(&self.config.heading)));
		html.push_str(&self.signup.render_html());
		html.push_str(&self.contact.render_html());

		html.push_str(r#"<section class="user-state"><h3>User state</h3>"#);
		let json = self.user.to_json().unwrap_or_default();
		html.push_str(&format!("<pre>{}</pre>", html_escape(&json)));
		if self.user.is_authenticated() {
			html.push_str(r#"<button type="button" class="logout">Logout</button>"#);
		}
		html.push_str("</section></main>");
		html
	}
}

impl std::fmt::Debug for App {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("App")
			.field("config", &self.config)
			.field("user", &self.user.state())
			.field("notices", &self.notices.borrow().len())
			.finish()
	}
}

// A missing or null value reads as an empty string; other non-strings use
// their JSON text.
fn text_value(values: &FormValues, name: &str) -> String {
	match values.get(name) {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(other) => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use formsmith_forms::compile;
	use formsmith_pages::SubmitOutcome;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn app() -> App {
		App::new(AppConfig::default()).unwrap()
	}

	#[rstest]
	#[case(signup_form(), 4)]
	#[case(contact_form(), 5)]
	fn test_stock_forms_compile(#[case] form: FormDescriptor, #[case] fields: usize) {
		let compiled = compile(&form).unwrap();

		assert_eq!(compiled.ruleset.len(), fields);
		assert_eq!(compiled.defaults.len(), fields);
	}

	#[rstest]
	#[tokio::test]
	async fn test_signup_requires_terms(app: App) {
		// Arrange
		let signup = app.signup();
		signup.set_value("name", json!("Ada")).unwrap();
		signup.set_value("email", json!("ada@example.com")).unwrap();

		// Act
		let outcome = signup.submit().await.unwrap();

		// Assert
		let SubmitOutcome::Invalid(errors) = outcome else {
			panic!("expected validation errors, got {:?}", outcome);
		};
		assert_eq!(errors.len(), 1);
		assert_eq!(errors.message("tos").as_deref(), Some("Required"));
		assert!(!app.user().is_authenticated());
	}

	#[rstest]
	fn test_signup_name_min_length(app: App) {
		let signup = app.signup();
		signup.set_value("name", json!("A")).unwrap();

		assert_eq!(
			signup.error("name").as_deref(),
			Some("Full name must be at least 2 characters")
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_signup_logs_user_in_and_logout_clears(app: App) {
		let signup = app.signup();
		signup.set_value("name", json!("Ada")).unwrap();
		signup.set_value("email", json!("ada@example.com")).unwrap();
		signup.set_value("tos", json!(true)).unwrap();

		assert_eq!(signup.submit().await.unwrap(), SubmitOutcome::Submitted);
		assert_eq!(
			app.user().state(),
			UserState::login("Ada", "ada@example.com")
		);
		assert!(app.render_html().contains(r#"class="logout""#));

		app.logout();
		assert_eq!(app.user().state(), UserState::anonymous());
		assert!(!app.render_html().contains(r#"class="logout""#));
	}

	#[rstest]
	#[tokio::test]
	async fn test_contact_records_notice(app: App) {
		let contact = app.contact();
		contact.set_value("fullName", json!("Ada Lovelace")).unwrap();
		contact.set_value("email", json!("ada@example.com")).unwrap();
		contact.set_value("subject", json!("Engines")).unwrap();
		contact.set_value("message", json!("short")).unwrap();

		let outcome = contact.submit().await.unwrap();
		assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
		assert!(app.notices().is_empty());

		contact
			.set_value("message", json!("About the analytical engine"))
			.unwrap();
		assert_eq!(contact.submit().await.unwrap(), SubmitOutcome::Submitted);
		assert_eq!(app.notices(), vec![CONTACT_NOTICE.to_string()]);
		assert!(!app.user().is_authenticated());
	}

	#[rstest]
	fn test_render_html_includes_both_forms(app: App) {
		let html = app.render_html();

		assert!(html.contains("<h1>formsmith</h1>"));
		assert!(html.contains("<h2>Create an account</h2>"));
		assert!(html.contains("<h2>Contact Us</h2>"));
		assert!(html.contains("&quot;isAuthenticated&quot;: false"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_render_html_ids_are_unique(app: App) {
		// Errors add `aria-invalid` attributes; those are not ids
		let _ = app.signup().submit().await.unwrap();
		let _ = app.contact().submit().await.unwrap();

		let html = app.render_html();
		let ids: Vec<&str> = html
			.split(r#" id=""#)
			.skip(1)
			.filter_map(|rest| rest.split('"').next())
			.collect();
		let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();

		assert_eq!(ids.len(), 11);
		assert_eq!(unique.len(), ids.len());
		assert!(ids.contains(&"create-an-account-email"));
		assert!(ids.contains(&"contact-us-email"));
		assert!(html.contains(r#"<label for="contact-us-email">"#));
	}

	#[rstest]
	#[case(json!("Ada"), "Ada")]
	#[case(json!(null), "")]
	#[case(json!(42), "42")]
	fn test_text_value(#[case] value: Value, #[case] expected: &str) {
		let mut values = FormValues::new();
		values.insert("name".to_string(), value);

		assert_eq!(text_value(&values, "name"), expected);
		assert_eq!(text_value(&values, "missing"), "");
	}
}
