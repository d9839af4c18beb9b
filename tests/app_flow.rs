//! Stock application wired to an externally owned user store.

use formsmith::prelude::*;
use formsmith::{CONTACT_NOTICE, contact_form, signup_form};
use rstest::rstest;
use serde_json::json;

const CONFIG: &str = r#"
heading = "Welcome"

[forms]
validate_on_change = false
textarea_min_rows = 4
width = 360
"#;

#[rstest]
#[tokio::test]
async fn test_signup_and_logout_through_shared_store() {
	// Arrange
	let store = UserStore::new();
	let app = App::with_user_store(AppConfig::from_toml(CONFIG).unwrap(), store.clone()).unwrap();
	let signup = app.signup();
	signup.set_value("name", json!("Grace Hopper")).unwrap();
	signup.set_value("email", json!("grace@example.com")).unwrap();
	signup.set_value("role", json!("admin")).unwrap();
	signup.set_value("tos", json!(true)).unwrap();

	// Act
	let outcome = signup.submit().await.unwrap();

	// Assert
	assert_eq!(outcome, SubmitOutcome::Submitted);
	assert_eq!(store.state(), UserState::login("Grace Hopper", "grace@example.com"));
	let json = store.to_json().unwrap();
	assert!(json.contains(r#""isAuthenticated": true"#));

	app.logout();
	assert!(!store.is_authenticated());
}

#[rstest]
#[tokio::test]
async fn test_role_must_be_a_declared_option() {
	let app = App::new(AppConfig::default()).unwrap();
	let signup = app.signup();
	signup.set_value("name", json!("Grace Hopper")).unwrap();
	signup.set_value("email", json!("grace@example.com")).unwrap();
	signup.set_value("role", json!("root")).unwrap();
	signup.set_value("tos", json!(true)).unwrap();

	let outcome = signup.submit().await.unwrap();

	let SubmitOutcome::Invalid(errors) = outcome else {
		panic!("expected validation errors, got {:?}", outcome);
	};
	assert_eq!(
		errors.message("role").as_deref(),
		Some("Role must be one of the following values: user, admin")
	);
	assert!(!app.user().is_authenticated());
}

#[rstest]
#[tokio::test]
async fn test_contact_form_notice_and_reset() {
	let app = App::new(AppConfig::default()).unwrap();
	let contact = app.contact();
	contact.set_value("fullName", json!("Grace Hopper")).unwrap();
	contact.set_value("email", json!("grace@example.com")).unwrap();
	contact.set_value("subject", json!("Compilers")).unwrap();
	contact
		.set_value("message", json!("A question about COBOL"))
		.unwrap();
	contact.set_value("subscribe", json!(true)).unwrap();

	assert_eq!(contact.submit().await.unwrap(), SubmitOutcome::Submitted);
	assert_eq!(app.notices(), vec![CONTACT_NOTICE.to_string()]);

	contact.reset();
	assert_eq!(contact.value("message"), Some(json!("")));
	assert_eq!(contact.value("subscribe"), Some(json!(false)));
}

#[rstest]
fn test_config_flows_into_rendering() {
	let app = App::new(AppConfig::from_toml(CONFIG).unwrap()).unwrap();

	app.contact().set_value("message", json!("short")).unwrap();
	let html = app.render_html();

	assert!(html.contains("<h1>Welcome</h1>"));
	assert!(html.contains("max-width: 360px"));
	assert!(html.contains(r#"rows="4""#));
	assert!(app.contact().errors().is_empty());
}

#[rstest]
fn test_stock_descriptors_round_trip_through_json() {
	for form in [signup_form(), contact_form()] {
		let json = serde_json::to_string(&form).unwrap();

		let parsed = FormDescriptor::from_json(&json).unwrap();

		assert_eq!(parsed, form);
	}
}
