//! Form descriptors and validation schema compilation for formsmith
//!
//! This crate turns a declarative list of field descriptors into:
//! - a [`ValidationRuleset`] with one composed rule per field
//! - a default value map with one initial value per field
//!
//! ## Example
//!
//! ```
//! use formsmith_forms::{FieldDescriptor, FormDescriptor, compile};
//! use serde_json::json;
//!
//! let form = FormDescriptor::new(vec![
//!     FieldDescriptor::email("email", "Email").required(),
//!     FieldDescriptor::checkbox("tos", "I agree to the Terms"),
//! ]);
//!
//! let compiled = compile(&form).unwrap();
//! assert_eq!(compiled.defaults.get("email"), Some(&json!("")));
//! assert_eq!(compiled.defaults.get("tos"), Some(&json!(false)));
//! assert_eq!(compiled.ruleset.len(), 2);
//! ```

pub mod field;
pub mod form;
pub mod schema;
pub mod settings;
pub mod validators;

pub use field::{
	ErrorKind, FieldDescriptor, FieldError, FieldKind, FieldResult, NumberConstraints,
	SelectOption, TextConstraints,
};
pub use form::{DEFAULT_SUBMIT_LABEL, FormDescriptor, FormError, FormResult};
pub use schema::{
	CompiledForm, FieldRule, FormValues, RuleKind, TextRule, ValidationErrors,
	ValidationRuleset, compile, compile_ruleset, derive_defaults,
};
pub use settings::FormSettings;
pub use validators::{EmailValidator, Pattern, parse_number};
