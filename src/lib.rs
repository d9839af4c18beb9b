//! # formsmith
//!
//! Forms described as data: a list of field descriptors is compiled into a
//! validation ruleset and a set of initial values, bound to a live editing
//! session, and rendered as HTML controls.
//!
//! ## Crates
//!
//! - [`forms`] (`formsmith-forms`): field descriptors, the schema compiler and
//!   per-field validation
//! - [`pages`] (`formsmith-pages`): form sessions, the submission state
//!   machine and control rendering
//! - [`auth`] (`formsmith-auth`): the authentication-like user state
//!
//! ## Feature Flags
//!
//! - `pages` - Form sessions and rendering
//! - `auth` - User state and store
//! - `config` - [`AppConfig`] loaded from TOML
//! - `full` (default) - Everything, including the stock [`App`]
//!
//! With no features enabled only the schema compiler is built.
//!
//! ## Quick Example
//!
//! ```
//! use formsmith::prelude::*;
//! use serde_json::json;
//!
//! let descriptor = FormDescriptor::from_json(
//!     r#"{"fields": [{"name": "email", "label": "Email", "type": "email", "required": true}]}"#,
//! )
//! .unwrap();
//! let compiled = compile(&descriptor).unwrap();
//!
//! let mut values = compiled.defaults.clone();
//! assert_eq!(compiled.ruleset.validate(&values).message("email").as_deref(), Some("Required"));
//!
//! values.insert("email".to_string(), json!("x@y.com"));
//! assert!(compiled.ruleset.validate(&values).is_empty());
//! ```

#[cfg(all(feature = "pages", feature = "auth", feature = "config"))]
pub mod app;
#[cfg(feature = "config")]
pub mod config;

pub use formsmith_forms as forms;

#[cfg(feature = "pages")]
pub use formsmith_pages as pages;

#[cfg(feature = "auth")]
pub use formsmith_auth as auth;

#[cfg(feature = "config")]
pub use config::{AppConfig, ConfigError};
pub use formsmith_forms::{
	FieldDescriptor, FieldError, FieldKind, FormDescriptor, FormError, FormResult, FormSettings,
	FormValues, ValidationErrors, compile,
};

#[cfg(all(feature = "pages", feature = "auth", feature = "config"))]
pub use app::{App, CONTACT_NOTICE, contact_form, signup_form};

#[cfg(feature = "auth")]
pub use formsmith_auth::{UserAction, UserState, UserStore};

#[cfg(feature = "pages")]
pub use formsmith_pages::{FormSession, FormView, SubmitCallback, SubmitError, SubmitOutcome};

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "config")]
	pub use crate::{AppConfig, ConfigError};
	pub use formsmith_forms::{
		CompiledForm, FieldDescriptor, FieldError, FieldKind, FormDescriptor, FormError,
		FormResult, FormSettings, FormValues, NumberConstraints, SelectOption, TextConstraints,
		ValidationErrors, ValidationRuleset, compile,
	};

	// External
	pub use serde::{Deserialize, Serialize};

	#[cfg(feature = "pages")]
	pub use formsmith_pages::{
		FormSession, FormView, SessionPhase, SubmitCallback, SubmitError, SubmitOutcome,
	};

	#[cfg(feature = "auth")]
	pub use formsmith_auth::{UserAction, UserState, UserStore};

	#[cfg(all(feature = "pages", feature = "auth", feature = "config"))]
	pub use crate::App;
}
