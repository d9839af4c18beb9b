//! Form sessions and control rendering
//!
//! ## Components
//!
//! - **FormSession**: one editing session per rendered form (values, errors,
//!   touched fields, in-flight submission flag)
//! - **FormView**: snapshot of a session as a list of controls, renderable to HTML
//!
//! ## Example
//!
//! ```
//! use formsmith_forms::{FieldDescriptor, FormDescriptor};
//! use formsmith_pages::{FormSession, SubmitCallback, SubmitOutcome};
//! use serde_json::json;
//!
//! # futures::executor::block_on(async {
//! let descriptor = FormDescriptor::new(vec![FieldDescriptor::email("email", "Email").required()]);
//! let session = FormSession::new(descriptor, SubmitCallback::noop()).unwrap();
//!
//! session.set_value("email", json!("x@y.com")).unwrap();
//! assert_eq!(session.submit().await.unwrap(), SubmitOutcome::Submitted);
//! # });
//! ```

pub mod rendering;
pub mod session;

pub use rendering::{Control, ControlOption, FormView, WidgetType, html_escape};
pub use session::{FormSession, SessionPhase, SubmitError, SubmitOutcome};
