//! Form sessions and rendering for formsmith
//!
//! A [`FormSession`] binds a compiled [`FormDescriptor`] to live values,
//! tracks per-field errors, and drives the submission state machine:
//!
//! ```text
//! Editing ──submit()──▶ Validating ──errors──▶ Editing (errors populated)
//!                            │
//!                            └──valid──▶ Submitting ──callback done──▶ Editing
//! ```
//!
//! The completion callback is a [`SubmitCallback`]; rendering of controls
//! lives in [`form::rendering`].
//!
//! [`FormDescriptor`]: formsmith_forms::FormDescriptor

pub mod callback;
pub mod form;

pub use callback::SubmitCallback;
pub use form::{
	Control, ControlOption, FormSession, FormView, SessionPhase, SubmitError, SubmitOutcome,
	WidgetType,
};
