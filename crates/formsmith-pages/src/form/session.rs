//! Form editing session
//!
//! [`FormSession`] owns the mutable state of one rendered form: current
//! values, current errors, touched fields and the submitting flag. It is a
//! cheap, cloneable handle so event handlers can share it; the state itself
//! is single-threaded and never shared between sessions.
//!
//! The submitting flag doubles as the reentrancy guard: while a submission
//! is awaiting its callback, further `submit()` calls return
//! [`SubmitOutcome::AlreadySubmitting`] without touching the callback.

use super::rendering::{self, FormView};
use crate::callback::SubmitCallback;
use formsmith_forms::{
	CompiledForm, FieldError, FormDescriptor, FormError, FormResult, FormSettings, FormValues,
	ValidationErrors, compile,
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Phase of the submission state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
	/// Accepting edits; initial state
	Editing,
	/// Running the ruleset against the current values
	Validating,
	/// Awaiting the completion callback
	Submitting,
}

/// Result of a submit attempt that did not fail in the callback.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Validation passed and the callback completed
	Submitted,
	/// Validation failed; the callback was not invoked
	Invalid(ValidationErrors),
	/// A submission was already in flight; nothing was done
	AlreadySubmitting,
}

/// Errors escaping a submit attempt.
///
/// Only the caller's own callback can fail a submission; its error is
/// returned as is and never retried.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
	#[error(transparent)]
	Callback(#[from] anyhow::Error),
}

struct SessionState {
	descriptor: FormDescriptor,
	compiled: CompiledForm,
	settings: FormSettings,
	values: FormValues,
	errors: ValidationErrors,
	touched: HashSet<String>,
	phase: SessionPhase,
	submit_count: u32,
}

impl SessionState {
	fn new(descriptor: FormDescriptor, settings: FormSettings) -> FormResult<Self> {
		let compiled = compile(&descriptor)?;
		let values = compiled.defaults.clone();
		Ok(Self {
			descriptor,
			compiled,
			settings,
			values,
			errors: ValidationErrors::new(),
			touched: HashSet::new(),
			phase: SessionPhase::Editing,
			submit_count: 0,
		})
	}

	fn revalidate_field(&mut self, name: &str) {
		let result = self
			.compiled
			.ruleset
			.validate_field(name, self.values.get(name));
		match result {
			Some(Err(e)) => self.errors.insert(name, e),
			Some(Ok(())) | None => {
				self.errors.remove(name);
			}
		}
	}

	fn ensure_known(&self, name: &str) -> FormResult<()> {
		if self.compiled.ruleset.contains(name) {
			Ok(())
		} else {
			Err(FormError::UnknownField(name.to_string()))
		}
	}
}

// Puts the session back into editing when the submission ends, however it
// ends: callback success, callback error, or the submit future being dropped.
struct SubmittingGuard {
	state: Rc<RefCell<SessionState>>,
}

impl Drop for SubmittingGuard {
	fn drop(&mut self) {
		match self.state.try_borrow_mut() {
			Ok(mut state) => state.phase = SessionPhase::Editing,
			Err(_) => warn!(
				"submission ended while the session state was borrowed; session left submitting"
			),
		}
	}
}

/// One editing and submission session for a form descriptor.
#[derive(Clone)]
pub struct FormSession {
	state: Rc<RefCell<SessionState>>,
	on_submit: SubmitCallback,
}

impl FormSession {
	/// Create a session with default settings
	///
	/// Fails when the descriptor does not compile (duplicate names, bad
	/// patterns, inverted bounds).
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FormDescriptor};
	/// use formsmith_pages::{FormSession, SubmitCallback};
	/// use serde_json::json;
	///
	/// let descriptor = FormDescriptor::new(vec![
	///     FieldDescriptor::text("subject", "Subject"),
	///     FieldDescriptor::checkbox("subscribe", "Subscribe to newsletter"),
	/// ]);
	/// let session = FormSession::new(descriptor, SubmitCallback::noop()).unwrap();
	///
	/// assert_eq!(session.value("subject"), Some(json!("")));
	/// assert_eq!(session.value("subscribe"), Some(json!(false)));
	/// assert!(session.errors().is_empty());
	/// ```
	pub fn new(descriptor: FormDescriptor, on_submit: SubmitCallback) -> FormResult<Self> {
		Self::with_settings(descriptor, on_submit, FormSettings::default())
	}

	pub fn with_settings(
		descriptor: FormDescriptor,
		on_submit: SubmitCallback,
		settings: FormSettings,
	) -> FormResult<Self> {
		let state = SessionState::new(descriptor, settings)?;
		debug!(
			fields = state.compiled.ruleset.len(),
			title = state.descriptor.title.as_deref().unwrap_or(""),
			"form session created"
		);
		Ok(Self {
			state: Rc::new(RefCell::new(state)),
			on_submit,
		})
	}

	/// Current value of a field
	pub fn value(&self, name: &str) -> Option<Value> {
		self.state.borrow().values.get(name).cloned()
	}

	/// Snapshot of all current values
	pub fn values(&self) -> FormValues {
		self.state.borrow().values.clone()
	}

	/// Set a field's value
	///
	/// With `validate_on_change` enabled the field is revalidated right away.
	/// Unknown field names are rejected.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldDescriptor, FormDescriptor};
	/// use formsmith_pages::{FormSession, SubmitCallback};
	/// use serde_json::json;
	///
	/// let descriptor = FormDescriptor::new(vec![FieldDescriptor::email("email", "Email")]);
	/// let session = FormSession::new(descriptor, SubmitCallback::noop()).unwrap();
	///
	/// session.set_value("email", json!("nope")).unwrap();
	/// assert_eq!(session.error("email").as_deref(), Some("Invalid email address"));
	/// assert!(session.set_value("phone", json!("123")).is_err());
	/// ```
	pub fn set_value(&self, name: &str, value: Value) -> FormResult<()> {
		let mut state = self.state.borrow_mut();
		state.ensure_known(name)?;
		state.values.insert(name.to_string(), value);
		if state.settings.validate_on_change {
			state.revalidate_field(name);
		}
		Ok(())
	}

	/// Mark a field as touched (the control lost focus)
	pub fn touch(&self, name: &str) -> FormResult<()> {
		let mut state = self.state.borrow_mut();
		state.ensure_known(name)?;
		state.touched.insert(name.to_string());
		if state.settings.validate_on_blur {
			state.revalidate_field(name);
		}
		Ok(())
	}

	pub fn is_touched(&self, name: &str) -> bool {
		self.state.borrow().touched.contains(name)
	}

	/// Validate every field, replacing the current errors
	///
	/// Returns `true` when no field has an error.
	pub fn validate(&self) -> bool {
		let mut state = self.state.borrow_mut();
		let previous = state.phase;
		state.phase = SessionPhase::Validating;
		let errors = state.compiled.ruleset.validate(&state.values);
		let is_valid = errors.is_empty();
		state.errors = errors;
		state.phase = previous;
		debug!(is_valid, "form validated");
		is_valid
	}

	/// Validate one field and update its error entry
	pub fn validate_field(&self, name: &str) -> FormResult<Option<FieldError>> {
		let mut state = self.state.borrow_mut();
		state.ensure_known(name)?;
		state.revalidate_field(name);
		Ok(state.errors.get(name).cloned())
	}

	/// All current errors
	pub fn errors(&self) -> ValidationErrors {
		self.state.borrow().errors.clone()
	}

	/// Message of a field's current error
	pub fn error(&self, name: &str) -> Option<String> {
		self.state.borrow().errors.message(name)
	}

	/// Messages that should be displayed: errors of touched fields, or all
	/// errors once a submit has been attempted
	pub fn visible_errors(&self) -> HashMap<String, String> {
		let state = self.state.borrow();
		visible_errors(&state)
	}

	/// Validate and, when valid, invoke the completion callback
	///
	/// The callback receives the full current value map, including optional
	/// fields nobody touched. The submitting flag is cleared when the callback
	/// completes, whether it succeeded or not, so the user may retry.
	///
	/// # Errors
	///
	/// Returns the callback's own error, unchanged.
	pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
		let values = {
			let mut state = self.state.borrow_mut();
			if state.phase == SessionPhase::Submitting {
				warn!("submit ignored: a submission is already in flight");
				return Ok(SubmitOutcome::AlreadySubmitting);
			}

			state.submit_count += 1;
			state.phase = SessionPhase::Validating;
			let errors = state.compiled.ruleset.validate(&state.values);
			state.errors = errors.clone();
			if !errors.is_empty() {
				state.phase = SessionPhase::Editing;
				debug!(
					errors = errors.len(),
					attempt = state.submit_count,
					"submit blocked by validation errors"
				);
				return Ok(SubmitOutcome::Invalid(errors));
			}

			state.phase = SessionPhase::Submitting;
			state.values.clone()
		};

		let guard = SubmittingGuard {
			state: Rc::clone(&self.state),
		};
		let result = self.on_submit.call(values).await;
		drop(guard);

		match result {
			Ok(()) => {
				info!(attempt = self.submit_count(), "form submitted");
				Ok(SubmitOutcome::Submitted)
			}
			Err(e) => {
				warn!(error = %e, "submit callback failed");
				Err(SubmitError::Callback(e))
			}
		}
	}

	pub fn phase(&self) -> SessionPhase {
		self.state.borrow().phase
	}

	pub fn is_submitting(&self) -> bool {
		self.phase() == SessionPhase::Submitting
	}

	/// Number of submit attempts since creation or the last reset
	pub fn submit_count(&self) -> u32 {
		self.state.borrow().submit_count
	}

	/// Whether any value differs from its initial value
	pub fn is_dirty(&self) -> bool {
		let state = self.state.borrow();
		state.values != state.compiled.defaults
	}

	/// Restore the initial values and clear errors, touched fields and the
	/// submit count
	pub fn reset(&self) {
		let mut state = self.state.borrow_mut();
		state.values = state.compiled.defaults.clone();
		state.errors.clear();
		state.touched.clear();
		state.submit_count = 0;
		debug!("form session reset");
	}

	/// Replace the descriptor, recompiling rules and defaults
	///
	/// Refused while a submission is in flight.
	pub fn reinitialize(&self, descriptor: FormDescriptor) -> FormResult<()> {
		let mut state = self.state.borrow_mut();
		if state.phase == SessionPhase::Submitting {
			warn!("reinitialize refused: a submission is in flight");
			return Err(FormError::Submitting);
		}
		let settings = state.settings.clone();
		*state = SessionState::new(descriptor, settings)?;
		debug!(fields = state.compiled.ruleset.len(), "form session reinitialized");
		Ok(())
	}

	/// The descriptor this session was built from
	pub fn descriptor(&self) -> FormDescriptor {
		self.state.borrow().descriptor.clone()
	}

	pub fn settings(&self) -> FormSettings {
		self.state.borrow().settings.clone()
	}

	/// Snapshot of the session as renderable controls
	pub fn view(&self) -> FormView {
		let state = self.state.borrow();
		rendering::build_view(
			&state.descriptor,
			&state.values,
			&visible_errors(&state),
			&state.settings,
			state.phase == SessionPhase::Submitting,
		)
	}

	/// Render the session to HTML
	pub fn render_html(&self) -> String {
		self.view().to_html()
	}
}

impl std::fmt::Debug for FormSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("FormSession")
			.field("title", &state.descriptor.title)
			.field("phase", &state.phase)
			.field("values", &state.values)
			.field("errors", &state.errors)
			.finish()
	}
}

fn visible_errors(state: &SessionState) -> HashMap<String, String> {
	state
		.errors
		.iter()
		.filter(|(name, _)| state.submit_count > 0 || state.touched.contains(*name))
		.map(|(name, error)| (name.to_string(), error.to_string()))
		.collect()
}
