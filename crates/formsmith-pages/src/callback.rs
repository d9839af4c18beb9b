//! Submit callback wrapper.
//!
//! A [`SubmitCallback`] receives the full value map of a form once it has
//! passed validation. Handlers may be synchronous ([`SubmitCallback::from_fn`])
//! or asynchronous ([`SubmitCallback::new`]); either way the session awaits
//! the returned future before leaving the submitting state.
//!
//! ## Example
//!
//! ```
//! use formsmith_pages::SubmitCallback;
//!
//! let on_submit = SubmitCallback::from_fn(|values| {
//!     println!("submitted {} fields", values.len());
//!     Ok(())
//! });
//! ```

use formsmith_forms::FormValues;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::future::Future;
use std::rc::Rc;

type SubmitHandler = dyn Fn(FormValues) -> LocalBoxFuture<'static, anyhow::Result<()>>;

/// A cloneable, single-threaded completion handler.
///
/// Errors returned by the handler are handed back to the caller of
/// `FormSession::submit` untouched.
pub struct SubmitCallback {
	inner: Rc<SubmitHandler>,
}

impl SubmitCallback {
	/// Creates a callback from an asynchronous handler.
	///
	/// # Example
	///
	/// ```
	/// use formsmith_pages::SubmitCallback;
	///
	/// let on_submit = SubmitCallback::new(|values| async move {
	///     let _ = values;
	///     Ok(())
	/// });
	/// ```
	pub fn new<F, Fut>(f: F) -> Self
	where
		F: Fn(FormValues) -> Fut + 'static,
		Fut: Future<Output = anyhow::Result<()>> + 'static,
	{
		Self {
			inner: Rc::new(move |values| f(values).boxed_local()),
		}
	}

	/// Creates a callback from a synchronous handler.
	pub fn from_fn<F>(f: F) -> Self
	where
		F: Fn(FormValues) -> anyhow::Result<()> + 'static,
	{
		Self {
			inner: Rc::new(move |values| futures::future::ready(f(values)).boxed_local()),
		}
	}

	/// A callback that accepts every submission and does nothing.
	pub fn noop() -> Self {
		Self::from_fn(|_| Ok(()))
	}

	/// Calls the handler with the given values.
	pub fn call(&self, values: FormValues) -> LocalBoxFuture<'static, anyhow::Result<()>> {
		(self.inner)(values)
	}
}

impl Clone for SubmitCallback {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl std::fmt::Debug for SubmitCallback {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubmitCallback")
			.field("inner", &"<function>")
			.finish()
	}
}
