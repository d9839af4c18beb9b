//! User state, transitions and store

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Who is signed in, if anyone.
///
/// Serializes with the `isAuthenticated` key:
///
/// ```
/// use formsmith_auth::UserState;
///
/// let json = serde_json::to_string(&UserState::default()).unwrap();
/// assert_eq!(json, r#"{"email":null,"name":null,"isAuthenticated":false}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
	pub email: Option<String>,
	pub name: Option<String>,
	pub is_authenticated: bool,
}

impl UserState {
	/// The signed-out state
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// State after signing in as `name` / `email`
	///
	/// The previous state is irrelevant; signing in again replaces the user.
	pub fn login(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self {
			email: Some(email.into()),
			name: Some(name.into()),
			is_authenticated: true,
		}
	}

	/// State after signing out
	pub fn logout() -> Self {
		Self::anonymous()
	}
}

/// Transitions of the user state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
	Login { name: String, email: String },
	Logout,
}

impl UserAction {
	pub fn login(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self::Login {
			name: name.into(),
			email: email.into(),
		}
	}
}

/// Apply an action to a state, returning the next state
pub fn reduce(_state: &UserState, action: UserAction) -> UserState {
	match action {
		UserAction::Login { name, email } => UserState::login(name, email),
		UserAction::Logout => UserState::logout(),
	}
}

/// Shared handle to the current user state.
///
/// Clones share the same state. The handle is single-threaded.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
	state: Rc<RefCell<UserState>>,
}

impl UserStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Apply an action and return the resulting state
	pub fn dispatch(&self, action: UserAction) -> UserState {
		let mut state = self.state.borrow_mut();
		let next = reduce(&state, action);
		match (state.is_authenticated, next.is_authenticated) {
			(_, true) => info!(email = next.email.as_deref().unwrap_or(""), "user logged in"),
			(true, false) => info!("user logged out"),
			(false, false) => debug!("logout on anonymous user state"),
		}
		*state = next.clone();
		next
	}

	pub fn login(&self, name: impl Into<String>, email: impl Into<String>) -> UserState {
		self.dispatch(UserAction::login(name, email))
	}

	pub fn logout(&self) -> UserState {
		self.dispatch(UserAction::Logout)
	}

	/// Snapshot of the current state
	pub fn state(&self) -> UserState {
		self.state.borrow().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.state.borrow().is_authenticated
	}

	/// Current state as pretty-printed JSON with two-space indentation
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(&*self.state.borrow())
	}
}
