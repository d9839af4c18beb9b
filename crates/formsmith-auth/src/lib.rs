//! User state for formsmith
//!
//! A minimal authentication-like state: who is signed in, if anyone. The
//! state changes only through the pure [`UserState::login`] and
//! [`UserState::logout`] transitions, and is held in an explicitly passed
//! [`UserStore`] handle rather than a process-wide singleton.
//!
//! ## Example
//!
//! ```
//! use formsmith_auth::{UserAction, UserStore};
//!
//! let store = UserStore::new();
//! store.dispatch(UserAction::login("Ada", "ada@example.com"));
//! assert!(store.is_authenticated());
//!
//! store.dispatch(UserAction::Logout);
//! assert_eq!(store.state().email, None);
//! ```

pub mod user_state;

pub use user_state::{UserAction, UserState, UserStore, reduce};
