//! Application configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! heading = "Account"
//!
//! [forms]
//! validate_on_change = false
//! width = 480
//! ```

use formsmith_forms::FormSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Page heading used when the configuration does not set one.
pub const DEFAULT_HEADING: &str = "formsmith";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Heading rendered above both forms
	pub heading: String,
	/// Settings applied to every form session
	pub forms: FormSettings,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			heading: DEFAULT_HEADING.to_string(),
			forms: FormSettings::default(),
		}
	}
}

impl AppConfig {
	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
			path: path.as_ref().to_path_buf(),
			source: e,
		})?;

		Self::from_toml(&content)
	}

	/// Parse configuration from TOML string.
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
		self.heading = heading.into();
		self
	}

	pub fn with_forms(mut self, forms: FormSettings) -> Self {
		self.forms = forms;
		self
	}
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse configuration: {0}")]
	Parse(#[from] toml::de::Error),
}
