//! Session behavior and layout settings

use serde::{Deserialize, Serialize};

/// Behavior and layout settings of a form session.
///
/// Every key is optional when deserializing; missing keys take the defaults.
///
/// # Examples
///
/// ```
/// use formsmith_forms::FormSettings;
///
/// let settings: FormSettings = serde_json::from_str(r#"{"validate_on_change": false}"#).unwrap();
/// assert!(!settings.validate_on_change);
/// assert!(settings.validate_on_blur);
/// assert_eq!(settings.width, 420);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Revalidate a field whenever its value changes
	pub validate_on_change: bool,
	/// Revalidate a field when it loses focus
	pub validate_on_blur: bool,
	/// Minimum visible rows of textarea controls
	pub textarea_min_rows: u32,
	/// Rendered form width in pixels
	pub width: u32,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			validate_on_change: true,
			validate_on_blur: true,
			textarea_min_rows: 3,
			width: 420,
		}
	}
}
