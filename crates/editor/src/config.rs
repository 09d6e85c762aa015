//! Workspace edit configuration.

use quire_lsp::OffsetEncoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for applying workspace edits.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EditConfig {
	/// Encoding assumed when the caller has not negotiated one with a server.
	pub offset_encoding: OffsetEncoding,
	/// Re-place the cursor of the focused buffer after its text moved.
	pub restore_cursor: bool,
	/// Re-insert letter marks the host dropped while edits were applied.
	pub restore_marks: bool,
	/// Drop an empty last line left behind by an edit when the buffer fixes
	/// its end-of-line on write.
	pub trim_final_newline: bool,
}

impl Default for EditConfig {
	fn default() -> Self {
		Self {
			offset_encoding: OffsetEncoding::default(),
			restore_cursor: true,
			restore_marks: true,
			trim_final_newline: true,
		}
	}
}

/// Errors from loading an [`EditConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not valid TOML or has unexpected keys.
	#[error("invalid workspace edit config: {0}")]
	Parse(#[from] toml::de::Error),
}

impl EditConfig {
	/// Parses a config from TOML source.
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_is_default() {
		assert_eq!(EditConfig::from_toml("").unwrap(), EditConfig::default());
	}

	#[test]
	fn parses_all_keys() {
		let config = EditConfig::from_toml(
			r#"
offset-encoding = "utf-8"
restore-cursor = false
restore-marks = false
trim-final-newline = false
"#,
		)
		.unwrap();
		assert_eq!(
			config,
			EditConfig {
				offset_encoding: OffsetEncoding::Utf8,
				restore_cursor: false,
				restore_marks: false,
				trim_final_newline: false,
			}
		);
	}

	#[test]
	fn rejects_unknown_keys_and_encodings() {
		assert!(EditConfig::from_toml("restore-cursr = true").is_err());
		assert!(EditConfig::from_toml("offset-encoding = \"utf-7\"").is_err());
	}
}
