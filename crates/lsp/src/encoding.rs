use lsp_types::PositionEncodingKind;
use serde::{Deserialize, Serialize};

/// Offset encoding for LSP positions.
///
/// LSP uses UTF-16 by default, but servers can negotiate different encodings.
/// The value is fixed per server connection and always passed in explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OffsetEncoding {
	/// UTF-8 byte offsets.
	#[serde(rename = "utf-8")]
	Utf8,
	/// UTF-16 code unit offsets (LSP default).
	#[default]
	#[serde(rename = "utf-16")]
	Utf16,
	/// UTF-32 / Unicode codepoint offsets.
	#[serde(rename = "utf-32")]
	Utf32,
}

impl OffsetEncoding {
	/// Parse from LSP position encoding kind.
	pub fn from_lsp(kind: &PositionEncodingKind) -> Option<Self> {
		match kind.as_str() {
			"utf-8" => Some(Self::Utf8),
			"utf-16" => Some(Self::Utf16),
			"utf-32" => Some(Self::Utf32),
			_ => None,
		}
	}

	/// The LSP position encoding kind for this encoding.
	pub fn to_lsp(self) -> PositionEncodingKind {
		match self {
			Self::Utf8 => PositionEncodingKind::UTF8,
			Self::Utf16 => PositionEncodingKind::UTF16,
			Self::Utf32 => PositionEncodingKind::UTF32,
		}
	}

	/// Number of code units `ch` occupies in this encoding.
	#[inline]
	pub fn char_len(self, ch: char) -> usize {
		match self {
			Self::Utf8 => ch.len_utf8(),
			Self::Utf16 => ch.len_utf16(),
			Self::Utf32 => 1,
		}
	}
}

impl std::fmt::Display for OffsetEncoding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.to_lsp().as_str())
	}
}
