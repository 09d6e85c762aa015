//! Position conversion between LSP code-unit offsets and buffer byte columns.
//!
//! Conversions never fail. An offset past the end of a line clamps to the line's
//! byte length, and an offset that lands inside a multi-unit character snaps to
//! that character's first byte. A slightly-off server response must not take
//! the editor down.

use lsp_types::Position;
use quire_primitives::BytePosition;

use crate::OffsetEncoding;

/// Converts an LSP position into a buffer position.
///
/// `line_text` is the content of `position.line` without its terminator, or
/// `None` when that line does not exist; the character offset is then passed
/// through unchanged and left for the caller to clamp.
pub fn decode_position(line_text: Option<&str>, position: Position, encoding: OffsetEncoding) -> BytePosition {
	let line = position.line as usize;
	match line_text {
		Some(text) => BytePosition::new(line, decode_column(text, position.character, encoding)),
		None => BytePosition::new(line, position.character as usize),
	}
}

/// Converts a code-unit offset within `text` into a byte column.
pub fn decode_column(text: &str, character: u32, encoding: OffsetEncoding) -> usize {
	let target = character as usize;
	if encoding == OffsetEncoding::Utf8 {
		let mut column = target.min(text.len());
		while !text.is_char_boundary(column) {
			column -= 1;
		}
		return column;
	}

	let mut units = 0;
	for (byte_idx, ch) in text.char_indices() {
		let next = units + encoding.char_len(ch);
		if next > target {
			return byte_idx;
		}
		units = next;
	}
	text.len()
}

#[cfg(test)]
mod tests;
