//! Cursor relocation across applied text edits.
//!
//! Some servers rely on the client moving the cursor along with text edited in
//! front of it, the way VS Code does.

use quire_primitives::{BytePosition, ByteRange};

use crate::store::{BufferStore, StoreError};

/// Moves `cursor` to follow text that moved because `range` was replaced by
/// `lines`.
///
/// Only a cursor strictly after the replaced range moves. If it sat on the
/// range's last line it now sits on the replacement's last line, shifted by the
/// difference in length.
pub(super) fn shift(cursor: &mut BytePosition, range: ByteRange, lines: &[String]) {
	let ByteRange { start, end } = range;
	if end >= *cursor {
		return;
	}
	let old_span = range.line_span();
	let on_end_line = cursor.line == end.line;
	cursor.line = cursor.line + lines.len() - old_span;
	if on_end_line {
		let last_len = lines.last().map_or(0, String::len);
		cursor.column = cursor.column - end.column + last_len;
		if lines.len() == 1 {
			cursor.column += start.column;
		}
	}
}

/// Puts the focused window's cursor at `cursor` if that is inside the buffer.
///
/// An out-of-range cursor is left wherever the store put it.
pub(super) async fn restore<S: BufferStore + ?Sized>(store: &mut S, cursor: BytePosition) -> Result<(), StoreError> {
	let Some(buffer) = store.focused_buffer().await else {
		return Ok(());
	};
	let Some(line) = store.line(buffer, cursor.line).await? else {
		return Ok(());
	};
	if cursor.column <= line.len() {
		store.set_cursor(cursor).await?;
	}
	Ok(())
}
