use quire_lsp::lsp_types::TextEdit;
use quire_lsp::{decode_position, order_for_application};
use quire_primitives::text::{normalize_line_endings, split_lines};
use quire_primitives::{BytePosition, ByteRange};

use super::{ApplyError, WorkspaceEditor, cursor, marks};
use crate::store::{BufferId, BufferStore};

impl<S: BufferStore + ?Sized> WorkspaceEditor<'_, S> {
	/// Applies a batch of text edits to one buffer.
	///
	/// Edits are normalized and applied last-in-document first, each against
	/// the buffer as the previous one left it. Ranges that overshoot the
	/// buffer are clamped instead of rejected. The focused window's cursor and
	/// the buffer's letter marks are repaired afterwards.
	pub async fn apply_text_edits(&mut self, buffer: BufferId, edits: &[TextEdit]) -> Result<(), ApplyError> {
		if edits.is_empty() {
			return Ok(());
		}
		self.store.set_listed(buffer).await?;

		let mut cursor = if self.config.restore_cursor && self.store.focused_buffer().await == Some(buffer) {
			self.store.cursor().await
		} else {
			None
		};
		let saved_marks = if self.config.restore_marks {
			marks::snapshot(&*self.store, buffer).await?
		} else {
			Vec::new()
		};
		// An empty last line that predates the edits is kept. The trim runs
		// before mark repair so repaired marks are clamped to the final text.
		let had_trailing_empty_line = self.ends_with_empty_line(buffer).await?;

		for edit in order_for_application(edits) {
			self.apply_text_edit(buffer, &edit, cursor.as_mut()).await?;
		}

		if self.config.trim_final_newline && !had_trailing_empty_line {
			self.trim_final_empty_line(buffer).await?;
		}
		marks::repair(&mut *self.store, buffer, saved_marks).await?;
		if let Some(cursor) = cursor {
			cursor::restore(&mut *self.store, cursor).await?;
		}

		tracing::debug!(%buffer, edits = edits.len(), "workspace_edit.text_applied");
		Ok(())
	}

	async fn apply_text_edit(&mut self, buffer: BufferId, edit: &TextEdit, cursor: Option<&mut BytePosition>) -> Result<(), ApplyError> {
		let new_text = normalize_line_endings(&edit.new_text);
		let mut lines = split_lines(&new_text);
		let line_count = self.store.line_count(buffer).await?;
		let last_line = line_count.saturating_sub(1);

		let start_line = edit.range.start.line as usize;
		if start_line >= line_count {
			// Some servers address the line after the last one; append instead.
			let end_of_buffer = BytePosition::new(last_line, self.line_len(buffer, last_line).await?);
			if line_count > 0 {
				lines.insert(0, String::new());
			}
			self.store.set_text(buffer, ByteRange::point(end_of_buffer), &lines).await?;
			return Ok(());
		}

		let start_text = self.store.line(buffer, start_line).await?;
		let start = decode_position(start_text.as_deref(), edit.range.start, self.encoding);
		let end_line = edit.range.end.line as usize;
		let end_text = if end_line == start_line {
			start_text
		} else {
			self.store.line(buffer, end_line).await?
		};
		let mut end = decode_position(end_text.as_deref(), edit.range.end, self.encoding);

		if end.line > last_line {
			end = BytePosition::new(last_line, self.line_len(buffer, last_line).await?);
		} else {
			let end_line_len = end_text.as_deref().map_or(0, str::len);
			if end.column >= end_line_len && new_text.ends_with('\n') {
				// The range already runs to the end of the line; the trailing
				// break would leave an extra blank line behind.
				lines.pop();
			}
			end.column = end.column.min(end_line_len);
		}
		let range = ByteRange::new(start, end.max(start));

		self.store.set_text(buffer, range, &lines).await?;
		if let Some(cursor) = cursor {
			cursor::shift(cursor, range, &lines);
		}
		Ok(())
	}

	async fn line_len(&self, buffer: BufferId, index: usize) -> Result<usize, ApplyError> {
		Ok(self.store.line(buffer, index).await?.map_or(0, |line| line.len()))
	}

	async fn ends_with_empty_line(&self, buffer: BufferId) -> Result<bool, ApplyError> {
		let line_count = self.store.line_count(buffer).await?;
		if line_count < 2 {
			return Ok(false);
		}
		Ok(self.store.line(buffer, line_count - 1).await?.is_some_and(|line| line.is_empty()))
	}

	/// Removes an empty last line if the buffer writes its own final line break.
	async fn trim_final_empty_line(&mut self, buffer: BufferId) -> Result<(), ApplyError> {
		if !self.store.fixes_end_of_line(buffer).await? || !self.ends_with_empty_line(buffer).await? {
			return Ok(());
		}
		let last = self.store.line_count(buffer).await? - 1;
		let prev_len = self.line_len(buffer, last - 1).await?;
		let range = ByteRange::new(BytePosition::new(last - 1, prev_len), BytePosition::new(last, 0));
		self.store.set_text(buffer, range, &[String::new()]).await?;
		Ok(())
	}
}
