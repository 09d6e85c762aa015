use std::collections::HashSet;

use quire_primitives::Mark;

use crate::store::{BufferId, BufferStore, StoreError};

/// Captures the buffer's letter marks before text is replaced.
pub(super) async fn snapshot<S: BufferStore + ?Sized>(store: &S, buffer: BufferId) -> Result<Vec<Mark>, StoreError> {
	Ok(store.marks(buffer).await?.into_iter().filter(Mark::is_local_letter).collect())
}

/// Re-inserts snapshot marks the store dropped, clamped into the new text.
///
/// Marks the store kept were already moved by it and are left alone.
pub(super) async fn repair<S: BufferStore + ?Sized>(store: &mut S, buffer: BufferId, saved: Vec<Mark>) -> Result<(), StoreError> {
	if saved.is_empty() {
		return Ok(());
	}
	let remaining: HashSet<char> = store.marks(buffer).await?.into_iter().map(|m| m.name).collect();
	let line_count = store.line_count(buffer).await?;

	let mut repaired = Vec::new();
	for mark in saved.into_iter().filter(|m| !remaining.contains(&m.name)) {
		let line = mark.position.line.min(line_count.saturating_sub(1));
		let line_len = store.line(buffer, line).await?.map_or(0, |l| l.len());
		repaired.push(mark.clamped(line_count, |_| line_len));
	}
	if repaired.is_empty() {
		return Ok(());
	}

	tracing::debug!(%buffer, count = repaired.len(), "workspace_edit.marks_restored");
	store.set_marks(buffer, &repaired).await
}
