use pretty_assertions::assert_eq;

use super::*;

fn lines(text: &[&str]) -> Vec<String> {
	text.iter().map(|s| s.to_string()).collect()
}

fn range(sl: usize, sc: usize, el: usize, ec: usize) -> ByteRange {
	ByteRange::new(BytePosition::new(sl, sc), BytePosition::new(el, ec))
}

#[tokio::test]
async fn load_strips_final_line_break() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("a.txt");
	std::fs::write(&path, "one\ntwo\n").unwrap();

	let mut store = MemoryStore::new();
	let id = store.load_buffer(&path).await.unwrap();
	assert_eq!(store.line_count(id).await.unwrap(), 2);
	assert_eq!(store.line(id, 1).await.unwrap().as_deref(), Some("two"));
	assert_eq!(store.line(id, 2).await.unwrap(), None);
	assert_eq!(store.load_buffer(&path).await.unwrap(), id, "same path must reuse the buffer");
}

#[tokio::test]
async fn load_missing_file_gives_single_empty_line() {
	let dir = tempfile::tempdir().unwrap();
	let mut store = MemoryStore::new();
	let id = store.load_buffer(&dir.path().join("new.txt")).await.unwrap();
	assert_eq!(store.line_count(id).await.unwrap(), 1);
	assert_eq!(store.line(id, 0).await.unwrap().as_deref(), Some(""));
}

#[tokio::test]
async fn write_restores_final_line_break() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("w.txt");
	let mut store = MemoryStore::new();
	let id = store.insert_buffer(&path, "alpha\nbeta");
	store.write_buffer(id).await.unwrap();
	assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nbeta\n");

	store.set_fixes_end_of_line(id, false).unwrap();
	store.write_buffer(id).await.unwrap();
	assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nbeta");
}

#[tokio::test]
async fn set_text_splits_and_joins_lines() {
	let mut store = MemoryStore::new();
	let id = store.insert_buffer("/virtual/a", "hello world\nsecond");

	store.set_text(id, range(0, 5, 0, 6), &lines(&["", ""])).await.unwrap();
	assert_eq!(store.text(id).unwrap(), "hello\nworld\nsecond");

	store.set_text(id, range(0, 5, 2, 0), &lines(&[" "])).await.unwrap();
	assert_eq!(store.text(id).unwrap(), "hello second");
}

#[tokio::test]
async fn set_text_rejects_out_of_bounds() {
	let mut store = MemoryStore::new();
	let id = store.insert_buffer("/virtual/a", "abc");
	let err = store.set_text(id, range(0, 0, 0, 9), &lines(&["x"])).await.unwrap_err();
	assert!(matches!(err, StoreError::OutOfBounds { .. }), "{err}");

	let id = store.insert_buffer("/virtual/b", "\u{00E9}");
	let err = store.set_text(id, range(0, 1, 0, 2), &lines(&["x"])).await.unwrap_err();
	assert!(matches!(err, StoreError::OutOfBounds { .. }), "mid-character column must be rejected");
}

#[tokio::test]
async fn marks_follow_line_changes() {
	let mut store = MemoryStore::new();
	let id = store.insert_buffer("/virtual/m", "0\n1\n2\n3\n4");
	store
		.set_marks(
			id,
			&[
				Mark::new('a', BytePosition::new(0, 0)),
				Mark::new('b', BytePosition::new(2, 0)),
				Mark::new('c', BytePosition::new(4, 0)),
			],
		)
		.await
		.unwrap();

	// Replace lines 1..=2 with a single line: mark on line 2 goes away, line 4 moves up.
	store.set_text(id, range(1, 0, 2, 1), &lines(&["x"])).await.unwrap();
	let marks = store.marks(id).await.unwrap();
	assert_eq!(
		marks,
		vec![Mark::new('a', BytePosition::new(0, 0)), Mark::new('c', BytePosition::new(3, 0))]
	);
}

#[tokio::test]
async fn delete_buffer_closes_its_windows() {
	let mut store = MemoryStore::new();
	let a = store.insert_buffer("/virtual/a", "a");
	let b = store.insert_buffer("/virtual/b", "b");
	let win_a = store.open_window(a).unwrap();
	let win_b = store.open_window(b).unwrap();
	assert_eq!(store.focused_buffer().await, Some(b));

	store.delete_buffer(b).await.unwrap();
	assert!(store.window_buffer(win_b).is_none());
	assert_eq!(store.focused_buffer().await, Some(a));
	assert_eq!(store.windows_showing(a).await, vec![win_a]);
	assert!(matches!(store.delete_buffer(b).await, Err(StoreError::UnknownBuffer(_))));
}

#[tokio::test]
async fn cursor_is_clamped_when_text_shrinks() {
	let mut store = MemoryStore::new();
	let id = store.insert_buffer("/virtual/c", "first\nsecond line");
	store.open_window(id).unwrap();
	store.set_cursor(BytePosition::new(1, 8)).await.unwrap();

	store.set_text(id, range(0, 5, 1, 11), &lines(&[""])).await.unwrap();
	assert_eq!(store.cursor().await, Some(BytePosition::new(0, 5)));
	assert!(store.set_cursor(BytePosition::new(3, 0)).await.is_err());
}
