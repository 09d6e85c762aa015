use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quire_primitives::{BytePosition, ByteRange, Mark};
use ropey::Rope;

use super::{BufferId, BufferStore, StoreError, WindowId};

/// In-process [`BufferStore`] backed by ropes.
///
/// Behaves like a minimal modal editor: buffers are loaded from and written to
/// disk, windows show one buffer each, the focused window owns the cursor, and
/// marks follow line insertions and removals. A mark whose line is replaced
/// away is dropped rather than moved.
#[derive(Debug, Default)]
pub struct MemoryStore {
	buffers: BTreeMap<BufferId, MemoryBuffer>,
	windows: BTreeMap<WindowId, Window>,
	focused: Option<WindowId>,
	next_id: u64,
}

#[derive(Debug)]
struct MemoryBuffer {
	path: PathBuf,
	text: Rope,
	marks: BTreeMap<char, BytePosition>,
	listed: bool,
	fixes_eol: bool,
}

#[derive(Debug, Clone, Copy)]
struct Window {
	buffer: BufferId,
	cursor: BytePosition,
}

impl MemoryBuffer {
	fn new(path: PathBuf, text: &str) -> Self {
		Self {
			path,
			text: Rope::from_str(text),
			marks: BTreeMap::new(),
			listed: false,
			fixes_eol: true,
		}
	}

	/// File contents lose their final line break; it is implied by the line model.
	fn from_file(path: PathBuf, contents: &str) -> Self {
		Self::new(path, contents.strip_suffix('\n').unwrap_or(contents))
	}

	fn line_count(&self) -> usize {
		self.text.len_lines()
	}

	fn line(&self, index: usize) -> Option<String> {
		if index >= self.line_count() {
			return None;
		}
		let mut line = self.text.line(index).to_string();
		if line.ends_with('\n') {
			line.pop();
		}
		Some(line)
	}

	fn line_len(&self, index: usize) -> Option<usize> {
		if index >= self.line_count() {
			return None;
		}
		let slice = self.text.line(index);
		let len = slice.len_bytes();
		if len > 0 && slice.byte(len - 1) == b'\n' { Some(len - 1) } else { Some(len) }
	}

	fn byte_offset(&self, pos: BytePosition) -> Option<usize> {
		let len = self.line_len(pos.line)?;
		if pos.column > len {
			return None;
		}
		let offset = self.text.line_to_byte(pos.line) + pos.column;
		let on_boundary = self.text.char_to_byte(self.text.byte_to_char(offset)) == offset;
		on_boundary.then_some(offset)
	}

	fn replace(&mut self, range: ByteRange, lines: &[String]) -> bool {
		let (Some(start), Some(end)) = (self.byte_offset(range.start), self.byte_offset(range.end)) else {
			return false;
		};
		if end < start {
			return false;
		}
		let start_char = self.text.byte_to_char(start);
		let end_char = self.text.byte_to_char(end);
		self.text.remove(start_char..end_char);
		self.text.insert(start_char, &lines.join("\n"));
		self.adjust_marks(range, lines.len().max(1));
		true
	}

	fn adjust_marks(&mut self, range: ByteRange, new_lines: usize) {
		let old_span = range.line_span();
		let line_count = self.line_count();
		self.marks.retain(|_, pos| {
			if pos.line > range.end.line {
				pos.line = pos.line + new_lines - old_span;
			} else if pos.line > range.start.line && pos.line - range.start.line >= new_lines {
				return false;
			}
			pos.line < line_count
		});
	}

	fn contents(&self) -> String {
		let mut out = self.text.to_string();
		if self.fixes_eol && !out.is_empty() {
			out.push('\n');
		}
		out
	}
}

impl MemoryStore {
	/// Creates an empty store with no buffers or windows.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a buffer with the given content without touching the disk.
	///
	/// `text` is the buffer content with lines joined by `\n`.
	pub fn insert_buffer(&mut self, path: impl Into<PathBuf>, text: &str) -> BufferId {
		let id = BufferId(self.next_id());
		self.buffers.insert(id, MemoryBuffer::new(path.into(), text));
		id
	}

	/// Opens a focused window on `buffer` with the cursor at the origin.
	pub fn open_window(&mut self, buffer: BufferId) -> Result<WindowId, StoreError> {
		self.buffer(buffer)?;
		let id = WindowId(self.next_id());
		self.windows.insert(
			id,
			Window {
				buffer,
				cursor: BytePosition::default(),
			},
		);
		self.focused = Some(id);
		Ok(id)
	}

	/// Returns the buffer shown in `window`.
	pub fn window_buffer(&self, window: WindowId) -> Option<BufferId> {
		self.windows.get(&window).map(|w| w.buffer)
	}

	/// Returns the buffer content with lines joined by `\n`.
	pub fn text(&self, buffer: BufferId) -> Option<String> {
		self.buffers.get(&buffer).map(|b| b.text.to_string())
	}

	/// Returns the backing path of a buffer.
	pub fn path(&self, buffer: BufferId) -> Option<&Path> {
		self.buffers.get(&buffer).map(|b| b.path.as_path())
	}

	/// Returns `true` if the buffer is in the buffer list.
	pub fn is_listed(&self, buffer: BufferId) -> bool {
		self.buffers.get(&buffer).is_some_and(|b| b.listed)
	}

	/// Sets whether the buffer gets a final line break on write.
	pub fn set_fixes_end_of_line(&mut self, buffer: BufferId, fixes: bool) -> Result<(), StoreError> {
		self.buffer_mut(buffer)?.fixes_eol = fixes;
		Ok(())
	}

	fn next_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	fn buffer(&self, id: BufferId) -> Result<&MemoryBuffer, StoreError> {
		self.buffers.get(&id).ok_or(StoreError::UnknownBuffer(id))
	}

	fn buffer_mut(&mut self, id: BufferId) -> Result<&mut MemoryBuffer, StoreError> {
		self.buffers.get_mut(&id).ok_or(StoreError::UnknownBuffer(id))
	}

	/// Pulls cursors of windows showing `buffer` back inside its text.
	fn clamp_cursors(&mut self, buffer: BufferId) {
		let Some(buf) = self.buffers.get(&buffer) else {
			return;
		};
		for window in self.windows.values_mut().filter(|w| w.buffer == buffer) {
			let line = window.cursor.line.min(buf.line_count().saturating_sub(1));
			let column = window.cursor.column.min(buf.line_len(line).unwrap_or(0));
			window.cursor = BytePosition::new(line, column);
		}
	}
}

#[async_trait(?Send)]
impl BufferStore for MemoryStore {
	async fn load_buffer(&mut self, path: &Path) -> Result<BufferId, StoreError> {
		if let Some(id) = self.find_buffer(path).await {
			return Ok(id);
		}
		let buffer = match tokio::fs::read_to_string(path).await {
			Ok(contents) => MemoryBuffer::from_file(path.to_path_buf(), &contents),
			Err(e) if e.kind() == ErrorKind::NotFound => MemoryBuffer::new(path.to_path_buf(), ""),
			Err(source) => {
				return Err(StoreError::Io {
					path: path.to_path_buf(),
					source,
				});
			}
		};
		let id = BufferId(self.next_id());
		self.buffers.insert(id, buffer);
		Ok(id)
	}

	async fn find_buffer(&self, path: &Path) -> Option<BufferId> {
		self.buffers.iter().find(|(_, b)| b.path == path).map(|(id, _)| *id)
	}

	async fn buffers(&self) -> Vec<(BufferId, PathBuf)> {
		self.buffers.iter().map(|(id, b)| (*id, b.path.clone())).collect()
	}

	async fn set_listed(&mut self, buffer: BufferId) -> Result<(), StoreError> {
		self.buffer_mut(buffer)?.listed = true;
		Ok(())
	}

	async fn line(&self, buffer: BufferId, index: usize) -> Result<Option<String>, StoreError> {
		Ok(self.buffer(buffer)?.line(index))
	}

	async fn line_count(&self, buffer: BufferId) -> Result<usize, StoreError> {
		Ok(self.buffer(buffer)?.line_count())
	}

	async fn set_text(&mut self, buffer: BufferId, range: ByteRange, lines: &[String]) -> Result<(), StoreError> {
		if !self.buffer_mut(buffer)?.replace(range, lines) {
			return Err(StoreError::OutOfBounds {
				buffer,
				start: range.start,
				end: range.end,
			});
		}
		self.clamp_cursors(buffer);
		Ok(())
	}

	async fn focused_buffer(&self) -> Option<BufferId> {
		self.focused.and_then(|w| self.window_buffer(w))
	}

	async fn cursor(&self) -> Option<BytePosition> {
		self.focused.and_then(|w| self.windows.get(&w)).map(|w| w.cursor)
	}

	async fn set_cursor(&mut self, position: BytePosition) -> Result<(), StoreError> {
		let Some(window_id) = self.focused else {
			return Ok(());
		};
		let window = self.windows.get(&window_id).ok_or(StoreError::UnknownWindow(window_id))?;
		let buffer = self.buffer(window.buffer)?;
		if buffer.line_len(position.line).is_none_or(|len| position.column > len) {
			return Err(StoreError::OutOfBounds {
				buffer: window.buffer,
				start: position,
				end: position,
			});
		}
		if let Some(window) = self.windows.get_mut(&window_id) {
			window.cursor = position;
		}
		Ok(())
	}

	async fn marks(&self, buffer: BufferId) -> Result<Vec<Mark>, StoreError> {
		Ok(self.buffer(buffer)?.marks.iter().map(|(name, pos)| Mark::new(*name, *pos)).collect())
	}

	async fn set_marks(&mut self, buffer: BufferId, marks: &[Mark]) -> Result<(), StoreError> {
		let buf = self.buffer_mut(buffer)?;
		for mark in marks {
			buf.marks.insert(mark.name, mark.position);
		}
		Ok(())
	}

	async fn delete_buffer(&mut self, buffer: BufferId) -> Result<(), StoreError> {
		self.buffers.remove(&buffer).ok_or(StoreError::UnknownBuffer(buffer))?;
		self.windows.retain(|_, w| w.buffer != buffer);
		if self.focused.is_some_and(|w| !self.windows.contains_key(&w)) {
			self.focused = self.windows.keys().next().copied();
		}
		Ok(())
	}

	async fn windows_showing(&self, buffer: BufferId) -> Vec<WindowId> {
		self.windows.iter().filter(|(_, w)| w.buffer == buffer).map(|(id, _)| *id).collect()
	}

	async fn set_window_buffer(&mut self, window: WindowId, buffer: BufferId) -> Result<(), StoreError> {
		self.buffer(buffer)?;
		let win = self.windows.get_mut(&window).ok_or(StoreError::UnknownWindow(window))?;
		win.buffer = buffer;
		self.clamp_cursors(buffer);
		Ok(())
	}

	async fn write_buffer(&mut self, buffer: BufferId) -> Result<(), StoreError> {
		let buf = self.buffer(buffer)?;
		let (path, contents) = (buf.path.clone(), buf.contents());
		tokio::fs::write(&path, contents).await.map_err(|source| StoreError::Io {
			path: path.clone(),
			source,
		})
	}

	async fn fixes_end_of_line(&self, buffer: BufferId) -> Result<bool, StoreError> {
		Ok(self.buffer(buffer)?.fixes_eol)
	}
}
