//! Host editor buffer model.
//!
//! The engine never touches editor state directly. Each host (a terminal
//! editor, an RPC bridge to another editor process, the bundled
//! [`MemoryStore`]) implements [`BufferStore`] once, and the engine is
//! instantiated against that implementation at startup.
//!
//! All coordinates are zero-based lines and byte columns. Lines are returned
//! without their terminator, and a loaded buffer always has at least one line.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quire_primitives::{BytePosition, ByteRange, Mark};
use thiserror::Error;

mod memory;

pub use memory::MemoryStore;

/// Handle to a buffer owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u64);

impl std::fmt::Display for BufferId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "buffer#{}", self.0)
	}
}

/// Handle to a window owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "window#{}", self.0)
	}
}

/// Errors reported by a [`BufferStore`].
#[derive(Debug, Error)]
pub enum StoreError {
	/// The buffer handle is stale or was never issued.
	#[error("unknown {0}")]
	UnknownBuffer(BufferId),
	/// The window handle is stale or was never issued.
	#[error("unknown {0}")]
	UnknownWindow(WindowId),
	/// A range does not address existing text.
	#[error("range {start}..{end} out of bounds in {buffer}")]
	OutOfBounds {
		buffer: BufferId,
		start: BytePosition,
		end: BytePosition,
	},
	/// Reading or writing the backing file failed.
	#[error("i/o error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Buffer, window, cursor and mark primitives provided by the host editor.
///
/// Every call is a suspension point. The engine issues calls for one buffer
/// strictly in order and relies on each mutation being visible to the next
/// read.
#[async_trait(?Send)]
pub trait BufferStore {
	/// Returns the buffer for `path`, creating and loading it if needed.
	async fn load_buffer(&mut self, path: &Path) -> Result<BufferId, StoreError>;

	/// Returns the buffer for `path` if one is open.
	async fn find_buffer(&self, path: &Path) -> Option<BufferId>;

	/// Lists every open buffer with its backing path.
	async fn buffers(&self) -> Vec<(BufferId, PathBuf)>;

	/// Makes the buffer show up in the host's buffer list.
	async fn set_listed(&mut self, buffer: BufferId) -> Result<(), StoreError>;

	/// Returns line `index`, or `None` past the end of the buffer.
	async fn line(&self, buffer: BufferId, index: usize) -> Result<Option<String>, StoreError>;

	/// Returns the number of lines.
	async fn line_count(&self, buffer: BufferId) -> Result<usize, StoreError>;

	/// Replaces the byte range with `lines`, joined by line breaks.
	///
	/// An insertion of `["", ""]` splits a line; an empty-range replacement of
	/// `[""]` is a no-op.
	async fn set_text(&mut self, buffer: BufferId, range: ByteRange, lines: &[String]) -> Result<(), StoreError>;

	/// Returns the buffer shown in the focused window.
	async fn focused_buffer(&self) -> Option<BufferId>;

	/// Returns the focused window's cursor.
	async fn cursor(&self) -> Option<BytePosition>;

	/// Moves the focused window's cursor.
	async fn set_cursor(&mut self, position: BytePosition) -> Result<(), StoreError>;

	/// Returns every mark set in the buffer.
	async fn marks(&self, buffer: BufferId) -> Result<Vec<Mark>, StoreError>;

	/// Sets (or moves) the given marks.
	async fn set_marks(&mut self, buffer: BufferId, marks: &[Mark]) -> Result<(), StoreError>;

	/// Discards the buffer handle, closing windows still showing it.
	async fn delete_buffer(&mut self, buffer: BufferId) -> Result<(), StoreError>;

	/// Lists windows currently showing the buffer.
	async fn windows_showing(&self, buffer: BufferId) -> Vec<WindowId>;

	/// Points a window at another buffer.
	async fn set_window_buffer(&mut self, window: WindowId, buffer: BufferId) -> Result<(), StoreError>;

	/// Writes the buffer content to its backing file.
	async fn write_buffer(&mut self, buffer: BufferId) -> Result<(), StoreError>;

	/// Returns `true` if the buffer gets a final line break on write, making a
	/// trailing empty line redundant.
	async fn fixes_end_of_line(&self, buffer: BufferId) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests;
