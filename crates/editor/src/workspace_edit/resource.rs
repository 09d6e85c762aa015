//! Create, rename and delete operations from `documentChanges`.
//!
//! The filesystem is touched through `tokio::fs`; open buffers are kept in
//! step through the [`BufferStore`]. Each operation fails on its own and never
//! undoes earlier ones.

use std::io;
use std::path::{Path, PathBuf};

use quire_lsp::lsp_types::{CreateFile, DeleteFile, RenameFile};
use tokio::fs;

use super::{ApplyError, ChangeStatus, SkipReason, WorkspaceEditor, uri_to_path};
use crate::store::{BufferId, BufferStore};

impl<S: BufferStore + ?Sized> WorkspaceEditor<'_, S> {
	/// Creates an empty file and registers a buffer for it.
	///
	/// An existing file is only truncated when `overwrite` is requested. The
	/// buffer is registered either way.
	pub(super) async fn create_file(&mut self, create: CreateFile) -> Result<ChangeStatus, ApplyError> {
		let path = uri_to_path(&create.uri)?;
		let overwrite = create.options.as_ref().is_some_and(|o| o.overwrite == Some(true));

		let status = if !overwrite && exists(&path).await {
			ChangeStatus::Skipped(SkipReason::AlreadyExists)
		} else {
			let failed = |e: io::Error| ApplyError::CreateFailed {
				uri: create.uri.to_string(),
				reason: e.to_string(),
			};
			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent).await.map_err(failed)?;
			}
			fs::File::create(&path).await.map_err(failed)?;
			ChangeStatus::Applied
		};

		self.store.load_buffer(&path).await?;
		Ok(status)
	}

	/// Renames a file or directory and moves open buffers along with it.
	///
	/// Buffers under the source path are written to disk first so unsaved text
	/// is not lost, then reopened at their new path in every window that
	/// showed them.
	pub(super) async fn rename_file(&mut self, rename: RenameFile) -> Result<ChangeStatus, ApplyError> {
		let old_path = uri_to_path(&rename.old_uri)?;
		let new_path = uri_to_path(&rename.new_uri)?;
		let overwrite = rename.options.as_ref().is_some_and(|o| o.overwrite == Some(true));
		let ignore_if_exists = rename.options.as_ref().is_some_and(|o| o.ignore_if_exists == Some(true));
		let failed = |reason: String| ApplyError::RenameFailed {
			old_uri: rename.old_uri.to_string(),
			new_uri: rename.new_uri.to_string(),
			reason,
		};

		if exists(&new_path).await {
			if !overwrite || ignore_if_exists {
				return Ok(ChangeStatus::Skipped(SkipReason::TargetExists));
			}
			remove_path(&new_path, true)
				.await
				.map_err(|e| failed(format!("removing existing target: {e}")))?;
		}

		let affected = self.buffers_under(&old_path).await;
		for (buffer, _) in &affected {
			self.store.write_buffer(*buffer).await?;
		}

		if let Some(parent) = new_path.parent() {
			fs::create_dir_all(parent).await.map_err(|e| failed(e.to_string()))?;
		}
		fs::rename(&old_path, &new_path).await.map_err(|e| failed(e.to_string()))?;

		for (old_buffer, path) in affected {
			let Ok(suffix) = path.strip_prefix(&old_path) else {
				continue;
			};
			let moved = if suffix.as_os_str().is_empty() {
				new_path.clone()
			} else {
				new_path.join(suffix)
			};
			let new_buffer = self.store.load_buffer(&moved).await?;
			for window in self.store.windows_showing(old_buffer).await {
				self.store.set_window_buffer(window, new_buffer).await?;
			}
			self.store.delete_buffer(old_buffer).await?;
			tracing::debug!(from = %path.display(), to = %moved.display(), "workspace_edit.buffer_moved");
		}

		Ok(ChangeStatus::Applied)
	}

	/// Deletes a file or directory and discards buffers that pointed into it.
	pub(super) async fn delete_file(&mut self, delete: DeleteFile) -> Result<ChangeStatus, ApplyError> {
		let path = uri_to_path(&delete.uri)?;
		let recursive = delete.options.as_ref().is_some_and(|o| o.recursive == Some(true));
		let ignore_if_not_exists = delete.options.as_ref().is_some_and(|o| o.ignore_if_not_exists == Some(true));

		if !exists(&path).await {
			if ignore_if_not_exists {
				return Ok(ChangeStatus::Skipped(SkipReason::Missing));
			}
			return Err(ApplyError::NotFound(path.display().to_string()));
		}

		remove_path(&path, recursive).await.map_err(|e| ApplyError::DeleteFailed {
			uri: delete.uri.to_string(),
			reason: e.to_string(),
		})?;

		for (buffer, _) in self.buffers_under(&path).await {
			self.store.delete_buffer(buffer).await?;
		}
		Ok(ChangeStatus::Applied)
	}

	/// Open buffers whose path is `root` or lies beneath it.
	async fn buffers_under(&self, root: &Path) -> Vec<(BufferId, PathBuf)> {
		self.store.buffers().await.into_iter().filter(|(_, path)| path.starts_with(root)).collect()
	}
}

async fn exists(path: &Path) -> bool {
	fs::try_exists(path).await.unwrap_or(false)
}

async fn remove_path(path: &Path, recursive: bool) -> io::Result<()> {
	let metadata = fs::symlink_metadata(path).await?;
	if !metadata.is_dir() {
		fs::remove_file(path).await
	} else if recursive {
		fs::remove_dir_all(path).await
	} else {
		fs::remove_dir(path).await
	}
}
