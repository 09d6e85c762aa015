//! LSP workspace edit application.
//!
//! Applies a [`WorkspaceEdit`] to the buffers of a [`BufferStore`], one
//! document change at a time and in document order. Text edits are translated
//! from the server's offset encoding, normalized, and applied last-first;
//! cursor and marks are repaired afterwards. File operations (create, rename,
//! delete) keep open buffers and windows consistent with the filesystem.
//!
//! Application is best-effort: every document change produces its own
//! [`ChangeOutcome`] and a failure never stops later changes. Nothing is rolled
//! back, and document versions carried by the edit are not checked.

use std::fmt;
use std::path::PathBuf;

use quire_lsp::lsp_types::{
	AnnotatedTextEdit, CreateFile, DeleteFile, DocumentChangeOperation, DocumentChanges, OneOf, RenameFile, ResourceOp,
	TextDocumentEdit, TextEdit, Uri, WorkspaceEdit,
};
use quire_lsp::{OffsetEncoding, path_from_uri};
use thiserror::Error;

use crate::config::EditConfig;
use crate::store::{BufferStore, StoreError};

mod cursor;
mod marks;
mod resource;
mod text;

/// One entry of a workspace edit, decoded from its wire shape.
#[derive(Debug, Clone)]
pub enum DocumentChange {
	/// Text edits for one document (the untagged wire case).
	Edit(TextDocumentEdit),
	/// `kind: "create"`.
	Create(CreateFile),
	/// `kind: "rename"`.
	Rename(RenameFile),
	/// `kind: "delete"`.
	Delete(DeleteFile),
}

impl From<DocumentChangeOperation> for DocumentChange {
	fn from(op: DocumentChangeOperation) -> Self {
		match op {
			DocumentChangeOperation::Edit(edit) => Self::Edit(edit),
			DocumentChangeOperation::Op(ResourceOp::Create(create)) => Self::Create(create),
			DocumentChangeOperation::Op(ResourceOp::Rename(rename)) => Self::Rename(rename),
			DocumentChangeOperation::Op(ResourceOp::Delete(delete)) => Self::Delete(delete),
		}
	}
}

impl DocumentChange {
	/// Decodes the ordered `documentChanges` array.
	pub fn from_document_changes(changes: DocumentChanges) -> Vec<Self> {
		match changes {
			DocumentChanges::Edits(edits) => edits.into_iter().map(Self::Edit).collect(),
			DocumentChanges::Operations(ops) => ops.into_iter().map(Self::from).collect(),
		}
	}

	/// The URI this change is about, for reporting.
	pub fn target(&self) -> String {
		match self {
			Self::Edit(edit) => edit.text_document.uri.to_string(),
			Self::Create(create) => create.uri.to_string(),
			Self::Rename(rename) => format!("{} -> {}", rename.old_uri.as_str(), rename.new_uri.as_str()),
			Self::Delete(delete) => delete.uri.to_string(),
		}
	}
}

/// How a document change that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
	/// The change took effect (an empty edit list counts).
	Applied,
	/// The change was intentionally not performed.
	Skipped(SkipReason),
}

/// Why a file operation was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// Create target exists and `overwrite` was not requested.
	AlreadyExists,
	/// Rename target exists and may not be overwritten.
	TargetExists,
	/// Delete target is missing and `ignoreIfNotExists` was requested.
	Missing,
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::AlreadyExists => "file already exists",
			Self::TargetExists => "rename target already exists",
			Self::Missing => "file does not exist",
		})
	}
}

/// Errors from applying a single document change.
#[derive(Debug, Error)]
pub enum ApplyError {
	/// The URI could not be converted to a local path.
	#[error("invalid uri: {0}")]
	InvalidUri(String),
	/// The buffer store rejected an operation.
	#[error(transparent)]
	Store(#[from] StoreError),
	/// A resource create operation failed.
	#[error("create file failed: {uri}: {reason}")]
	CreateFailed { uri: String, reason: String },
	/// A resource rename operation failed.
	#[error("rename file failed: {old_uri} -> {new_uri}: {reason}")]
	RenameFailed { old_uri: String, new_uri: String, reason: String },
	/// A resource delete operation failed.
	#[error("delete file failed: {uri}: {reason}")]
	DeleteFailed { uri: String, reason: String },
	/// A delete targeted a path that does not exist.
	#[error("cannot delete missing file or directory: {0}")]
	NotFound(String),
	/// A forwarded command failed on the server side.
	#[error("command failed: {0}")]
	Command(#[from] quire_lsp::Error),
}

/// Result of one document change.
#[derive(Debug)]
pub struct ChangeOutcome {
	/// Zero-based index in `documentChanges`, or in the URI-sorted `changes`.
	pub index: usize,
	/// The document the change targeted.
	pub target: String,
	/// What happened.
	pub result: Result<ChangeStatus, ApplyError>,
}

impl fmt::Display for ChangeOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.result {
			Ok(ChangeStatus::Applied) => write!(f, "change {} ({}): applied", self.index, self.target),
			Ok(ChangeStatus::Skipped(reason)) => write!(f, "change {} ({}): skipped, {reason}", self.index, self.target),
			Err(e) => write!(f, "change {} ({}): {e}", self.index, self.target),
		}
	}
}

/// Per-change results of one workspace edit application.
#[derive(Debug, Default)]
pub struct ApplyReport {
	/// One entry per document change, in application order.
	pub outcomes: Vec<ChangeOutcome>,
}

impl ApplyReport {
	/// Returns `true` if no change failed.
	pub fn is_success(&self) -> bool {
		self.outcomes.iter().all(|o| o.result.is_ok())
	}

	/// Iterates over the changes that failed.
	pub fn failures(&self) -> impl Iterator<Item = &ChangeOutcome> {
		self.outcomes.iter().filter(|o| o.result.is_err())
	}

	/// Iterates over the changes that were skipped.
	pub fn skipped(&self) -> impl Iterator<Item = &ChangeOutcome> {
		self.outcomes.iter().filter(|o| matches!(o.result, Ok(ChangeStatus::Skipped(_))))
	}

	/// Returns `true` if the edit carried no document changes.
	pub fn is_empty(&self) -> bool {
		self.outcomes.is_empty()
	}
}

/// Applies workspace edits to a [`BufferStore`] for one server connection.
pub struct WorkspaceEditor<'a, S: BufferStore + ?Sized> {
	store: &'a mut S,
	config: EditConfig,
	encoding: OffsetEncoding,
}

impl<'a, S: BufferStore + ?Sized> WorkspaceEditor<'a, S> {
	/// Creates an editor using the configured fallback offset encoding.
	pub fn new(store: &'a mut S, config: EditConfig) -> Self {
		Self {
			store,
			encoding: config.offset_encoding,
			config,
		}
	}

	/// Uses the encoding negotiated with the server.
	pub fn with_offset_encoding(mut self, encoding: OffsetEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	/// The offset encoding positions are decoded with.
	pub fn offset_encoding(&self) -> OffsetEncoding {
		self.encoding
	}

	/// Applies every document change of `edit`, best-effort.
	///
	/// `documentChanges` is authoritative and applied in array order when
	/// present. Otherwise the legacy `changes` map is applied one URI at a
	/// time. An edit with neither is a no-op.
	pub async fn apply_workspace_edit(&mut self, edit: WorkspaceEdit) -> ApplyReport {
		let mut report = ApplyReport::default();

		if let Some(document_changes) = edit.document_changes {
			for (index, change) in DocumentChange::from_document_changes(document_changes).into_iter().enumerate() {
				let target = change.target();
				let result = self.apply_document_change(change).await;
				report.outcomes.push(log_outcome(ChangeOutcome { index, target, result }));
			}
			return report;
		}

		if let Some(changes) = edit.changes {
			// Cross-document order is unspecified; sort for stable reports.
			let mut changes: Vec<(Uri, Vec<TextEdit>)> = changes.into_iter().collect();
			changes.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
			for (index, (uri, edits)) in changes.into_iter().enumerate() {
				let target = uri.to_string();
				let result = self.apply_uri_text_edits(&uri, &edits).await;
				report.outcomes.push(log_outcome(ChangeOutcome { index, target, result }));
			}
		}

		report
	}

	/// Applies a single document change.
	pub async fn apply_document_change(&mut self, change: DocumentChange) -> Result<ChangeStatus, ApplyError> {
		match change {
			DocumentChange::Edit(edit) => {
				// Versions are accepted as-is; stale edits are not detected.
				let edits = normalize_text_document_edits(edit.edits);
				self.apply_uri_text_edits(&edit.text_document.uri, &edits).await
			}
			DocumentChange::Create(create) => self.create_file(create).await,
			DocumentChange::Rename(rename) => self.rename_file(rename).await,
			DocumentChange::Delete(delete) => self.delete_file(delete).await,
		}
	}

	async fn apply_uri_text_edits(&mut self, uri: &Uri, edits: &[TextEdit]) -> Result<ChangeStatus, ApplyError> {
		if edits.is_empty() {
			return Ok(ChangeStatus::Applied);
		}
		let path = uri_to_path(uri)?;
		let buffer = self.store.load_buffer(&path).await?;
		self.apply_text_edits(buffer, edits).await?;
		Ok(ChangeStatus::Applied)
	}
}

fn log_outcome(outcome: ChangeOutcome) -> ChangeOutcome {
	match &outcome.result {
		Ok(ChangeStatus::Applied) => {
			tracing::debug!(index = outcome.index, target = %outcome.target, "workspace_edit.change_applied");
		}
		Ok(ChangeStatus::Skipped(reason)) => {
			tracing::info!(index = outcome.index, target = %outcome.target, %reason, "workspace_edit.change_skipped");
		}
		Err(error) => {
			tracing::error!(index = outcome.index, target = %outcome.target, %error, "workspace_edit.change_failed");
		}
	}
	outcome
}

pub(crate) fn uri_to_path(uri: &Uri) -> Result<PathBuf, ApplyError> {
	path_from_uri(uri).ok_or_else(|| ApplyError::InvalidUri(uri.to_string()))
}

fn normalize_text_document_edits(edits: Vec<OneOf<TextEdit, AnnotatedTextEdit>>) -> Vec<TextEdit> {
	edits
		.into_iter()
		.map(|edit| match edit {
			OneOf::Left(edit) => edit,
			OneOf::Right(AnnotatedTextEdit { text_edit, .. }) => text_edit,
		})
		.collect()
}
