#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Workspace edit engine.
//!
//! Applies LSP workspace edits and code actions to the buffers of a host
//! editor. The host is reached only through the [`BufferStore`] trait; the
//! bundled [`MemoryStore`] implements it in-process.
//!
//! # Main Types
//!
//! - [`WorkspaceEditor`] - Applies a [`WorkspaceEdit`](quire_lsp::lsp_types::WorkspaceEdit) change by change
//! - [`BufferStore`] - Host buffer, window, cursor and mark primitives
//! - [`EditConfig`] - Offset encoding fallback and repair toggles
//!
//! # Flow
//!
//! ```text
//! WorkspaceEdit
//! ├── documentChanges[i]: TextDocumentEdit  -> normalize, decode, apply last-first
//! │                      CreateFile / RenameFile / DeleteFile -> tokio::fs + buffer sync
//! └── changes{uri -> edits}                 -> same as TextDocumentEdit, per uri
//! ```

/// Code action execution.
pub mod code_action;
/// Workspace edit configuration.
pub mod config;
/// Host buffer model.
pub mod store;
/// Workspace edit application.
pub mod workspace_edit;

pub use code_action::CodeActionOutcome;
pub use config::{ConfigError, EditConfig};
pub use store::{BufferId, BufferStore, MemoryStore, StoreError, WindowId};
pub use workspace_edit::{ApplyError, ApplyReport, ChangeOutcome, ChangeStatus, DocumentChange, SkipReason, WorkspaceEditor};
