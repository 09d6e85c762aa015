//! LSP-facing half of the workspace edit engine.
//!
//! Language servers describe positions as `(line, character)` pairs where
//! `character` counts code units of a negotiated [`OffsetEncoding`]. Host
//! buffers address text by byte column. This crate owns the translation
//! between the two, the ordering rules for applying a batch of
//! [`lsp_types::TextEdit`]s, URI/path conversion, and the [`CommandTransport`]
//! seam used to forward `workspace/executeCommand`.
#![warn(missing_docs)]

/// Re-export of the [`lsp_types`] dependency of this crate.
pub use lsp_types;
pub use serde_json::Value as JsonValue;

mod encoding;
pub mod position;
pub mod range;
mod transport;
mod uri;

pub use encoding::OffsetEncoding;
pub use position::{decode_column, decode_position};
pub use range::{normalize_edit, normalize_range, order_for_application, position_before};
pub use transport::{CommandTransport, execute_command};
pub use uri::{path_from_uri, uri_from_path};

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by the LSP transport collaborator.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The server connection is gone.
	#[error("service stopped")]
	ServiceStopped,
	/// A payload could not be encoded or decoded.
	#[error("deserialization failed: {0}")]
	Deserialize(String),
	/// The server answered with an error response.
	#[error("{message} (code {code})")]
	Response {
		/// JSON-RPC error code.
		code: i64,
		/// Server-provided message.
		message: String,
	},
	/// The server does not support the request.
	#[error("unsupported request: {0}")]
	Unsupported(String),
	/// The peer violates the Language Server Protocol.
	#[error("protocol error: {0}")]
	Protocol(String),
}

impl From<serde_json::Error> for Error {
	fn from(e: serde_json::Error) -> Self {
		Self::Deserialize(e.to_string())
	}
}
