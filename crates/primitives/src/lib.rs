//! Core types shared by the workspace edit engine and buffer stores.
//!
//! Everything here is expressed in the host buffer's native coordinate space:
//! zero-based line indices and byte columns within a line (line terminators
//! excluded). Conversion from LSP code-unit offsets lives in `quire-lsp`.

/// Named per-buffer bookmarks.
pub mod mark;
/// Byte-based positions and ranges.
pub mod position;
/// Line splitting and newline normalization.
pub mod text;

pub use mark::Mark;
pub use position::{BytePosition, ByteRange};
