use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Converts a filesystem path to an LSP URI.
///
/// Relative paths are resolved against the current directory. Absolute paths
/// are used as given, so the URI of a file that does not exist yet (the target
/// of a create or rename) matches the one the server would send.
/// Returns `None` if the path cannot be converted.
pub fn uri_from_path(path: &Path) -> Option<lsp_types::Uri> {
	let abs_path = if path.is_absolute() {
		path.to_path_buf()
	} else {
		std::env::current_dir().ok()?.join(path)
	};

	let url = url::Url::from_file_path(abs_path).ok()?;
	lsp_types::Uri::from_str(url.as_str()).ok()
}

/// Converts an LSP URI to a filesystem path.
///
/// Returns `None` if the URI is not a `file://` scheme or cannot be parsed.
pub fn path_from_uri(uri: &lsp_types::Uri) -> Option<PathBuf> {
	let url = url::Url::from_str(uri.as_str()).ok()?;
	url.to_file_path().ok()
}
