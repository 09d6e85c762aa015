use std::borrow::Cow;

/// Rewrites `\r\n` and lone `\r` line separators as `\n`.
///
/// Borrows the input when it contains no carriage returns.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
	if !text.contains('\r') {
		return Cow::Borrowed(text);
	}

	let mut out = String::with_capacity(text.len());
	let mut chars = text.chars().peekable();
	while let Some(ch) = chars.next() {
		if ch == '\r' {
			chars.next_if_eq(&'\n');
			out.push('\n');
		} else {
			out.push(ch);
		}
	}
	Cow::Owned(out)
}

/// Splits text on `\n` into buffer lines.
///
/// A trailing separator yields a trailing empty line, and empty input yields a
/// single empty line, so the result is never empty.
pub fn split_lines(text: &str) -> Vec<String> {
	text.split('\n').map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_borrows_clean_input() {
		assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed("a\nb")));
	}

	#[test]
	fn normalize_crlf_and_cr() {
		assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
		assert_eq!(normalize_line_endings("\r\r\n"), "\n\n");
	}

	#[test]
	fn split_keeps_trailing_empty_line() {
		assert_eq!(split_lines("foo\nbar\n"), vec!["foo", "bar", ""]);
		assert_eq!(split_lines(""), vec![""]);
		assert_eq!(split_lines("\n"), vec!["", ""]);
	}
}
