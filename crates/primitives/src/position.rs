/// A position in a buffer, measured as a line index and a byte column.
///
/// Ordering is document order: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BytePosition {
	/// Zero-based line index.
	pub line: usize,
	/// Zero-based byte offset within the line.
	pub column: usize,
}

impl BytePosition {
	/// Creates a new byte position.
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

impl std::fmt::Display for BytePosition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// A half-open byte range `[start, end)` spanning one or more lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteRange {
	/// Start position (inclusive).
	pub start: BytePosition,
	/// End position (exclusive).
	pub end: BytePosition,
}

impl ByteRange {
	/// Creates a new range. No ordering is enforced; see [`ByteRange::normalized`].
	pub const fn new(start: BytePosition, end: BytePosition) -> Self {
		Self { start, end }
	}

	/// Creates a zero-length range at a position.
	pub const fn point(pos: BytePosition) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns a copy with `start <= end`.
	pub fn normalized(self) -> Self {
		if self.end < self.start {
			Self::new(self.end, self.start)
		} else {
			self
		}
	}

	/// Number of lines touched by the range, counting both ends.
	pub fn line_span(&self) -> usize {
		let range = self.normalized();
		range.end.line - range.start.line + 1
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn ordering_is_line_then_column() {
		assert!(BytePosition::new(0, 10) < BytePosition::new(1, 0));
		assert!(BytePosition::new(2, 3) < BytePosition::new(2, 4));
		assert_eq!(BytePosition::new(1, 1).cmp(&BytePosition::new(1, 1)), std::cmp::Ordering::Equal);
	}

	#[test]
	fn normalized_swaps_reversed_range() {
		let range = ByteRange::new(BytePosition::new(2, 5), BytePosition::new(1, 0));
		let fixed = range.normalized();
		assert_eq!(fixed.start, BytePosition::new(1, 0));
		assert_eq!(fixed.end, BytePosition::new(2, 5));
		assert_eq!(fixed.line_span(), 2);
	}

	proptest! {
		#[test]
		fn normalized_is_ordered(a in 0usize..50, b in 0usize..50, c in 0usize..50, d in 0usize..50) {
			let range = ByteRange::new(BytePosition::new(a, b), BytePosition::new(c, d)).normalized();
			prop_assert!(range.start <= range.end);
		}
	}
}
