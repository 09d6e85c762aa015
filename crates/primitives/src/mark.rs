use crate::BytePosition;

/// A named position bookmark owned by a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
	/// Mark name, a single character.
	pub name: char,
	/// Where the mark points.
	pub position: BytePosition,
}

impl Mark {
	/// Creates a mark.
	pub const fn new(name: char, position: BytePosition) -> Self {
		Self { name, position }
	}

	/// Returns `true` for buffer-local letter marks (`a`..=`z`).
	///
	/// Only these survive a workspace edit; uppercase, numbered and special
	/// marks are the host's business.
	pub fn is_local_letter(&self) -> bool {
		self.name.is_ascii_lowercase()
	}

	/// Returns a copy pulled back inside a buffer of `line_count` lines.
	///
	/// `line_len` yields the byte length of the line the mark lands on.
	pub fn clamped(self, line_count: usize, line_len: impl FnOnce(usize) -> usize) -> Self {
		let line = self.position.line.min(line_count.saturating_sub(1));
		let column = self.position.column.min(line_len(line));
		Self::new(self.name, BytePosition::new(line, column))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn local_letters() {
		assert!(Mark::new('a', BytePosition::default()).is_local_letter());
		assert!(Mark::new('z', BytePosition::default()).is_local_letter());
		assert!(!Mark::new('A', BytePosition::default()).is_local_letter());
		assert!(!Mark::new('0', BytePosition::default()).is_local_letter());
		assert!(!Mark::new('\'', BytePosition::default()).is_local_letter());
	}

	#[test]
	fn clamped_pulls_back_line_and_column() {
		let mark = Mark::new('a', BytePosition::new(7, 12));
		let clamped = mark.clamped(3, |line| {
			assert_eq!(line, 2);
			4
		});
		assert_eq!(clamped.position, BytePosition::new(2, 4));
	}

	#[test]
	fn clamped_keeps_valid_mark() {
		let mark = Mark::new('q', BytePosition::new(1, 2));
		assert_eq!(mark.clamped(5, |_| 10), mark);
	}
}
