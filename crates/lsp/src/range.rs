//! Range normalization and application order for text edit batches.

use lsp_types::{Position, Range, TextEdit};

/// Returns `true` if `a` comes strictly before `b` in document order.
#[inline]
pub fn position_before(a: &Position, b: &Position) -> bool {
	a.line < b.line || (a.line == b.line && a.character < b.character)
}

/// Returns a copy of `range` with `start` and `end` swapped if reversed.
pub fn normalize_range(range: Range) -> Range {
	if position_before(&range.end, &range.start) {
		Range {
			start: range.end,
			end: range.start,
		}
	} else {
		range
	}
}

/// Returns a copy of `edit` whose range is normalized.
pub fn normalize_edit(edit: &TextEdit) -> TextEdit {
	TextEdit {
		range: normalize_range(edit.range),
		new_text: edit.new_text.clone(),
	}
}

/// Normalizes every edit and orders the batch for sequential application.
///
/// Edits are sorted descending by start position so that applying one never
/// shifts the coordinates of an edit still to come. Edits sharing a start
/// position are applied in reverse array order, which leaves same-position
/// insertions in array order in the final text.
pub fn order_for_application(edits: &[TextEdit]) -> Vec<TextEdit> {
	let mut indexed: Vec<(usize, TextEdit)> = edits.iter().map(normalize_edit).enumerate().collect();
	indexed.sort_by(|(ia, a), (ib, b)| {
		let a_key = (a.range.start.line, a.range.start.character);
		let b_key = (b.range.start.line, b.range.start.character);
		b_key.cmp(&a_key).then(ib.cmp(ia))
	});
	indexed.into_iter().map(|(_, edit)| edit).collect()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn pos(line: u32, character: u32) -> Position {
		Position { line, character }
	}

	fn edit(start: Position, end: Position, text: &str) -> TextEdit {
		TextEdit {
			range: Range { start, end },
			new_text: text.into(),
		}
	}

	#[test]
	fn before_compares_line_then_character() {
		assert!(position_before(&pos(0, 9), &pos(1, 0)));
		assert!(position_before(&pos(1, 2), &pos(1, 3)));
		assert!(!position_before(&pos(1, 3), &pos(1, 3)));
		assert!(!position_before(&pos(2, 0), &pos(1, 8)));
	}

	#[test]
	fn reversed_range_is_swapped() {
		let fixed = normalize_range(Range {
			start: pos(2, 5),
			end: pos(1, 0),
		});
		assert_eq!(fixed.start, pos(1, 0));
		assert_eq!(fixed.end, pos(2, 5));
	}

	#[test]
	fn normalize_edit_leaves_input_untouched() {
		let original = edit(pos(3, 0), pos(0, 0), "x");
		let fixed = normalize_edit(&original);
		assert_eq!(original.range.start, pos(3, 0));
		assert_eq!(fixed.range.start, pos(0, 0));
		assert_eq!(fixed.new_text, "x");
	}

	#[test]
	fn order_is_descending_by_start() {
		let edits = vec![
			edit(pos(0, 1), pos(0, 2), "a"),
			edit(pos(4, 0), pos(4, 0), "b"),
			edit(pos(2, 7), pos(1, 0), "c"),
		];
		let ordered: Vec<_> = order_for_application(&edits).into_iter().map(|e| e.new_text).collect();
		assert_eq!(ordered, vec!["b", "c", "a"]);
	}

	#[test]
	fn equal_starts_apply_in_reverse_array_order() {
		let edits = vec![edit(pos(1, 0), pos(1, 0), "first"), edit(pos(1, 0), pos(1, 0), "second")];
		let ordered: Vec<_> = order_for_application(&edits).into_iter().map(|e| e.new_text).collect();
		assert_eq!(ordered, vec!["second", "first"]);
	}

	proptest! {
		#[test]
		fn ordered_starts_never_increase(raw in prop::collection::vec((0u32..20, 0u32..20, 0u32..20, 0u32..20), 0..16)) {
			let edits: Vec<_> = raw.iter().map(|&(a, b, c, d)| edit(pos(a, b), pos(c, d), "")).collect();
			let ordered = order_for_application(&edits);
			prop_assert_eq!(ordered.len(), edits.len());
			for pair in ordered.windows(2) {
				prop_assert!(!position_before(&pair[0].range.start, &pair[1].range.start));
			}
			for e in &ordered {
				prop_assert!(!position_before(&e.range.end, &e.range.start));
			}
		}
	}
}
