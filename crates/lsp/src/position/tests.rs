use super::*;

#[test]
fn test_utf32_ascii_is_identity() {
	let pos = Position { line: 1, character: 3 };
	let decoded = decode_position(Some("world"), pos, OffsetEncoding::Utf32);
	assert_eq!(decoded, BytePosition::new(1, 3));
}

#[test]
fn test_utf16_with_emoji() {
	// U+1F600 is one codepoint, two UTF-16 code units, four bytes.
	let line = "a\u{1F600}b";

	// Before the emoji.
	assert_eq!(decode_column(line, 1, OffsetEncoding::Utf16), 1);
	// After the emoji: UTF-16 column 3, byte column 5.
	assert_eq!(decode_column(line, 3, OffsetEncoding::Utf16), 5);
	// Same position in codepoints.
	assert_eq!(decode_column(line, 2, OffsetEncoding::Utf32), 5);
}

#[test]
fn test_utf16_inside_surrogate_pair_snaps_to_char_start() {
	let line = "a\u{1F600}b";
	assert_eq!(decode_column(line, 2, OffsetEncoding::Utf16), 1);
}

#[test]
fn test_utf8_with_multibyte() {
	// U+00E9 is two bytes in UTF-8.
	let line = "caf\u{00E9}!";
	assert_eq!(decode_column(line, 3, OffsetEncoding::Utf8), 3);
	assert_eq!(decode_column(line, 5, OffsetEncoding::Utf8), 5);
	// Byte 4 is in the middle of U+00E9.
	assert_eq!(decode_column(line, 4, OffsetEncoding::Utf8), 3);
	assert_eq!(decode_column(line, 4, OffsetEncoding::Utf16), 5);
}

#[test]
fn test_clamp_column() {
	for encoding in [OffsetEncoding::Utf8, OffsetEncoding::Utf16, OffsetEncoding::Utf32] {
		assert_eq!(decode_column("hi", 100, encoding), 2, "{encoding}");
	}
}

#[test]
fn test_missing_line_passes_through() {
	let pos = Position { line: 9, character: 42 };
	assert_eq!(decode_position(None, pos, OffsetEncoding::Utf16), BytePosition::new(9, 42));
}

#[test]
fn test_cjk_line() {
	// Each CJK character is 3 bytes, 1 UTF-16 unit.
	let line = "\u{65E5}\u{672C}\u{8A9E}x";
	assert_eq!(decode_column(line, 2, OffsetEncoding::Utf16), 6);
	assert_eq!(decode_column(line, 3, OffsetEncoding::Utf32), 9);
}
