use crate::mdl::{FRME, MESH, MdlError, Navigator, TagRead};

#[test]
fn skip_whitespace_stops_at_first_token() {
	for input in [b"    a", b"\0\0\0\0a", b"\r\n\r\na", b"\t \r\0a"] {
		let mut nav = Navigator::new(input);
		nav.skip_whitespace();
		assert_eq!(nav.pos(), 4, "input {input:?}");
	}
}

#[test]
fn skip_whitespace_is_idempotent() {
	let mut nav = Navigator::new(b" \r\n x ");
	nav.skip_whitespace();
	let first = nav.pos();
	nav.skip_whitespace();
	assert_eq!(nav.pos(), first);

	let mut at_end = Navigator::new(b"   ");
	at_end.skip_whitespace();
	at_end.skip_whitespace();
	assert!(at_end.has_more(0));
}

#[test]
fn peek_line_never_moves_cursor() {
	let nav = Navigator::new(b"<expectedData>\r\nnext");
	assert_eq!(nav.peek_line(), b"<expectedData>");
	assert_eq!(nav.pos(), 0);

	let nav = Navigator::new(b"<expectedData>");
	assert_eq!(nav.peek_line(), b"<expectedData>");
	assert_eq!(nav.pos(), 0);

	let nav = Navigator::new(b"");
	assert!(nav.peek_line().is_empty());
}

#[test]
fn peek_line_ignores_lone_line_feed() {
	let nav = Navigator::new(b"a\nb\r\nc");
	assert_eq!(nav.peek_line(), b"a\nb");
}

#[test]
fn read_tag_in_advances_only_on_match() {
	let mut nav = Navigator::new(b"FRME");
	assert_eq!(nav.read_tag_in(&[FRME]), TagRead::Matched(FRME));
	assert_eq!(nav.pos(), 4);

	let mut nav = Navigator::new(b"}FRME");
	assert_eq!(nav.read_tag_in(&[FRME, MESH]), TagRead::NoMatch);
	assert_eq!(nav.pos(), 0);
}

#[test]
fn read_tag_in_reports_end_of_data() {
	let mut nav = Navigator::new(b"FRM");
	assert_eq!(nav.read_tag_in(&[FRME]), TagRead::EndOfData);
	assert_eq!(nav.pos(), 0);
}

#[test]
fn unchecked_read_tag_consumes_four_bytes() {
	let mut nav = Navigator::new(b"XYZWrest");
	assert_eq!(nav.read_tag(), Some(*b"XYZW"));
	assert_eq!(nav.pos(), 4);

	let mut short = Navigator::new(b"ab");
	assert_eq!(short.read_tag(), None);
	assert_eq!(short.pos(), 0);
}

#[test]
fn is_at_tag_matches_prefix_only() {
	let nav = Navigator::new(b"MYTAG{");
	assert!(nav.is_at_tag(b"MYTAG{"));
	assert!(!Navigator::new(b"{\ra\ndomDa\ta}\0").is_at_tag(b"MYTAG{"));
	assert!(!Navigator::new(b"").is_at_tag(b"MYTAG{"));
	assert!(!Navigator::new(b"FRME").is_at_tag(b""));
}

#[test]
fn read_text_consumes_terminator() {
	let mut nav = Navigator::new(b" ExampleText\0tail");
	assert_eq!(nav.read_text(), " ExampleText");
	assert_eq!(nav.pos(), 13);

	let mut unterminated = Navigator::new(b"abc");
	assert_eq!(unterminated.read_text(), "abc");
	assert!(unterminated.has_more(0));

	let mut empty = Navigator::new(b"");
	assert_eq!(empty.read_text(), "");

	let mut at_nul = Navigator::new(b"\0x");
	assert_eq!(at_nul.read_text(), "");
	assert_eq!(at_nul.pos(), 1);
}

#[test]
fn seek_block_start_lands_after_brace_or_at_end() {
	let mut nav = Navigator::new(b"BINVRSN{\r\n    1\r\n}\r\nFRMERootNode");
	nav.seek_block_start();
	assert_eq!(nav.pos(), 8);

	let input = b"BINVRSN\r\n    1\r\n}\r\nFRMERootNode";
	let mut nav = Navigator::new(input);
	nav.seek_block_start();
	assert_eq!(nav.pos(), input.len());

	let mut empty = Navigator::new(b"");
	empty.seek_block_start();
	assert_eq!(empty.pos(), 0);
}

#[test]
fn seek_block_end_lands_after_brace() {
	let mut nav = Navigator::new(b"a{b}c}");
	nav.seek_block_end();
	assert_eq!(nav.pos(), 4);
	nav.seek_block_end();
	assert_eq!(nav.pos(), 6);
	nav.seek_block_end();
	assert_eq!(nav.pos(), 6);
}

#[test]
fn skip_block_steps_over_nested_blocks() {
	let mut nav = Navigator::new(b"FRMEa\0{TRNS{}FRMEb\0{}}FRME");
	nav.skip_block();
	assert!(nav.is_at_tag(&FRME));
	assert_eq!(nav.pos(), 22);

	let mut open = Navigator::new(b"x{{}");
	open.skip_block();
	assert_eq!(open.pos(), 4);
}

#[test]
fn has_more_counts_unread_bytes() {
	let mut nav = Navigator::new(b"abcd");
	assert!(nav.has_more(4));
	assert!(!nav.has_more(5));
	assert!(!nav.has_more(0));
	nav.skip_bytes(10);
	assert_eq!(nav.pos(), 4);
	assert!(nav.has_more(0));
	assert!(!nav.has_more(1));
}

#[test]
fn version_check_records_data_start() {
	let mut nav = Navigator::new(b"BINVRSN{\r\n    1\r\n}\r\nFRMERootNode");
	assert!(nav.is_bin_vers_equal(1));
	assert_eq!(nav.data_start(), 20);
	assert_eq!(nav.pos(), 20);
	assert!(nav.is_at_tag(b"FRME"));

	nav.read_text();
	nav.move_data_start();
	assert_eq!(nav.pos(), 20);
}

#[test]
fn version_check_rejects_mismatch_and_garbage() {
	assert!(Navigator::new(b"BINVRSN{\t 99 \t\r\n    }\r\n").is_bin_vers_equal(99));
	assert!(!Navigator::new(b"BINVRSN{\r\n    2\r\n}\r\n").is_bin_vers_equal(1));
	assert!(!Navigator::new(b"").is_bin_vers_equal(1));

	let mut garbage = Navigator::new(b"FRMERootNode\0{}");
	garbage.skip_bytes(3);
	assert!(!garbage.is_bin_vers_equal(1));
	assert_eq!(garbage.pos(), 3);
}

#[test]
fn version_check_leaves_no_content_at_end() {
	let mut nav = Navigator::new(b"BINVRSN{\r\n    1\r\n}\r\n");
	assert!(nav.is_bin_vers_equal(1));
	assert!(nav.has_more(0));

	let mut with_content = Navigator::new(b"BINVRSN{\r\n    1\r\n}\r\nFRMERootNode");
	assert!(with_content.is_bin_vers_equal(1));
	assert!(with_content.has_more(1));
}

#[test]
fn counted_sequence_reads_each_record() {
	let mut bytes = 3_u32.to_le_bytes().to_vec();
	for value in [10_u16, 20, 30] {
		bytes.extend_from_slice(&value.to_le_bytes());
	}

	let mut nav = Navigator::new(&bytes);
	let mut seen = Vec::new();
	let count = nav
		.read_counted(|nav| {
			seen.push(nav.read_u16()?);
			Ok(())
		})
		.expect("sequence reads");
	assert_eq!(count, 3);
	assert_eq!(seen, [10, 20, 30]);
	assert!(nav.has_more(0));
}

#[test]
fn counted_sequence_with_zero_count_reads_nothing() {
	let mut bytes = 0_u32.to_le_bytes().to_vec();
	bytes.extend_from_slice(b"}");

	let mut nav = Navigator::new(&bytes);
	let mut calls = 0;
	let count = nav
		.read_counted(|_| {
			calls += 1;
			Ok(())
		})
		.expect("empty sequence reads");
	assert_eq!(count, 0);
	assert_eq!(calls, 0);
	assert_eq!(nav.pos(), 4);
}

#[test]
fn counted_sequence_fails_on_truncated_record() {
	let mut bytes = 2_u32.to_le_bytes().to_vec();
	bytes.extend_from_slice(&1.5_f32.to_le_bytes());
	bytes.extend_from_slice(&[0, 0]);

	let mut nav = Navigator::new(&bytes);
	let err = nav
		.read_counted(|nav| {
			nav.read_f32()?;
			Ok(())
		})
		.expect_err("second record is truncated");
	assert!(matches!(err, MdlError::UnexpectedEof { at: 8, need: 4, rem: 2 }));
	assert_eq!(nav.pos(), 8);
}

#[test]
fn float_prefix_read_stops_at_end() {
	let mut bytes = Vec::new();
	for value in [1.0_f32, 2.0, 3.0] {
		bytes.extend_from_slice(&value.to_le_bytes());
	}
	bytes.push(0xff);

	let mut nav = Navigator::new(&bytes);
	let (values, count) = nav.read_f32_upto::<16>();
	assert_eq!(count, 3);
	assert_eq!(&values[..3], &[1.0, 2.0, 3.0]);
	assert_eq!(nav.remaining(), 1);
}
