// SPDX-License-Identifier: Apache-2.0

//! Error kinds, their triggers, and sticky error behavior.

use sipjson::{JsonReader, NodeType, ParseError, SliceReader};

/// Read until `read()` goes false, then report the latched error.
fn parse_to_error(json: &[u8], capacity: usize) -> Option<ParseError> {
    let mut buf = vec![0u8; capacity];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut buf);
    while reader.read() {}
    reader.error()
}

#[test]
fn test_unterminated_object_at_open_brace() {
    assert_eq!(parse_to_error(b"{", 64), Some(ParseError::UnterminatedObject));
    assert_eq!(parse_to_error(b"{  ", 64), Some(ParseError::UnterminatedObject));
}

#[test]
fn test_unterminated_object_after_field() {
    // a field whose value is missing at end of stream
    assert_eq!(
        parse_to_error(br#"{"a":"#, 64),
        Some(ParseError::UnterminatedObject)
    );
    assert_eq!(
        parse_to_error(br#"{"a": "#, 64),
        Some(ParseError::UnterminatedObject)
    );
    assert_eq!(
        parse_to_error(br#"{"a":1"#, 64),
        Some(ParseError::UnterminatedObject)
    );
}

#[test]
fn test_unterminated_array() {
    assert_eq!(parse_to_error(b"[", 64), Some(ParseError::UnterminatedArray));
    assert_eq!(parse_to_error(b"[ ", 64), Some(ParseError::UnterminatedArray));
}

#[test]
fn test_unterminated_element_after_comma() {
    assert_eq!(parse_to_error(b"[1,", 64), Some(ParseError::UnterminatedElement));
    assert_eq!(parse_to_error(b"[1, ", 64), Some(ParseError::UnterminatedElement));
}

#[test]
fn test_illegal_character_for_stray_close_brace() {
    assert_eq!(parse_to_error(b"}", 64), Some(ParseError::IllegalCharacter));
    assert_eq!(parse_to_error(b"[1]}", 64), Some(ParseError::IllegalCharacter));
    assert_eq!(parse_to_error(b"1}", 64), Some(ParseError::IllegalCharacter));
}

#[test]
fn test_illegal_literals() {
    assert_eq!(parse_to_error(b"tru", 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(b"falze", 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(b"nul", 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(b"-", 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(b"1.", 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(b"1e", 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(br#""abc"#, 64), Some(ParseError::IllegalLiteral));
    assert_eq!(parse_to_error(br#""\q""#, 64), Some(ParseError::IllegalLiteral));
}

#[test]
fn test_literal_newline_in_string() {
    assert_eq!(
        parse_to_error(b"\"a\nb\"", 64),
        Some(ParseError::IllegalLiteral)
    );
}

#[test]
fn test_field_too_long_in_just_opened_object() {
    // capacity 8 allows at most 4 captured bytes before the pause; a longer
    // field name cannot be delivered whole
    assert_eq!(
        parse_to_error(br#"{"abcdefghij": 1}"#, 8),
        Some(ParseError::FieldTooLong)
    );
    // the same name fits a bigger buffer
    assert_eq!(parse_to_error(br#"{"abcdefghij": 1}"#, 64), None);
}

#[test]
fn test_field_too_long_after_comma() {
    // the second field streams through the value path; the error lands on
    // the read after its final chunk, when the colon becomes visible
    assert_eq!(
        parse_to_error(br#"{"a":1,"abcdefghij":2}"#, 8),
        Some(ParseError::FieldTooLong)
    );
}

#[test]
fn test_chunked_string_value_is_not_field_too_long() {
    // a long string in value position chunks cleanly
    assert_eq!(parse_to_error(br#"{"a":"abcdefghijklmnop"}"#, 8), None);
    assert_eq!(parse_to_error(br#"["abcdefghijklmnop"]"#, 8), None);
}

#[test]
fn test_field_missing_value() {
    assert_eq!(
        parse_to_error(br#"{"a" 1}"#, 64),
        Some(ParseError::FieldMissingValue)
    );
    assert_eq!(
        parse_to_error(br#"{"a"}"#, 64),
        Some(ParseError::FieldMissingValue)
    );
}

#[test]
fn test_whitespace_around_colon_is_fine() {
    assert_eq!(parse_to_error(b"{\"a\" \t\n: 1}", 64), None);
}

#[test_log::test]
fn test_errors_are_sticky() {
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(b"}"), &mut buf);
    assert!(!reader.read());
    assert_eq!(reader.error(), Some(ParseError::IllegalCharacter));
    assert_eq!(reader.node_type(), NodeType::Error);
    for _ in 0..3 {
        assert!(!reader.read());
        assert_eq!(reader.node_type(), NodeType::Error);
        assert_eq!(reader.error(), Some(ParseError::IllegalCharacter));
    }
}

#[test]
fn test_error_midway_through_a_document() {
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(br#"{"a": truu}"#), &mut buf);
    assert!(reader.read()); // {
    assert!(reader.read()); // "a"
    assert!(!reader.read());
    assert_eq!(reader.error(), Some(ParseError::IllegalLiteral));
    assert!(!reader.read());
}

#[test]
fn test_carriage_return_is_not_whitespace() {
    // a CR where a value is expected stalls the cursor without an error
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(b"[1,\r2]"), &mut buf);
    assert!(reader.read()); // [
    assert!(reader.read()); // 1
    assert!(!reader.read());
    assert_eq!(reader.error(), None);
    // but a CR inside a string is just a byte
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(b"\"a\rb\""), &mut buf);
    assert!(reader.read());
    assert_eq!(reader.value(), b"a\rb");
}

#[test]
fn test_reader_error_is_surfaced() {
    struct FailAfter {
        data: &'static [u8],
        pos: usize,
    }
    impl sipjson::Reader for FailAfter {
        type Error = &'static str;
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.pos >= self.data.len() {
                return Err("boom");
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }
    let mut buf = [0u8; 64];
    let reader = FailAfter {
        data: br#"{"a": "#,
        pos: 0,
    };
    let mut r = JsonReader::new(reader, &mut buf);
    while r.read() {}
    assert_eq!(r.error(), Some(ParseError::Reader));
    assert_eq!(r.node_type(), NodeType::Error);
}

#[test]
fn test_clean_documents_raise_nothing() {
    for json in [
        &br#"{"a":1,"b":[true,null,"x"],"c":{"d":-2.5e3}}"#[..],
        br#"[]"#,
        br#"{}"#,
        br#""just a string""#,
        br#"[[],{},[{}],""]"#,
    ] {
        assert_eq!(parse_to_error(json, 64), None, "input: {json:?}");
    }
}
