// SPDX-License-Identifier: Apache-2.0

//! Escape decoding and raw-strings mode.

use sipjson::{JsonReader, NodeType, SliceReader, ValueType};

fn read_value(json: &[u8], raw: bool) -> Vec<u8> {
    let mut buf = [0u8; 256];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut buf);
    reader.set_raw_strings(raw);
    assert!(reader.read(), "expected a value event");
    assert_eq!(reader.node_type(), NodeType::Value);
    assert_eq!(reader.value_type(), ValueType::None);
    reader.value().to_vec()
}

#[test]
fn test_escape_decoding() {
    let json = br#""a\nb\t\u0041""#;
    assert_eq!(read_value(json, false), b"a\nb\tA");
}

#[test]
fn test_raw_strings_keep_the_literal_bytes() {
    let json = br#""a\nb\t\u0041""#;
    assert_eq!(read_value(json, true), json.to_vec());
}

#[test]
fn test_all_simple_escapes() {
    let json = br#""\"\\\/\b\f\n\r\t""#;
    assert_eq!(
        read_value(json, false),
        &[b'"', b'\\', b'/', 0x08, 0x0C, b'\n', b'\r', b'\t']
    );
}

#[test]
fn test_unicode_escapes_decode_to_utf8() {
    assert_eq!(read_value(br#""\u00e9""#, false), "é".as_bytes());
    assert_eq!(read_value(br#""\u20AC""#, false), "€".as_bytes());
    // hex digits in either case
    assert_eq!(read_value(br#""\u20ac""#, false), "€".as_bytes());
}

#[test]
fn test_surrogate_pairs_decode_to_supplementary_code_points() {
    assert_eq!(read_value(br#""\uD834\uDD1E""#, false), "𝄞".as_bytes());
    assert_eq!(
        read_value(br#""g \uD83D\uDE00 clef""#, false),
        "g 😀 clef".as_bytes()
    );
}

#[test]
fn test_raw_mode_leaves_surrogate_pairs_on_the_wire() {
    let json = br#""\uD834\uDD1E""#;
    assert_eq!(read_value(json, true), json.to_vec());
}

#[test]
fn test_lone_surrogate_is_a_parse_error() {
    let mut buf = [0u8; 256];
    let mut reader = JsonReader::new(SliceReader::new(br#""\uD834 oops""#), &mut buf);
    assert!(!reader.read());
    assert_eq!(reader.error(), Some(sipjson::ParseError::IllegalLiteral));
}

#[test]
fn test_raw_strings_affect_field_names_too() {
    let json = br#"{"a\tb": 1}"#;
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut buf);
    reader.set_raw_strings(true);
    assert!(reader.read());
    assert!(reader.read());
    assert_eq!(reader.node_type(), NodeType::Field);
    assert_eq!(reader.value(), br#""a\tb""#);

    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut buf);
    assert!(reader.read());
    assert!(reader.read());
    assert_eq!(reader.value(), b"a\tb");
}

#[test]
fn test_toggle_applies_to_subsequent_strings() {
    let json = br#"["a\tb","a\tb"]"#;
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut buf);
    assert!(reader.read()); // [
    assert!(reader.read());
    assert_eq!(reader.value(), b"a\tb");
    reader.set_raw_strings(true);
    assert!(reader.read());
    assert_eq!(reader.value(), br#""a\tb""#);
}

#[test]
fn test_value_str_view() {
    let mut buf = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(br#""caf\u00e9""#), &mut buf);
    assert!(reader.read());
    assert_eq!(reader.value_str(), Ok("café"));
}
