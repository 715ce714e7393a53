// SPDX-License-Identifier: Apache-2.0

//! Parse with an 8-byte capture buffer to watch values arrive in chunks.

use sipjson::{JsonReader, NodeType, SliceReader};

fn main() {
    let json = br#"{"q":"I am in fact a rather long string value"}"#;
    let mut capture = [0u8; 8];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut capture);

    while reader.read() {
        let text = reader.value_str().unwrap_or("?");
        match reader.node_type() {
            NodeType::Field => println!("field {text:?}"),
            NodeType::Value => println!("value {text:?}"),
            NodeType::ValuePart => println!("part  {text:?}"),
            NodeType::EndValuePart => println!("last  {text:?}"),
            other => println!("{other:?}"),
        }
    }
    if let Some(err) = reader.error() {
        eprintln!("parse error: {err}");
    }
}
