// SPDX-License-Identifier: Apache-2.0

//! Pull a single field's value out of a document without building a tree.

use sipjson::{JsonReader, NodeType, SliceReader};

fn main() {
    let json = br#"{"device":{"id":"sensor-7","fw":"2.4.1"},"readings":[22.5,22.7,23.1]}"#;
    let mut capture = [0u8; 64];
    let mut reader = JsonReader::new(SliceReader::new(json), &mut capture);

    while reader.read() {
        if reader.node_type() == NodeType::Field && reader.value() == b"fw" {
            reader.read();
            // a longer value would arrive in parts; print them as they come
            print!("firmware: ");
            loop {
                print!("{}", reader.value_str().unwrap_or("?"));
                if reader.node_type() != NodeType::ValuePart || !reader.read() {
                    break;
                }
            }
            println!();
            return;
        }
    }
    eprintln!("field not found (error: {:?})", reader.error());
}
