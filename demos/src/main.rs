// SPDX-License-Identifier: Apache-2.0

//! Pretty-print a JSON document from a file or stdin, streaming it through
//! a fixed 1 KiB capture buffer. Values longer than the buffer are printed
//! chunk by chunk as they arrive.

use sipjson::{JsonReader, NodeType, Reader, DEFAULT_CAPTURE_SIZE};
use std::borrow::Cow;
use std::process::ExitCode;

/// Adapts anything implementing `std::io::Read` to the parser's [`Reader`].
struct IoReader<R: std::io::Read> {
    inner: R,
}

impl<R: std::io::Read> Reader for IoReader<R> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.read(buf)
    }
}

fn indent(width: usize) {
    print!("{:width$}", "");
}

fn text<'a>(bytes: &'a [u8]) -> Cow<'a, str> {
    String::from_utf8_lossy(bytes)
}

fn main() -> ExitCode {
    let input: Box<dyn std::io::Read> = match std::env::args().nth(1) {
        Some(path) => match std::fs::File::open(&path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("{path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(std::io::stdin()),
    };

    let mut capture = [0u8; DEFAULT_CAPTURE_SIZE];
    let mut reader = JsonReader::new(
        IoReader {
            inner: std::io::BufReader::new(input),
        },
        &mut capture,
    );
    // keep field names and string values exactly as they appear on the wire
    reader.set_raw_strings(true);

    let mut tabs = 0usize;
    let mut first_part = true;
    let mut skip_read = false;
    loop {
        if !skip_read && !reader.read() {
            break;
        }
        skip_read = false;
        match reader.node_type() {
            NodeType::Array => {
                indent(tabs);
                println!("[");
                tabs += 1;
            }
            NodeType::EndArray => {
                tabs = tabs.saturating_sub(1);
                indent(tabs);
                println!("]");
            }
            NodeType::Object => {
                indent(tabs);
                println!("{{");
                tabs += 1;
            }
            NodeType::EndObject => {
                tabs = tabs.saturating_sub(1);
                indent(tabs);
                println!("}}");
            }
            NodeType::Field => {
                indent(tabs);
                print!("{}: ", text(reader.value()));
                // stream the field's value inline, chunk by chunk; when the
                // loop stops the cursor already sits on the next event
                while reader.read() && reader.is_value() {
                    print!("{}", text(reader.value()));
                }
                println!();
                skip_read = true;
            }
            NodeType::Value => {
                indent(tabs);
                println!("{}", text(reader.value()));
            }
            NodeType::ValuePart => {
                if first_part {
                    indent(tabs);
                    first_part = false;
                }
                print!("{}", text(reader.value()));
            }
            NodeType::EndValuePart => {
                if first_part {
                    indent(tabs);
                }
                println!("{}", text(reader.value()));
                first_part = true;
            }
            _ => {}
        }
    }

    if let Some(err) = reader.error() {
        eprintln!("parse error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
