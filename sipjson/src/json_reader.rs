// SPDX-License-Identifier: Apache-2.0

//! The pull parser: a cursor that advances one JSON event per `read()`.
//!
//! The reader owns no tree and no stack. Its whole working state is the
//! caller's capture slice plus a handful of words: the current node, an
//! object depth counter, and the active lexer machine. A scalar whose text
//! outgrows the capture slice is delivered as `ValuePart` chunks, and the
//! lexer machines carry enough state across chunks to finalize the typed
//! value at `EndValuePart`.

use crate::lex_source::LexSource;
use crate::lexer::{BoolLexer, LexStep, LexUnit, NullLexer, NumberLexer, StringLexer};
use crate::node::{NodeType, ValueType};
use crate::parse_error::ParseError;
use crate::Reader;

/// A streaming JSON pull parser over a byte [`Reader`].
///
/// ```
/// use sipjson::{JsonReader, NodeType, SliceReader, ValueType};
///
/// let json = br#"[1, true, "hi"]"#;
/// let mut capture = [0u8; 32];
/// let mut reader = JsonReader::new(SliceReader::new(json), &mut capture);
///
/// assert!(reader.read());
/// assert_eq!(reader.node_type(), NodeType::Array);
/// assert!(reader.read());
/// assert_eq!(reader.value_type(), ValueType::Integer);
/// assert_eq!(reader.value_int(), 1);
/// assert!(reader.read());
/// assert!(reader.value_bool());
/// assert!(reader.read());
/// assert_eq!(reader.value(), b"hi");
/// assert!(reader.read());
/// assert_eq!(reader.node_type(), NodeType::EndArray);
/// assert!(!reader.read());
/// assert_eq!(reader.node_type(), NodeType::EndDocument);
/// assert!(reader.error().is_none());
/// ```
pub struct JsonReader<'buf, R: Reader> {
    source: LexSource<'buf, R>,
    node: NodeType,
    depth: u32,
    error: Option<ParseError>,
    lex: Option<LexUnit>,
    value_type: ValueType,
    raw_strings: bool,
}

impl<'buf, R: Reader> JsonReader<'buf, R> {
    /// Create a reader over `reader`, accumulating lexeme text into
    /// `capture`. The capture slice bounds all working memory; scalars
    /// longer than it are chunked. It must be at least 8 bytes.
    pub fn new(reader: R, capture: &'buf mut [u8]) -> Self {
        Self {
            source: LexSource::new(reader, capture),
            node: NodeType::Initial,
            depth: 0,
            error: None,
            lex: None,
            value_type: ValueType::None,
            raw_strings: false,
        }
    }

    /// Advance to the next event. Returns `false` at end of document or on
    /// error; once an error is latched, every further call returns `false`.
    pub fn read(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        match self.read_step() {
            Ok(produced) => produced,
            Err(kind) => {
                // a reader failure looks like end-of-stream to the state
                // machine; report it as what it is
                let kind = if self.source.failed() {
                    ParseError::Reader
                } else {
                    kind
                };
                log::debug!("latching parse error: {kind:?}");
                self.error = Some(kind);
                false
            }
        }
    }

    /// The event under the cursor, or [`NodeType::Error`] once an error is
    /// latched.
    pub fn node_type(&self) -> NodeType {
        if self.error.is_some() {
            NodeType::Error
        } else {
            self.node
        }
    }

    /// The finalized scalar type. Only [`NodeType::Value`] and
    /// [`NodeType::EndValuePart`] carry one; chunks in flight report
    /// [`ValueType::None`] because their accumulators are not final yet.
    pub fn value_type(&self) -> ValueType {
        match self.node_type() {
            NodeType::Value | NodeType::EndValuePart => self.value_type,
            _ => ValueType::None,
        }
    }

    /// The captured text of the current lexeme: the field name after
    /// [`NodeType::Field`], the scalar text on value events. Valid until
    /// the next `read()`.
    pub fn value(&self) -> &[u8] {
        self.source.captured()
    }

    /// The captured text as UTF-8.
    pub fn value_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.value())
    }

    /// The current value coerced to an integer. Reals truncate, booleans
    /// read 0/1, everything else reads 0.
    pub fn value_int(&self) -> i64 {
        match (self.value_type(), self.lex.as_ref()) {
            (ValueType::Integer | ValueType::Real, Some(LexUnit::Number(num))) => num.int_value(),
            (ValueType::Boolean, Some(LexUnit::Bool(b))) => i64::from(b.value()),
            _ => 0,
        }
    }

    /// The current value coerced to a real. Booleans read 0.0/1.0,
    /// everything non-numeric reads 0.0.
    pub fn value_real(&self) -> f64 {
        match (self.value_type(), self.lex.as_ref()) {
            (ValueType::Integer | ValueType::Real, Some(LexUnit::Number(num))) => num.real_value(),
            (ValueType::Boolean, Some(LexUnit::Bool(b))) => {
                if b.value() {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// The current value coerced to a boolean. Numbers read `!= 0`,
    /// everything else reads `false`.
    pub fn value_bool(&self) -> bool {
        match (self.value_type(), self.lex.as_ref()) {
            (ValueType::Boolean, Some(LexUnit::Bool(b))) => b.value(),
            (ValueType::Integer | ValueType::Real, Some(LexUnit::Number(num))) => {
                num.int_value() != 0
            }
            _ => false,
        }
    }

    /// Whether the cursor is on any value event, complete or partial.
    pub fn is_value(&self) -> bool {
        self.error.is_none()
            && matches!(
                self.node,
                NodeType::Value | NodeType::ValuePart | NodeType::EndValuePart
            )
    }

    /// The number of currently open objects. Arrays are not counted.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The latched error, if any.
    pub fn error(&self) -> Option<ParseError> {
        self.error
    }

    pub fn raw_strings(&self) -> bool {
        self.raw_strings
    }

    /// When set, strings are captured verbatim: quotes, backslashes and
    /// escape sequences included. Takes effect on subsequently-lexed
    /// strings.
    pub fn set_raw_strings(&mut self, raw: bool) {
        self.raw_strings = raw;
    }

    fn read_step(&mut self) -> Result<bool, ParseError> {
        if self.source.failed() {
            return Err(ParseError::Reader);
        }
        let have_input = self.source.ensure_started();
        // A paused lexeme resumes ahead of the end-of-stream check: the
        // machines treat end of stream as a terminator, and the final chunk
        // must still be delivered.
        if self.node == NodeType::ValuePart {
            return self.resume_value_part();
        }
        if !have_input {
            if self.source.failed() {
                return Err(ParseError::Reader);
            }
            if self.depth > 0 {
                return Err(ParseError::UnterminatedObject);
            }
            self.node = NodeType::EndDocument;
            return Ok(false);
        }
        match self.node {
            NodeType::Error | NodeType::EndDocument => Ok(false),
            NodeType::Initial => {
                self.depth = 0;
                self.skip_whitespace();
                self.read_any_open()
            }
            NodeType::ValuePart => self.resume_value_part(),
            NodeType::Value | NodeType::EndValuePart | NodeType::EndArray | NodeType::EndObject => {
                self.read_any()
            }
            NodeType::Array => self.read_value_or_end_array(),
            NodeType::Object => self.read_field_or_end_object(),
            NodeType::Field => self.read_any_open(),
        }
    }

    /// Expect any value start under the cursor.
    fn read_any_open(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.source.current() {
            Some(b'[') => {
                if !self.source.advance() {
                    return Err(ParseError::UnterminatedArray);
                }
                self.skip_whitespace();
                if !self.source.more() {
                    return Err(ParseError::UnterminatedArray);
                }
                self.node = NodeType::Array;
                Ok(true)
            }
            Some(b'{') => {
                if !self.source.advance() {
                    return Err(ParseError::UnterminatedObject);
                }
                self.skip_whitespace();
                if !self.source.more() {
                    return Err(ParseError::UnterminatedObject);
                }
                self.node = NodeType::Object;
                self.depth = self.depth.saturating_add(1);
                Ok(true)
            }
            Some(b'-' | b'0'..=b'9') => self.begin_scalar(LexUnit::Number(NumberLexer::new())),
            Some(b't' | b'f') => self.begin_scalar(LexUnit::Bool(BoolLexer::new())),
            Some(b'n') => self.begin_scalar(LexUnit::Null(NullLexer::new())),
            Some(b'"') => self.begin_string(),
            Some(b'}') => Err(ParseError::IllegalCharacter),
            None if self.depth > 0 => Err(ParseError::UnterminatedObject),
            _ => Ok(false),
        }
    }

    /// After a complete value or a container close: either close the
    /// enclosing container, or consume an optional comma and read the next
    /// value.
    fn read_any(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        // a string that needed chunking can never serve as a field name
        if self.node == NodeType::EndValuePart
            && self.value_type == ValueType::None
            && self.source.current() == Some(b':')
        {
            return Err(ParseError::FieldTooLong);
        }
        match self.source.current() {
            Some(b']') => {
                self.source.advance();
                self.node = NodeType::EndArray;
                return Ok(true);
            }
            Some(b'}') => {
                self.source.advance();
                if self.depth == 0 {
                    return Err(ParseError::IllegalCharacter);
                }
                self.depth -= 1;
                self.node = NodeType::EndObject;
                return Ok(true);
            }
            _ => {}
        }
        self.skip_if_comma()?;
        self.read_any_open()
    }

    /// Just after `[`: either an immediate `]`, or any value.
    fn read_value_or_end_array(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.source.current() {
            Some(b']') => {
                self.source.advance();
                self.skip_whitespace();
                self.node = NodeType::EndArray;
                Ok(true)
            }
            _ => self.read_any_open(),
        }
    }

    /// Just after `{`: either an immediate `}`, or a quoted field name
    /// followed by `:`.
    fn read_field_or_end_object(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.source.current() {
            Some(b'}') => {
                self.depth = self.depth.saturating_sub(1);
                self.source.advance();
                self.skip_whitespace();
                self.node = NodeType::EndObject;
                Ok(true)
            }
            Some(b'"') => {
                self.source.clear_capture();
                self.lex = Some(LexUnit::Str(StringLexer::new(self.raw_strings)));
                let more = self.run_lexer()?;
                if more {
                    return Err(ParseError::FieldTooLong);
                }
                self.skip_whitespace();
                if self.source.current() != Some(b':') {
                    return Err(ParseError::FieldMissingValue);
                }
                self.source.advance();
                self.node = NodeType::Field;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn begin_scalar(&mut self, unit: LexUnit) -> Result<bool, ParseError> {
        self.source.clear_capture();
        self.lex = Some(unit);
        let more = self.run_lexer()?;
        if more {
            log::debug!(
                "lexeme paused after {} captured bytes",
                self.source.capture_size()
            );
        }
        self.node = if more {
            NodeType::ValuePart
        } else {
            NodeType::Value
        };
        Ok(true)
    }

    fn begin_string(&mut self) -> Result<bool, ParseError> {
        self.source.clear_capture();
        self.lex = Some(LexUnit::Str(StringLexer::new(self.raw_strings)));
        let more = self.run_lexer()?;
        if more {
            // Whether this string is a field name cannot be known until the
            // rest of it streams through; an oversized field name is
            // reported on the read after its final chunk.
            self.node = NodeType::ValuePart;
            return Ok(true);
        }
        self.skip_whitespace();
        if self.source.current() == Some(b':') {
            self.source.advance();
            self.node = NodeType::Field;
        } else {
            self.node = NodeType::Value;
        }
        Ok(true)
    }

    fn resume_value_part(&mut self) -> Result<bool, ParseError> {
        self.source.clear_capture();
        let more = self.run_lexer()?;
        self.node = if more {
            NodeType::ValuePart
        } else {
            NodeType::EndValuePart
        };
        Ok(true)
    }

    /// Drive the active machine until the lexeme completes or the chunk
    /// guard trips. Returns whether more input is still needed.
    fn run_lexer(&mut self) -> Result<bool, ParseError> {
        loop {
            if !self.source.capture_fits() {
                return Ok(true);
            }
            let step = match self.lex.as_mut() {
                Some(unit) => unit.step(&mut self.source)?,
                None => return Err(ParseError::IllegalLiteral),
            };
            match step {
                LexStep::More => {}
                LexStep::Done(value_type) => {
                    self.value_type = value_type;
                    return Ok(false);
                }
            }
        }
    }

    fn skip_whitespace(&mut self) {
        // carriage return is not part of the whitespace set
        while matches!(self.source.current(), Some(b' ' | b'\t' | b'\n')) {
            if !self.source.advance() {
                break;
            }
        }
    }

    fn skip_if_comma(&mut self) -> Result<(), ParseError> {
        if self.source.current() == Some(b',') {
            self.source.advance();
            self.skip_whitespace();
            if self.source.eof() {
                return Err(ParseError::UnterminatedElement);
            }
        }
        Ok(())
    }
}
