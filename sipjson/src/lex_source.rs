// SPDX-License-Identifier: Apache-2.0

//! The byte source adapter: a one-byte lookahead cursor over a pull stream
//! plus the bounded capture buffer the lexers accumulate into.

/// Trait for input sources that feed bytes to the reader.
pub trait Reader {
    /// The error type returned by read operations.
    type Error;

    /// Read data into the provided buffer.
    /// Returns the number of bytes read, or an error.
    ///
    /// # Contract
    /// - A return value of 0 **MUST** indicate true end of stream
    /// - Implementations **MUST NOT** return 0 unless no more data will ever
    ///   be available
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Smallest usable capture buffer. The chunk guard needs 3 bytes of
/// headroom, and the smallest complete lexeme (`false`) needs 5.
pub(crate) const MIN_CAPTURE_SIZE: usize = 8;

/// One-byte lookahead cursor with a fixed-size capture buffer.
///
/// `current()` is the byte under the cursor; `advance()` pulls the next one
/// from the reader. Lexers append lexeme bytes with `capture()` and the
/// parser hands the accumulated slice out through `captured()`.
pub(crate) struct LexSource<'buf, R: Reader> {
    reader: R,
    buf: &'buf mut [u8],
    len: usize,
    current: Option<u8>,
    started: bool,
    failed: bool,
}

impl<'buf, R: Reader> LexSource<'buf, R> {
    pub fn new(reader: R, buf: &'buf mut [u8]) -> Self {
        assert!(
            buf.len() >= MIN_CAPTURE_SIZE,
            "capture buffer must be at least {MIN_CAPTURE_SIZE} bytes"
        );
        Self {
            reader,
            buf,
            len: 0,
            current: None,
            started: false,
            failed: false,
        }
    }

    /// The byte under the cursor, or `None` at end of stream.
    pub fn current(&self) -> Option<u8> {
        self.current
    }

    /// Move the cursor one byte forward. Returns `false` once that moves
    /// past the end of the stream, or if the reader fails.
    pub fn advance(&mut self) -> bool {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(0) => {
                self.current = None;
                false
            }
            Ok(_) => {
                self.current = Some(byte[0]);
                true
            }
            Err(_) => {
                self.current = None;
                self.failed = true;
                false
            }
        }
    }

    pub fn more(&self) -> bool {
        self.current.is_some()
    }

    pub fn eof(&self) -> bool {
        self.current.is_none()
    }

    /// Prime the cursor with the first byte of the stream. Idempotent.
    /// Returns whether a byte is available under the cursor.
    pub fn ensure_started(&mut self) -> bool {
        if !self.started {
            self.started = true;
            self.advance();
        }
        self.more()
    }

    /// Whether the reader has reported an error (as opposed to end of
    /// stream).
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Append a byte to the capture buffer. Silent no-op when the buffer is
    /// full; the parser's chunk guard keeps headroom before every lex step.
    pub fn capture(&mut self, byte: u8) {
        if let Some(slot) = self.buf.get_mut(self.len) {
            *slot = byte;
            self.len += 1;
        }
    }

    pub fn clear_capture(&mut self) {
        self.len = 0;
    }

    pub fn capture_size(&self) -> usize {
        self.len
    }

    pub fn capture_capacity(&self) -> usize {
        self.buf.len()
    }

    /// The bytes captured since the last `clear_capture()`.
    pub fn captured(&self) -> &[u8] {
        self.buf.get(..self.len).unwrap_or(&[])
    }

    /// The chunk guard: whether another lex step may run. The 3-byte margin
    /// lets a single step append a multi-byte escape expansion without
    /// re-checking, and the strict `<` leaves four writable bytes for the
    /// widest one.
    pub fn capture_fits(&self) -> bool {
        self.len < self.capture_capacity().saturating_sub(3)
    }
}
