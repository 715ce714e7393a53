// SPDX-License-Identifier: Apache-2.0

//! The string machine.
//!
//! In decoded mode (the default) the surrounding quotes are stripped,
//! simple escapes collapse to their byte, and `\uXXXX` escapes are captured
//! as UTF-8 — a surrogate pair spanning two consecutive escapes becomes one
//! 4-byte sequence. In raw mode everything between and including the quotes
//! is captured verbatim.

use super::LexStep;
use crate::escape;
use crate::lex_source::LexSource;
use crate::node::ValueType;
use crate::parse_error::ParseError;
use crate::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrState {
    /// Expecting the opening quote.
    Open,
    Body,
    /// Closing quote consumed; the next step finalizes.
    Complete,
    /// A backslash was consumed.
    Escape,
    /// Collecting the four hex digits of `\uXXXX`.
    Hex { accum: u32, digits: u8 },
    /// A high surrogate was decoded; the low half's `\` is mandatory.
    PairBackslash { high: u32 },
    /// The low half's `u` is mandatory.
    PairU { high: u32 },
    /// Collecting the low surrogate's hex digits.
    PairHex { high: u32, accum: u32, digits: u8 },
}

pub(crate) struct StringLexer {
    state: StrState,
    /// Captured at lexeme start so a runtime toggle never splits one
    /// string between modes.
    raw: bool,
}

impl StringLexer {
    pub fn new(raw: bool) -> Self {
        Self {
            state: StrState::Open,
            raw,
        }
    }

    pub fn step<R: Reader>(&mut self, src: &mut LexSource<'_, R>) -> Result<LexStep, ParseError> {
        match self.state {
            StrState::Open => match src.current() {
                Some(b'"') => {
                    if self.raw {
                        src.capture(b'"');
                    }
                    src.advance();
                    self.state = StrState::Body;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            StrState::Body => match src.current() {
                Some(b'"') => {
                    if self.raw {
                        src.capture(b'"');
                    }
                    src.advance();
                    self.state = StrState::Complete;
                    Ok(LexStep::More)
                }
                Some(b'\\') => {
                    if self.raw {
                        src.capture(b'\\');
                    }
                    src.advance();
                    self.state = StrState::Escape;
                    Ok(LexStep::More)
                }
                // a literal newline terminates nothing; it is an error
                Some(b'\n') | None => Err(ParseError::IllegalLiteral),
                Some(c) => {
                    src.capture(c);
                    src.advance();
                    Ok(LexStep::More)
                }
            },
            StrState::Complete => Ok(LexStep::Done(ValueType::None)),
            StrState::Escape => match src.current() {
                Some(b'u') => {
                    if self.raw {
                        src.capture(b'u');
                    }
                    src.advance();
                    self.state = StrState::Hex { accum: 0, digits: 0 };
                    Ok(LexStep::More)
                }
                Some(c) => match escape::unescape(c) {
                    Some(decoded) => {
                        src.capture(if self.raw { c } else { decoded });
                        src.advance();
                        self.state = StrState::Body;
                        Ok(LexStep::More)
                    }
                    None => Err(ParseError::IllegalLiteral),
                },
                None => Err(ParseError::IllegalLiteral),
            },
            StrState::Hex { accum, digits } => {
                let c = src.current().ok_or(ParseError::IllegalLiteral)?;
                let value = escape::hex_digit(c).ok_or(ParseError::IllegalLiteral)?;
                if self.raw {
                    src.capture(c);
                }
                src.advance();
                let accum = (accum << 4) | value;
                let digits = digits + 1;
                if digits < 4 {
                    self.state = StrState::Hex { accum, digits };
                } else if self.raw {
                    // raw mode captured the digits verbatim; nothing to emit
                    self.state = StrState::Body;
                } else if escape::is_high_surrogate(accum) {
                    self.state = StrState::PairBackslash { high: accum };
                } else {
                    self.state = StrState::Body;
                    self.emit_code_point(src, accum)?;
                }
                Ok(LexStep::More)
            }
            StrState::PairBackslash { high } => match src.current() {
                Some(b'\\') => {
                    src.advance();
                    self.state = StrState::PairU { high };
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            StrState::PairU { high } => match src.current() {
                Some(b'u') => {
                    src.advance();
                    self.state = StrState::PairHex {
                        high,
                        accum: 0,
                        digits: 0,
                    };
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            StrState::PairHex {
                high,
                accum,
                digits,
            } => {
                let c = src.current().ok_or(ParseError::IllegalLiteral)?;
                let value = escape::hex_digit(c).ok_or(ParseError::IllegalLiteral)?;
                src.advance();
                let accum = (accum << 4) | value;
                let digits = digits + 1;
                if digits < 4 {
                    self.state = StrState::PairHex {
                        high,
                        accum,
                        digits,
                    };
                } else {
                    let code_point = escape::combine_surrogate_pair(high, accum)
                        .ok_or(ParseError::IllegalLiteral)?;
                    self.state = StrState::Body;
                    self.emit_code_point(src, code_point)?;
                }
                Ok(LexStep::More)
            }
        }
    }

    /// Capture a decoded code point as UTF-8. The chunk guard's strict `<`
    /// leaves four writable bytes, so even a supplementary code point fits.
    fn emit_code_point<R: Reader>(
        &self,
        src: &mut LexSource<'_, R>,
        code_point: u32,
    ) -> Result<(), ParseError> {
        let mut utf8 = [0u8; 4];
        let bytes = escape::encode_utf8(code_point, &mut utf8).ok_or(ParseError::IllegalLiteral)?;
        for &b in bytes {
            src.capture(b);
        }
        Ok(())
    }
}
