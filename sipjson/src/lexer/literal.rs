// SPDX-License-Identifier: Apache-2.0

//! Literal matchers for `true`, `false` and `null`.

use super::LexStep;
use crate::lex_source::LexSource;
use crate::node::ValueType;
use crate::parse_error::ParseError;
use crate::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolState {
    Start,
    FalseA,
    FalseL,
    FalseS,
    TrueR,
    TrueU,
    /// Both literals share the trailing `e`.
    FinalE,
    Complete,
}

pub(crate) struct BoolLexer {
    state: BoolState,
    value: bool,
}

impl BoolLexer {
    pub fn new() -> Self {
        Self {
            state: BoolState::Start,
            value: false,
        }
    }

    /// The decoded literal, valid once the machine has completed.
    pub fn value(&self) -> bool {
        self.value
    }

    pub fn step<R: Reader>(&mut self, src: &mut LexSource<'_, R>) -> Result<LexStep, ParseError> {
        match self.state {
            BoolState::Start => match src.current() {
                Some(b'f') => {
                    src.capture(b'f');
                    src.advance();
                    self.value = false;
                    self.state = BoolState::FalseA;
                    Ok(LexStep::More)
                }
                Some(b't') => {
                    src.capture(b't');
                    src.advance();
                    self.value = true;
                    self.state = BoolState::TrueR;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            BoolState::FalseA => self.expect(src, b'a', BoolState::FalseL),
            BoolState::FalseL => self.expect(src, b'l', BoolState::FalseS),
            BoolState::FalseS => self.expect(src, b's', BoolState::FinalE),
            BoolState::TrueR => self.expect(src, b'r', BoolState::TrueU),
            BoolState::TrueU => self.expect(src, b'u', BoolState::FinalE),
            BoolState::FinalE => self.expect(src, b'e', BoolState::Complete),
            BoolState::Complete => Ok(LexStep::Done(ValueType::Boolean)),
        }
    }

    fn expect<R: Reader>(
        &mut self,
        src: &mut LexSource<'_, R>,
        byte: u8,
        next: BoolState,
    ) -> Result<LexStep, ParseError> {
        match src.current() {
            Some(c) if c == byte => {
                src.capture(c);
                src.advance();
                self.state = next;
                Ok(LexStep::More)
            }
            _ => Err(ParseError::IllegalLiteral),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NullState {
    Start,
    U,
    L1,
    L2,
    Complete,
}

pub(crate) struct NullLexer {
    state: NullState,
}

impl NullLexer {
    pub fn new() -> Self {
        Self {
            state: NullState::Start,
        }
    }

    pub fn step<R: Reader>(&mut self, src: &mut LexSource<'_, R>) -> Result<LexStep, ParseError> {
        let (byte, next) = match self.state {
            NullState::Start => (b'n', NullState::U),
            NullState::U => (b'u', NullState::L1),
            NullState::L1 => (b'l', NullState::L2),
            NullState::L2 => (b'l', NullState::Complete),
            NullState::Complete => return Ok(LexStep::Done(ValueType::Null)),
        };
        match src.current() {
            Some(c) if c == byte => {
                src.capture(c);
                src.advance();
                self.state = next;
                Ok(LexStep::More)
            }
            _ => Err(ParseError::IllegalLiteral),
        }
    }
}
