// SPDX-License-Identifier: Apache-2.0

//! The scalar lexer machines. One machine per JSON scalar kind; each
//! consumes bytes from the [`LexSource`], appends lexeme text to the
//! capture buffer, and keeps enough state to finalize a typed value even
//! when the lexeme is delivered in chunks.

mod literal;
mod number;
mod string;

pub(crate) use literal::{BoolLexer, NullLexer};
pub(crate) use number::NumberLexer;
pub(crate) use string::StringLexer;

use crate::lex_source::LexSource;
use crate::node::ValueType;
use crate::parse_error::ParseError;
use crate::Reader;

/// Outcome of a single lex step.
pub(crate) enum LexStep {
    /// More input bytes are needed.
    More,
    /// The lexeme terminated; carries its finalized value type.
    Done(ValueType),
}

/// The machine driving the current lexeme. Kept across reads so a paused
/// chunked lexeme resumes exactly where it left off.
pub(crate) enum LexUnit {
    Number(NumberLexer),
    Bool(BoolLexer),
    Null(NullLexer),
    Str(StringLexer),
}

impl LexUnit {
    pub fn step<R: Reader>(&mut self, src: &mut LexSource<'_, R>) -> Result<LexStep, ParseError> {
        match self {
            LexUnit::Number(lexer) => lexer.step(src),
            LexUnit::Bool(lexer) => lexer.step(src),
            LexUnit::Null(lexer) => lexer.step(src),
            LexUnit::Str(lexer) => lexer.step(src),
        }
    }
}
