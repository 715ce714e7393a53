// SPDX-License-Identifier: Apache-2.0

//! The number machine. Accumulates integer and real values digit by digit
//! so a number larger than the capture buffer still finalizes correctly:
//! the buffer only ever holds the current chunk of the lexeme text, while
//! `int_val`/`real_val`/`scale` carry the numeric state across chunks.

use super::LexStep;
use crate::lex_source::LexSource;
use crate::node::ValueType;
use crate::parse_error::ParseError;
use crate::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumState {
    /// Expecting a sign or the first digit.
    Start,
    /// A `-` was consumed; expecting the first digit.
    Signed,
    /// A leading `0` was consumed.
    Zero,
    /// A `.` was consumed; a fraction digit is mandatory.
    FracFirst,
    /// Digits after the leading-zero or fraction path.
    Digits,
    /// An `e`/`E` was consumed; expecting a sign or exponent digit.
    ExpStart,
    /// An exponent sign was consumed; an exponent digit is mandatory.
    ExpSigned,
    /// Exponent digits.
    ExpDigits,
    /// Integer digits after a nonzero leading digit.
    IntDigits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumForm {
    Int,
    Frac,
    Exp,
    NegExp,
}

pub(crate) struct NumberLexer {
    state: NumState,
    form: NumForm,
    neg: bool,
    /// Fraction digit count while in the fraction, then the exponent
    /// magnitude once an `e` is seen.
    scale: i32,
    int_val: i64,
    real_val: f64,
}

/// 10^exp by repeated multiplication; clamped to the f64 range so absurd
/// exponents cannot stall the parser.
fn pow10(exp: i32) -> f64 {
    if exp > 308 {
        return f64::INFINITY;
    }
    if exp < -324 {
        return 0.0;
    }
    let mut p = 1.0_f64;
    let factor = if exp >= 0 { 10.0 } else { 0.1 };
    for _ in 0..exp.unsigned_abs() {
        p *= factor;
    }
    p
}

impl NumberLexer {
    pub fn new() -> Self {
        Self {
            state: NumState::Start,
            form: NumForm::Int,
            neg: false,
            scale: 0,
            int_val: 0,
            real_val: 0.0,
        }
    }

    /// The finalized integer value. Real numbers report their truncated
    /// integer part.
    pub fn int_value(&self) -> i64 {
        self.int_val
    }

    /// The finalized real value.
    pub fn real_value(&self) -> f64 {
        self.real_val
    }

    pub fn step<R: Reader>(&mut self, src: &mut LexSource<'_, R>) -> Result<LexStep, ParseError> {
        match self.state {
            NumState::Start => match src.current() {
                Some(b'0') => {
                    src.capture(b'0');
                    src.advance();
                    self.state = NumState::Zero;
                    Ok(LexStep::More)
                }
                Some(b'-') => {
                    src.capture(b'-');
                    src.advance();
                    self.neg = true;
                    self.state = NumState::Signed;
                    Ok(LexStep::More)
                }
                Some(c @ b'1'..=b'9') => {
                    self.push_int_digit(c);
                    src.capture(c);
                    src.advance();
                    self.state = NumState::IntDigits;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            NumState::Signed => match src.current() {
                Some(b'0') => {
                    src.capture(b'0');
                    src.advance();
                    self.state = NumState::Zero;
                    Ok(LexStep::More)
                }
                Some(c @ b'1'..=b'9') => {
                    self.push_int_digit(c);
                    src.capture(c);
                    src.advance();
                    self.state = NumState::IntDigits;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            NumState::Zero => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    // digits after a leading zero restart the accumulator
                    self.int_val = i64::from(c - b'0');
                    self.real_val = self.int_val as f64;
                    src.capture(c);
                    src.advance();
                    self.state = NumState::Digits;
                    Ok(LexStep::More)
                }
                Some(b'.') => {
                    src.capture(b'.');
                    src.advance();
                    self.form = NumForm::Frac;
                    self.state = NumState::FracFirst;
                    Ok(LexStep::More)
                }
                Some(c @ (b'e' | b'E')) => Ok(self.enter_exponent(src, c)),
                _ => Ok(self.finish_plain()),
            },
            NumState::FracFirst => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    self.push_frac_digit(c);
                    src.capture(c);
                    src.advance();
                    self.state = NumState::Digits;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            NumState::Digits => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    if self.form == NumForm::Frac {
                        self.push_frac_digit(c);
                    } else {
                        self.push_int_digit(c);
                    }
                    src.capture(c);
                    src.advance();
                    Ok(LexStep::More)
                }
                Some(c @ (b'e' | b'E')) => Ok(self.enter_exponent(src, c)),
                _ => Ok(self.finish_plain()),
            },
            NumState::ExpStart => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    self.push_exp_digit(c);
                    src.capture(c);
                    src.advance();
                    self.state = NumState::ExpDigits;
                    Ok(LexStep::More)
                }
                Some(b'-') => {
                    src.capture(b'-');
                    src.advance();
                    self.form = NumForm::NegExp;
                    self.state = NumState::ExpSigned;
                    Ok(LexStep::More)
                }
                Some(b'+') => {
                    src.capture(b'+');
                    src.advance();
                    self.state = NumState::ExpSigned;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            NumState::ExpSigned => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    self.push_exp_digit(c);
                    src.capture(c);
                    src.advance();
                    self.state = NumState::ExpDigits;
                    Ok(LexStep::More)
                }
                _ => Err(ParseError::IllegalLiteral),
            },
            NumState::ExpDigits => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    self.push_exp_digit(c);
                    src.capture(c);
                    src.advance();
                    Ok(LexStep::More)
                }
                _ => Ok(self.finish_exponent()),
            },
            NumState::IntDigits => match src.current() {
                Some(c @ b'0'..=b'9') => {
                    self.push_int_digit(c);
                    src.capture(c);
                    src.advance();
                    Ok(LexStep::More)
                }
                Some(b'.') => {
                    src.capture(b'.');
                    src.advance();
                    self.form = NumForm::Frac;
                    self.state = NumState::FracFirst;
                    Ok(LexStep::More)
                }
                Some(c @ (b'e' | b'E')) => Ok(self.enter_exponent(src, c)),
                _ => Ok(self.finish_plain()),
            },
        }
    }

    fn enter_exponent<R: Reader>(&mut self, src: &mut LexSource<'_, R>, marker: u8) -> LexStep {
        src.capture(marker);
        src.advance();
        self.form = NumForm::Exp;
        self.scale = 0;
        self.state = NumState::ExpStart;
        LexStep::More
    }

    fn push_int_digit(&mut self, digit: u8) {
        self.int_val = self
            .int_val
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
        self.real_val = self.int_val as f64;
    }

    fn push_frac_digit(&mut self, digit: u8) {
        let mut f = f64::from(digit - b'0');
        for _ in 0..=self.scale {
            f *= 0.1;
        }
        self.scale = self.scale.saturating_add(1);
        self.real_val += f;
    }

    fn push_exp_digit(&mut self, digit: u8) {
        self.scale = self
            .scale
            .saturating_mul(10)
            .saturating_add(i32::from(digit - b'0'));
    }

    fn finish_plain(&mut self) -> LexStep {
        if self.neg {
            self.real_val = -self.real_val;
            self.int_val = -self.int_val;
        }
        let value_type = if self.form == NumForm::Int {
            ValueType::Integer
        } else {
            ValueType::Real
        };
        LexStep::Done(value_type)
    }

    fn finish_exponent(&mut self) -> LexStep {
        let exp = if self.form == NumForm::NegExp {
            self.scale.saturating_neg()
        } else {
            self.scale
        };
        let p = pow10(exp);
        self.real_val *= p;
        self.int_val = (self.int_val as f64 * p) as i64;
        if self.neg {
            self.real_val = -self.real_val;
            self.int_val = -self.int_val;
        }
        LexStep::Done(ValueType::Real)
    }
}
