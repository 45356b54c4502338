#![forbid(unsafe_code)]

//! Validated division problems.
//!
//! A [`Problem`] is the only input the step generator accepts. Constructing
//! one enforces the generator's precondition: both operands are non-empty
//! decimal strings that fit in a `u64`, and neither is zero.

use std::fmt;

use thiserror::Error;

/// Which operand a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Dividend,
    Divisor,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dividend => "dividend",
            Self::Divisor => "divisor",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected operand input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("please enter both a dividend and a divisor ({field} is empty)")]
    Empty { field: Field },

    #[error("{field} must contain only the digits 0-9, got {value:?}")]
    NotDecimal { field: Field, value: String },

    #[error("{field} {value} is too large (maximum is {max})", max = u64::MAX)]
    OutOfRange { field: Field, value: String },

    #[error("cannot divide by zero")]
    ZeroDivisor,

    #[error("dividend cannot be zero")]
    ZeroDividend,
}

impl ProblemError {
    /// The operand the error is about, if it names one.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Empty { field }
            | Self::NotDecimal { field, .. }
            | Self::OutOfRange { field, .. } => Some(*field),
            Self::ZeroDivisor => Some(Field::Divisor),
            Self::ZeroDividend => Some(Field::Dividend),
        }
    }
}

/// A dividend/divisor pair that satisfies the generator's precondition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Problem {
    dividend: String,
    divisor: String,
    dividend_value: u64,
    divisor_value: u64,
}

impl Problem {
    /// Validate raw operand text.
    ///
    /// Surrounding whitespace is ignored; the digits are kept as typed, so a
    /// dividend of `"007"` is drawn with its leading zeros.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError`] when either operand is empty, contains
    /// anything other than ASCII digits, overflows `u64`, or is zero.
    pub fn new(dividend: &str, divisor: &str) -> Result<Self, ProblemError> {
        let dividend = dividend.trim();
        let divisor = divisor.trim();

        if dividend.is_empty() {
            return Err(ProblemError::Empty {
                field: Field::Dividend,
            });
        }
        if divisor.is_empty() {
            return Err(ProblemError::Empty {
                field: Field::Divisor,
            });
        }

        let dividend_value = parse_operand(Field::Dividend, dividend)?;
        let divisor_value = parse_operand(Field::Divisor, divisor)?;

        if divisor_value == 0 {
            return Err(ProblemError::ZeroDivisor);
        }
        if dividend_value == 0 {
            return Err(ProblemError::ZeroDividend);
        }

        Ok(Self {
            dividend: dividend.to_string(),
            divisor: divisor.to_string(),
            dividend_value,
            divisor_value,
        })
    }

    /// Dividend digits as entered.
    #[must_use]
    pub fn dividend(&self) -> &str {
        &self.dividend
    }

    /// Divisor digits as entered.
    #[must_use]
    pub fn divisor(&self) -> &str {
        &self.divisor
    }

    #[must_use]
    pub fn dividend_value(&self) -> u64 {
        self.dividend_value
    }

    #[must_use]
    pub fn divisor_value(&self) -> u64 {
        self.divisor_value
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ÷ {}", self.dividend, self.divisor)
    }
}

fn parse_operand(field: Field, raw: &str) -> Result<u64, ProblemError> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProblemError::NotDecimal {
            field,
            value: raw.to_string(),
        });
    }
    raw.parse::<u64>().map_err(|_| ProblemError::OutOfRange {
        field,
        value: raw.to_string(),
    })
}
