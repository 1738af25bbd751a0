//! Token classification for calculator input.
//!
//! The engine receives input one character at a time. This module
//! classifies those characters: digits and the decimal point pass
//! through uninterpreted, operators are recognized as a class so the
//! buffer can enforce its no-consecutive-operators invariant.

use std::fmt;

/// Binary arithmetic operator.
///
/// The display glyphs are `+`, `-`, `×`, `÷`; the ASCII spellings
/// `x`, `*`, and `/` are accepted as aliases so keyboard input and
/// button input classify identically.
///
/// # Example
///
/// ```rust
/// use tallypad::token::Operator;
///
/// assert_eq!(Operator::from_char('x'), Some(Operator::Multiply));
/// assert_eq!(Operator::from_char('×'), Some(Operator::Multiply));
/// assert_eq!(Operator::from_char('7'), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Classify a character as an operator.
    ///
    /// Returns `None` for anything that is not an operator spelling.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            'x' | '*' | '\u{d7}' => Some(Self::Multiply),
            '/' | '\u{f7}' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operator to two operands.
    ///
    /// Arithmetic is plain `f64`, so division by zero follows IEEE-754:
    /// `8 ÷ 0` is positive infinity, `0 ÷ 0` is NaN. Neither is an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tallypad::token::Operator;
    ///
    /// assert_eq!(Operator::Multiply.apply(7.0, 8.0), 56.0);
    /// assert_eq!(Operator::Divide.apply(8.0, 0.0), f64::INFINITY);
    /// ```
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }

    /// The display glyph for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '\u{d7}',
            Self::Divide => '\u{f7}',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// True if the character is any spelling of an operator token.
pub fn is_operator(c: char) -> bool {
    Operator::from_char(c).is_some()
}
