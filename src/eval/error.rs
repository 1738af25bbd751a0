//! Evaluation error types.

use thiserror::Error;

/// Errors produced while parsing or evaluating an expression.
///
/// The engine never surfaces these to its caller; it maps any of them
/// to the displayed error marker and logs the fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The expression contained no characters at all
    #[error("expression is empty")]
    EmptyExpression,

    /// A number literal did not parse (e.g. stacked decimal points)
    #[error("malformed number literal {0:?}")]
    MalformedNumber(String),

    /// A character that is neither part of a number nor an operator
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    /// An operator with no operand after it
    #[error("expected an operand")]
    MissingOperand,
}
