//! Arithmetic expression evaluation.
//!
//! An explicit scan-and-reduce evaluator over `f64`: the expression is
//! parsed into a first operand followed by (operator, operand) pairs,
//! then reduced with standard precedence (multiplication and division
//! before addition and subtraction, left associative). No parentheses,
//! no functions, no arbitrary precision.
//!
//! Division by zero is not an error: it follows IEEE-754 and formats
//! as `"Infinity"`, `"-Infinity"`, or `"NaN"`.
//!
//! # Example
//!
//! ```rust
//! use tallypad::eval;
//!
//! assert_eq!(eval::evaluate("1+2x3").unwrap(), 7.0);
//! assert_eq!(eval::format_result(eval::evaluate("8/0").unwrap()), "Infinity");
//! ```

use crate::token::Operator;
use std::iter::Peekable;
use std::str::Chars;

pub mod error;

pub use error::EvalError;

/// An expression split into its first operand and the operator/operand
/// pairs that follow it. The buffer's operator-collapsing invariant
/// guarantees input of exactly this shape.
struct Parsed {
    first: f64,
    rest: Vec<(Operator, f64)>,
}

/// Evaluate an arithmetic expression.
///
/// Accepts digits, decimal points, the four operators in any of their
/// spellings (`+ - × ÷` and the ASCII aliases `x * /`), a sign where
/// an operand starts (pressing `+` or `-` on the `"0"` buffer replaces
/// it, so `"+5+2"` and `"-5+2"` are legal buffers), and the non-finite
/// result names `Infinity`, `-Infinity`, and `NaN` so a displayed
/// result can be evaluated onward. Anything else is an [`EvalError`].
///
/// # Example
///
/// ```rust
/// use tallypad::eval::{self, EvalError};
///
/// assert_eq!(eval::evaluate("7x8").unwrap(), 56.0);
/// assert_eq!(eval::evaluate("-5+2").unwrap(), -3.0);
/// assert_eq!(
///     eval::evaluate("1.2.3"),
///     Err(EvalError::MalformedNumber("1.2.3".to_string()))
/// );
/// ```
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    if expression.is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    Ok(reduce(parse(expression)?))
}

/// Format an evaluation result canonically.
///
/// Finite values render as their shortest round-trip decimal form
/// (`3`, `0.5`, `0.30000000000000004`), with negative zero folded to
/// `"0"`. Non-finite values render as `"Infinity"`, `"-Infinity"`,
/// or `"NaN"`.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn parse(expression: &str) -> Result<Parsed, EvalError> {
    let mut chars = expression.chars().peekable();
    let first = parse_operand(&mut chars)?;
    let mut rest = Vec::new();
    while let Some(&c) = chars.peek() {
        let operator = Operator::from_char(c).ok_or(EvalError::UnexpectedChar(c))?;
        chars.next();
        rest.push((operator, parse_operand(&mut chars)?));
    }
    Ok(Parsed { first, rest })
}

/// Scan one operand. A sign is consumed as part of the operand here,
/// which is only reachable where an operand is expected, so binary
/// minus is never swallowed. Besides number literals, the three
/// non-finite names [`format_result`] emits are accepted back, so a
/// displayed result can be chained into the next expression.
fn parse_operand(chars: &mut Peekable<Chars<'_>>) -> Result<f64, EvalError> {
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };
    let magnitude = match chars.peek() {
        Some('I') => {
            expect_literal(chars, "Infinity")?;
            f64::INFINITY
        }
        Some('N') => {
            expect_literal(chars, "NaN")?;
            f64::NAN
        }
        _ => {
            let mut literal = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    literal.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if literal.is_empty() {
                return Err(EvalError::MissingOperand);
            }
            literal
                .parse::<f64>()
                .map_err(|_| EvalError::MalformedNumber(literal))?
        }
    };
    Ok(if negative { -magnitude } else { magnitude })
}

fn expect_literal(chars: &mut Peekable<Chars<'_>>, name: &str) -> Result<(), EvalError> {
    for expected in name.chars() {
        match chars.next() {
            Some(c) if c == expected => {}
            Some(c) => return Err(EvalError::UnexpectedChar(c)),
            None => return Err(EvalError::MissingOperand),
        }
    }
    Ok(())
}

/// Reduce with precedence in a single pass: multiplication and division
/// fold into the running term, addition and subtraction flush the term
/// into the total.
fn reduce(parsed: Parsed) -> f64 {
    let mut total = 0.0;
    let mut term = parsed.first;
    let mut join = Operator::Add;
    for (operator, operand) in parsed.rest {
        match operator {
            Operator::Multiply | Operator::Divide => term = operator.apply(term, operand),
            Operator::Add | Operator::Subtract => {
                total = join.apply(total, term);
                join = operator;
                term = operand;
            }
        }
    }
    join.apply(total, term)
}
