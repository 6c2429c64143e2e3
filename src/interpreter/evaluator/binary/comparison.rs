use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    span::Span,
};

/// Maps an equality operator and a boolean equality result to the final
/// truth value, inverting it for `!=`.
#[must_use]
pub const fn equality_op_result(op: BinaryOperator, is_equal: bool) -> bool {
    match op {
        BinaryOperator::Equal => is_equal,
        BinaryOperator::NotEqual => !is_equal,
        _ => unreachable!(),
    }
}

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// Comparisons produce `Integer(1)` for true and `Integer(0)` for false.
/// The ordered operators (`<`, `>`, `<=`, `>=`) are defined for numbers
/// only; two integers compare exactly, anything else compares after float
/// promotion. Equality additionally covers strings and lists; every other
/// kind combination is a type error rather than "unequal".
///
/// # Parameters
/// - `op`: The comparison operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `span`: Source range for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing an integer truth flag.
///
/// # Example
/// ```
/// use slate::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::comparison::eval_comparison, value::core::Value},
///     span::Span,
/// };
///
/// let result = eval_comparison(BinaryOperator::Less,
///                              &Value::Integer(3),
///                              &Value::Float(5.0),
///                              Span::default());
/// assert_eq!(result.unwrap(), Value::Integer(1));
/// ```
pub fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       span: Span)
                       -> EvalResult<Value> {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    let result = match op {
        Equal | NotEqual => {
            let is_equal = values_equal(left, right, span)?;
            equality_op_result(op, is_equal)
        },

        Less | Greater | LessEqual | GreaterEqual => match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => compare_ordered(op, a, b),
            _ => {
                let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                    return Err(RuntimeError::TypeError { details: format!("Cannot use '{op}' on {left} and {right}"),
                                                         span });
                };

                compare_ordered(op, &a, &b)
            },
        },

        _ => unreachable!(),
    };

    Ok(Value::Integer(i64::from(result)))
}

/// Structural equality as defined by the language's `==`.
///
/// Numbers compare across the Integer/Float divide; strings compare as
/// text; lists compare element-wise with the same rule. Comparing any other
/// combination of kinds is a type error.
///
/// # Errors
/// Returns `RuntimeError::TypeError` for kind combinations with no defined
/// equality, including one buried inside compared lists.
pub fn values_equal(left: &Value, right: &Value, span: Span) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }

            for (x, y) in a.iter().zip(b.iter()) {
                if !values_equal(x, y, span)? {
                    return Ok(false);
                }
            }

            Ok(true)
        },
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            Ok(left.as_float() == right.as_float())
        },
        _ => {
            Err(RuntimeError::TypeError { details: format!("Cannot compare {left} and {right} with '=='"),
                                          span })
        },
    }
}

/// Applies an ordered comparison operator.
fn compare_ordered<T: PartialOrd>(op: BinaryOperator, a: &T, b: &T) -> bool {
    match op {
        BinaryOperator::Less => a < b,
        BinaryOperator::Greater => a > b,
        BinaryOperator::LessEqual => a <= b,
        BinaryOperator::GreaterEqual => a >= b,
        _ => unreachable!(),
    }
}
