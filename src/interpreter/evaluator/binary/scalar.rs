use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    span::Span,
    util::num::i64_to_f64,
};

/// Evaluates a scalar arithmetic operation.
///
/// Two integers stay in integer arithmetic, which is checked: overflow is a
/// runtime error rather than a wrap. Division of two integers promotes to a
/// float exactly when the quotient has a remainder. As soon as either
/// operand is a float, both are promoted and the result is a float.
/// Division by zero of either kind is a runtime error.
///
/// # Parameters
/// - `op`: The arithmetic operator (`Add`, `Sub`, `Mul`, `Div` or `Pow`).
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `span`: Source range for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed number.
///
/// # Example
/// ```
/// use slate::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::scalar::eval_scalar_op, value::core::Value},
///     span::Span,
/// };
///
/// let exact = eval_scalar_op(BinaryOperator::Div,
///                            &Value::Integer(8),
///                            &Value::Integer(2),
///                            Span::default());
/// assert_eq!(exact.unwrap(), Value::Integer(4));
///
/// let fractional = eval_scalar_op(BinaryOperator::Div,
///                                 &Value::Integer(7),
///                                 &Value::Integer(2),
///                                 Span::default());
/// assert_eq!(fractional.unwrap(), Value::Float(3.5));
/// ```
pub fn eval_scalar_op(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      span: Span)
                      -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_op(op, *a, *b, span),
        _ => {
            let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                return Err(RuntimeError::TypeError { details: format!("Cannot use '{op}' on {left} and {right}"),
                                                     span });
            };

            eval_float_op(op, a, b, span)
        },
    }
}

/// Integer arithmetic with overflow checks.
fn eval_integer_op(op: BinaryOperator, a: i64, b: i64, span: Span) -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, Mul, Pow, Sub};

    match op {
        Add => a.checked_add(b).map(Value::Integer).ok_or(RuntimeError::Overflow { span }),
        Sub => a.checked_sub(b).map(Value::Integer).ok_or(RuntimeError::Overflow { span }),
        Mul => a.checked_mul(b).map(Value::Integer).ok_or(RuntimeError::Overflow { span }),
        Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { span });
            }
            match a.checked_rem(b) {
                Some(0) => {
                    a.checked_div(b).map(Value::Integer).ok_or(RuntimeError::Overflow { span })
                },
                Some(_) => Ok(Value::Float(i64_to_f64(a) / i64_to_f64(b))),
                None => Err(RuntimeError::Overflow { span }),
            }
        },
        Pow => eval_integer_pow(a, b, span),
        _ => unreachable!(),
    }
}

/// Integer exponentiation.
///
/// A negative exponent leaves the integers: `2 ^ -1` is `0.5`. Non-negative
/// exponents stay integral and are overflow-checked.
fn eval_integer_pow(base: i64, exponent: i64, span: Span) -> EvalResult<Value> {
    if exponent < 0 {
        return Ok(Value::Float(i64_to_f64(base).powf(i64_to_f64(exponent))));
    }

    u32::try_from(exponent)
        .ok()
        .and_then(|exponent| base.checked_pow(exponent))
        .map(Value::Integer)
        .ok_or(RuntimeError::Overflow { span })
}

/// Float arithmetic after promotion.
fn eval_float_op(op: BinaryOperator, a: f64, b: f64, span: Span) -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, Mul, Pow, Sub};

    Ok(Value::Float(match op {
                        Add => a + b,
                        Sub => a - b,
                        Mul => a * b,
                        Div => {
                            if b == 0.0 {
                                return Err(RuntimeError::DivisionByZero { span });
                            }
                            a / b
                        },
                        Pow => a.powf(b),
                        _ => unreachable!(),
                    }))
}
