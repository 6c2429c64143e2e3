use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        env::Env,
        evaluator::{
            binary::{comparison, scalar, sequence},
            core::{EvalResult, Flow, eval_expr, flow},
        },
        value::core::Value,
    },
    span::Span,
};

/// Evaluates a binary operation at the expression level.
///
/// `and` and `or` are handled here because they must not evaluate their
/// right operand when the left one decides the result; both yield the
/// integer truth flag of the deciding operand, never the operand itself.
/// Every other operator evaluates both operands left to right and dispatches
/// on their kinds via [`apply_binary`].
///
/// # Parameters
/// - `left`: Left operand expression.
/// - `op`: The operator.
/// - `right`: Right operand expression.
/// - `span`: Source range of the whole operation.
/// - `env`: Evaluation environment.
///
/// # Returns
/// The operation's outcome, or a propagated control-flow signal from either
/// operand.
pub fn eval_binary_op(left: &Expr,
                      op: BinaryOperator,
                      right: &Expr,
                      span: Span,
                      env: &Rc<Env>)
                      -> EvalResult<Flow> {
    match op {
        BinaryOperator::And => {
            let lhs = flow!(eval_expr(left, env));
            if !lhs.is_truthy() {
                return Ok(Flow::Value(Value::Integer(0)));
            }

            let rhs = flow!(eval_expr(right, env));
            Ok(Flow::Value(Value::Integer(i64::from(rhs.is_truthy()))))
        },
        BinaryOperator::Or => {
            let lhs = flow!(eval_expr(left, env));
            if lhs.is_truthy() {
                return Ok(Flow::Value(Value::Integer(1)));
            }

            let rhs = flow!(eval_expr(right, env));
            Ok(Flow::Value(Value::Integer(i64::from(rhs.is_truthy()))))
        },
        _ => {
            let lhs = flow!(eval_expr(left, env));
            let rhs = flow!(eval_expr(right, env));

            apply_binary(op, &lhs, &rhs, span).map(Flow::Value)
        },
    }
}

/// Applies an eager binary operator to two evaluated values.
///
/// Arithmetic involving a string or list routes to the sequence forms;
/// everything else numeric routes to scalar arithmetic, and the comparison
/// class has its own handler. Operand kinds with no defined form produce a
/// type error carrying the operator's span.
///
/// # Example
/// ```
/// use slate::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::apply_binary, value::core::Value},
///     span::Span,
/// };
///
/// let result = apply_binary(BinaryOperator::Add,
///                           &Value::Integer(3),
///                           &Value::Integer(4),
///                           Span::default());
/// assert_eq!(result.unwrap(), Value::Integer(7));
/// ```
///
/// # Errors
/// Returns a `RuntimeError` for undefined operand kinds, division by zero,
/// integer overflow, and out-of-range list indices.
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    span: Span)
                    -> EvalResult<Value> {
    use BinaryOperator::{Add, And, Div, Mul, Or, Pow, Sub};

    match op {
        Add | Sub | Mul | Div | Pow => match (left, right) {
            (Value::Str(_) | Value::List(_), _) | (_, Value::Str(_) | Value::List(_)) => {
                sequence::eval_sequence_op(op, left, right, span)
            },
            _ => scalar::eval_scalar_op(op, left, right, span),
        },

        And | Or => unreachable!("logical operators are short-circuited before value dispatch"),

        _ => comparison::eval_comparison(op, left, right, span),
    }
}
