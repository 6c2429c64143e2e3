use std::rc::Rc;

use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{EvalResult, Flow, eval_expr, flow},
        value::core::Value,
    },
    span::Span,
};

/// Evaluates a unary operation.
///
/// Supported operators:
/// - `Plus`: identity, defined for numbers only.
/// - `Negate`: numeric negation, overflow-checked for integers.
/// - `Not`: logical negation of the operand's truth value, yielding an
///   integer flag.
///
/// # Parameters
/// - `op`: Unary operator.
/// - `expr`: Operand expression.
/// - `span`: Source range of operator and operand.
/// - `env`: Evaluation environment.
///
/// # Returns
/// The computed outcome, or a propagated control-flow signal from the
/// operand.
pub fn eval_unary_op(op: UnaryOperator,
                     expr: &Expr,
                     span: Span,
                     env: &Rc<Env>)
                     -> EvalResult<Flow> {
    let value = flow!(eval_expr(expr, env));

    let result = match op {
        UnaryOperator::Plus => {
            if !value.is_numeric() {
                return Err(RuntimeError::TypeError { details: format!("Cannot use unary '+' on {value}"),
                                                     span });
            }
            value
        },
        UnaryOperator::Negate => match value {
            Value::Integer(n) => {
                Value::Integer(n.checked_neg().ok_or(RuntimeError::Overflow { span })?)
            },
            Value::Float(x) => Value::Float(-x),
            other => {
                return Err(RuntimeError::TypeError { details: format!("Cannot use unary '-' on {other}"),
                                                     span });
            },
        },
        UnaryOperator::Not => Value::Integer(i64::from(!value.is_truthy())),
    };

    Ok(Flow::Value(result))
}
