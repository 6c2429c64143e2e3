use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    span::Span,
    util::num::{list_index, repeat_count},
};

/// Evaluates an arithmetic operator whose operands involve a string or a
/// list.
///
/// The defined forms are:
///
/// | Form | Meaning |
/// |---|---|
/// | `string + string` | concatenation |
/// | `string * integer` | repetition |
/// | `list + value` | new list with `value` appended |
/// | `list - integer` | new list with the element at that index removed |
/// | `list * list` | concatenation |
/// | `list / integer` | the element at that index |
///
/// Lists are never mutated in place; `+`, `-` and `*` build new lists and
/// leave every other holder of the operand untouched. Any combination not
/// in the table is a type error.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `span`: Source range for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed value.
pub fn eval_sequence_op(op: BinaryOperator,
                        left: &Value,
                        right: &Value,
                        span: Span)
                        -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, Mul, Sub};

    match (op, left, right) {
        (Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}").into())),

        (Mul, Value::Str(text), Value::Integer(count)) => {
            let count = repeat_count(*count, span)?;
            Ok(Value::Str(text.repeat(count).into()))
        },

        (Add, Value::List(items), element) => {
            let mut items = items.as_ref().clone();
            items.push(element.clone());
            Ok(Value::List(Rc::new(items)))
        },

        (Sub, Value::List(items), Value::Integer(index)) => {
            let offset = list_index(*index, items.len(), span)?;
            let mut items = items.as_ref().clone();
            items.remove(offset);
            Ok(Value::List(Rc::new(items)))
        },

        (Mul, Value::List(a), Value::List(b)) => {
            let mut items = a.as_ref().clone();
            items.extend(b.iter().cloned());
            Ok(Value::List(Rc::new(items)))
        },

        (Div, Value::List(items), Value::Integer(index)) => {
            let offset = list_index(*index, items.len(), span)?;
            Ok(items[offset].clone())
        },

        _ => {
            Err(RuntimeError::TypeError { details: format!("Cannot use '{op}' on {left} and {right}"),
                                          span })
        },
    }
}
