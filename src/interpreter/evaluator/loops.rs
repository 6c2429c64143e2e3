use std::rc::Rc;

use crate::{
    ast::{Body, Expr},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{EvalResult, Flow, eval_body, eval_expr, flow},
        value::core::Value,
    },
    span::Span,
};

/// What one loop iteration decided.
enum Iteration {
    /// Keep looping.
    Next,
    /// A `break` ended the loop.
    Stop,
    /// A `return` is unwinding through the loop.
    Unwind(Flow),
}

/// Evaluates a `for` expression.
///
/// The loop variable starts at `start` and is advanced by `step` (default
/// `1`) while it stays on the `start` side of `end`: with a positive step
/// the loop runs while `var < end`, with a negative step while `var > end`,
/// and a zero step is a runtime error. The bound itself is never reached.
/// The loop variable is rebound in the current scope on every iteration and
/// keeps its last value afterwards.
///
/// When all three range values are integers the iteration stays in checked
/// integer arithmetic; a float anywhere promotes the whole range. Anything
/// non-numeric is a type error.
///
/// With an inline body, every iteration's value is collected and the loop
/// yields the list; `continue` skips the iteration without collecting and
/// `break` ends the loop with the values gathered so far. With a block body
/// the loop yields `Null`.
///
/// # Parameters
/// - `var`: The loop variable name.
/// - `start`: Initial value expression.
/// - `end`: Bound expression, exclusive.
/// - `step`: Optional step expression.
/// - `body`: The loop body.
/// - `span`: Source range of the loop header for error reporting.
/// - `env`: Evaluation environment.
///
/// # Returns
/// The loop's outcome, or a propagated `return` signal from the body.
pub fn eval_for(var: &str,
                start: &Expr,
                end: &Expr,
                step: Option<&Expr>,
                body: &Body,
                span: Span,
                env: &Rc<Env>)
                -> EvalResult<Flow> {
    let start = flow!(eval_expr(start, env));
    let end = flow!(eval_expr(end, env));
    let step = match step {
        Some(step) => flow!(eval_expr(step, env)),
        None => Value::Integer(1),
    };

    let collect = matches!(body, Body::Inline(_));
    let mut results = Vec::new();

    if let (Value::Integer(start), Value::Integer(end), Value::Integer(step)) =
        (&start, &end, &step)
    {
        let (end, step) = (*end, *step);
        if step == 0 {
            return Err(RuntimeError::ZeroStep { span });
        }

        let mut current = *start;
        while (step > 0 && current < end) || (step < 0 && current > end) {
            env.define(var, Value::Integer(current));

            match run_iteration(body, env, &mut results, collect)? {
                Iteration::Next => {},
                Iteration::Stop => break,
                Iteration::Unwind(signal) => return Ok(signal),
            }

            current = current.checked_add(step).ok_or(RuntimeError::Overflow { span })?;
        }
    } else {
        let (Some(start), Some(end), Some(step)) =
            (start.as_float(), end.as_float(), step.as_float())
        else {
            return Err(RuntimeError::TypeError { details:
                                                     "Loop bounds and step must be numbers"
                                                         .to_string(),
                                                 span });
        };
        if step == 0.0 {
            return Err(RuntimeError::ZeroStep { span });
        }

        let mut current = start;
        while (step > 0.0 && current < end) || (step < 0.0 && current > end) {
            env.define(var, Value::Float(current));

            match run_iteration(body, env, &mut results, collect)? {
                Iteration::Next => {},
                Iteration::Stop => break,
                Iteration::Unwind(signal) => return Ok(signal),
            }

            current += step;
        }
    }

    Ok(Flow::Value(loop_result(results, collect)))
}

/// Evaluates a `while` expression.
///
/// The condition is re-evaluated before every iteration; the loop runs
/// while it is truthy. Value collection and `break`/`continue` behave
/// exactly as in [`eval_for`].
///
/// # Parameters
/// - `condition`: The loop condition.
/// - `body`: The loop body.
/// - `env`: Evaluation environment.
///
/// # Returns
/// The loop's outcome, or a propagated `return` signal.
pub fn eval_while(condition: &Expr, body: &Body, env: &Rc<Env>) -> EvalResult<Flow> {
    let collect = matches!(body, Body::Inline(_));
    let mut results = Vec::new();

    loop {
        let guard = flow!(eval_expr(condition, env));
        if !guard.is_truthy() {
            break;
        }

        match run_iteration(body, env, &mut results, collect)? {
            Iteration::Next => {},
            Iteration::Stop => break,
            Iteration::Unwind(signal) => return Ok(signal),
        }
    }

    Ok(Flow::Value(loop_result(results, collect)))
}

/// Runs the body once and folds its outcome into the loop's bookkeeping.
///
/// `continue` merely skips the collection; `break` stops the loop; a
/// `return` is passed through untouched for the enclosing function to
/// catch.
fn run_iteration(body: &Body,
                 env: &Rc<Env>,
                 results: &mut Vec<Value>,
                 collect: bool)
                 -> EvalResult<Iteration> {
    match eval_body(body, env)? {
        Flow::Value(value) => {
            if collect {
                results.push(value);
            }
            Ok(Iteration::Next)
        },
        Flow::Continue(_) => Ok(Iteration::Next),
        Flow::Break(_) => Ok(Iteration::Stop),
        signal @ Flow::Return(..) => Ok(Iteration::Unwind(signal)),
    }
}

/// The value a finished loop yields.
fn loop_result(results: Vec<Value>, collect: bool) -> Value {
    if collect {
        Value::List(Rc::new(results))
    } else {
        Value::Null
    }
}
