use std::rc::Rc;

use crate::{
    ast::{Body, Expr, IfCase, Statement},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::{binary, function, loops, unary},
        value::core::Value,
    },
    span::Span,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a `T` or a `RuntimeError`
/// describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of evaluating a node.
///
/// Most evaluations produce a plain value. The other three variants are the
/// control-flow signals raised by `return`, `break` and `continue`; they
/// propagate out of every visitor untouched until the construct that
/// consumes them (a function body for `Return`, a loop for `Break` and
/// `Continue`). A signal that reaches the top level is a runtime error. Each
/// signal remembers the span of the statement that raised it so that error
/// can point somewhere useful.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// An ordinary value.
    Value(Value),
    /// A `return` unwinding to the enclosing call.
    Return(Value, Span),
    /// A `break` unwinding to the enclosing loop.
    Break(Span),
    /// A `continue` unwinding to the enclosing loop.
    Continue(Span),
}

/// Unwraps a value-producing evaluation, propagating control-flow signals
/// to the caller.
macro_rules! flow {
    ($evaluation:expr) => {
        match $evaluation? {
            $crate::interpreter::evaluator::core::Flow::Value(value) => value,
            signal => return Ok(signal),
        }
    };
}
pub(crate) use flow;

/// Evaluates a complete program against an environment.
///
/// Every statement's value is recorded; a program of one statement yields
/// that statement's value directly, a longer program yields the list of all
/// statement values, and an empty program yields `Null`.
///
/// # Parameters
/// - `program`: The statements produced by
///   [`parse`](crate::interpreter::parser::core::parse).
/// - `env`: The environment to evaluate in, usually from
///   [`make_global_env`](crate::interpreter::evaluator::builtins::make_global_env).
///
/// # Returns
/// The program's value.
///
/// # Errors
/// Returns a `RuntimeError` when evaluation fails or when a
/// `return`/`break`/`continue` escapes the top level.
pub fn eval_program(program: &[Statement], env: &Rc<Env>) -> EvalResult<Value> {
    let mut results = Vec::with_capacity(program.len());

    for statement in program {
        match eval_statement(statement, env)? {
            Flow::Value(value) => results.push(value),
            Flow::Return(_, span) => {
                return Err(RuntimeError::ReturnOutsideFunction { span });
            },
            Flow::Break(span) => return Err(RuntimeError::BreakOutsideLoop { span }),
            Flow::Continue(span) => return Err(RuntimeError::ContinueOutsideLoop { span }),
        }
    }

    Ok(match results.len() {
           0 => Value::Null,
           1 => results.pop().unwrap_or(Value::Null),
           _ => Value::List(Rc::new(results)),
       })
}

/// Evaluates a single statement.
///
/// Expression statements produce their expression's outcome; the three
/// keyword statements produce the matching control-flow signal. A signal
/// raised while evaluating a `return` value expression takes precedence over
/// the `return` itself.
pub fn eval_statement(statement: &Statement, env: &Rc<Env>) -> EvalResult<Flow> {
    match statement {
        Statement::Expression { expr } => eval_expr(expr, env),
        Statement::Return { value, span } => {
            let value = match value {
                Some(expr) => flow!(eval_expr(expr, env)),
                None => Value::Null,
            };
            Ok(Flow::Return(value, *span))
        },
        Statement::Continue { span } => Ok(Flow::Continue(*span)),
        Statement::Break { span } => Ok(Flow::Break(*span)),
    }
}

/// Evaluates an expression and returns its outcome.
///
/// This is the main visitor. It dispatches on the expression variant:
/// literals, variables, bindings, operator applications, conditionals,
/// loops, function definitions and calls.
pub fn eval_expr(expr: &Expr, env: &Rc<Env>) -> EvalResult<Flow> {
    match expr {
        Expr::Literal { value, .. } => Ok(Flow::Value(value.into())),
        Expr::ListLiteral { elements, .. } => eval_list_literal(elements, env),
        Expr::Variable { name, span } => {
            env.lookup(name)
               .map(Flow::Value)
               .ok_or_else(|| RuntimeError::NotDefined { name: name.clone(),
                                                         span: *span, })
        },
        Expr::Assign { name, value, .. } => {
            let value = flow!(eval_expr(value, env));
            env.define(name, value.clone());
            Ok(Flow::Value(value))
        },
        Expr::UnaryOp { op, expr, span } => unary::eval_unary_op(*op, expr, *span, env),
        Expr::BinaryOp { left,
                         op,
                         right,
                         span, } => binary::core::eval_binary_op(left, *op, right, *span, env),
        Expr::If { cases, else_body, .. } => eval_if(cases, else_body.as_ref(), env),
        Expr::For { var,
                    start,
                    end,
                    step,
                    body,
                    span, } => {
            loops::eval_for(var, start, end, step.as_deref(), body, *span, env)
        },
        Expr::While { condition, body, .. } => loops::eval_while(condition, body, env),
        Expr::FuncDef { name, params, body, .. } => {
            function::eval_func_def(name.as_deref(), params, body, env)
        },
        Expr::Call { callee,
                     arguments,
                     span, } => function::eval_call(callee, arguments, *span, env),
    }
}

/// Evaluates the body of a conditional, loop or function.
///
/// An inline body yields its statement's outcome. A block body executes its
/// statements in order, stops at the first control-flow signal, and
/// otherwise yields `Null`; the values of its statements are discarded.
pub fn eval_body(body: &Body, env: &Rc<Env>) -> EvalResult<Flow> {
    match body {
        Body::Inline(statement) => eval_statement(statement, env),
        Body::Block(statements) => {
            for statement in statements {
                match eval_statement(statement, env)? {
                    Flow::Value(_) => {},
                    signal => return Ok(signal),
                }
            }

            Ok(Flow::Value(Value::Null))
        },
    }
}

/// Evaluates a conditional expression.
///
/// Conditions are tried in source order; the first truthy one selects its
/// body. With no match and no `else`, the conditional yields `Null`.
fn eval_if(cases: &[IfCase], else_body: Option<&Body>, env: &Rc<Env>) -> EvalResult<Flow> {
    for case in cases {
        let condition = flow!(eval_expr(&case.condition, env));

        if condition.is_truthy() {
            return eval_body(&case.body, env);
        }
    }

    match else_body {
        Some(body) => eval_body(body, env),
        None => Ok(Flow::Value(Value::Null)),
    }
}

/// Evaluates the elements of a list literal, left to right.
fn eval_list_literal(elements: &[Expr], env: &Rc<Env>) -> EvalResult<Flow> {
    let mut items = Vec::with_capacity(elements.len());

    for element in elements {
        items.push(flow!(eval_expr(element, env)));
    }

    Ok(Flow::Value(Value::List(Rc::new(items))))
}
