use std::rc::Rc;

use crate::{
    ast::{Body, Expr},
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{EvalResult, Flow, eval_body, eval_expr, flow},
        value::{core::Value, function::Function},
    },
    span::Span,
};

/// Evaluates a function definition.
///
/// Produces a closure capturing the current environment. A named definition
/// is additionally bound under its name in that same environment, which is
/// what lets it call itself. The definition always evaluates to the
/// function value.
///
/// # Parameters
/// - `name`: The function's self-name, if any.
/// - `params`: Parameter names.
/// - `body`: The shared function body.
/// - `env`: The defining environment, captured by the closure.
pub fn eval_func_def(name: Option<&str>,
                     params: &[String],
                     body: &Rc<Body>,
                     env: &Rc<Env>)
                     -> EvalResult<Flow> {
    let function = Value::Function(Rc::new(Function { name:   name.map(str::to_owned),
                                                      params: params.to_vec(),
                                                      body:   Rc::clone(body),
                                                      env:    Rc::clone(env), }));

    if let Some(name) = name {
        env.define(name, function.clone());
    }

    Ok(Flow::Value(function))
}

/// Evaluates a function call.
///
/// The callee expression is evaluated first, then the arguments left to
/// right. The callee must be a function or a host-provided callable; the
/// argument count must match the declared parameter count exactly in either
/// case.
///
/// # Parameters
/// - `callee`: Expression producing the callable.
/// - `arguments`: Argument expressions.
/// - `span`: Source range of the call for error reporting.
/// - `env`: The caller's environment.
///
/// # Returns
/// The call's outcome, or a propagated control-flow signal from the callee
/// or argument expressions.
pub fn eval_call(callee: &Expr,
                 arguments: &[Expr],
                 span: Span,
                 env: &Rc<Env>)
                 -> EvalResult<Flow> {
    let callee = flow!(eval_expr(callee, env));

    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(flow!(eval_expr(argument, env)));
    }

    match &callee {
        Value::Function(function) => call_function(function, args, span).map(Flow::Value),
        Value::Native(native) => {
            if args.len() != native.arity {
                return Err(RuntimeError::ArityMismatch { name:     native.name.to_owned(),
                                                         expected: native.arity,
                                                         found:    args.len(),
                                                         span });
            }

            (native.func)(&args, env, span).map(Flow::Value)
        },
        other => {
            Err(RuntimeError::NotCallable { details: format!("{other} is not callable"),
                                            span })
        },
    }
}

/// Invokes a user-defined function with already evaluated arguments.
///
/// The body runs in a fresh environment whose parent is the function's
/// captured environment, with the parameters bound to the arguments. An
/// expression-bodied function yields its body's value; a block-bodied one
/// yields `Null` unless a `return` fires. A `break` or `continue` escaping
/// the body is a runtime error, since the loop it aimed for is outside the
/// function.
///
/// # Errors
/// Returns a `RuntimeError` on arity mismatch, an escaping loop signal, or
/// any failure inside the body.
pub fn call_function(function: &Function, args: Vec<Value>, span: Span) -> EvalResult<Value> {
    if args.len() != function.params.len() {
        return Err(RuntimeError::ArityMismatch { name:     function.display_name().to_owned(),
                                                 expected: function.params.len(),
                                                 found:    args.len(),
                                                 span });
    }

    let call_env = Env::with_parent(Rc::clone(&function.env));
    for (param, value) in function.params.iter().zip(args) {
        call_env.define(param, value);
    }

    match eval_body(&function.body, &call_env)? {
        Flow::Value(value) => Ok(value),
        Flow::Return(value, _) => Ok(value),
        Flow::Break(span) => Err(RuntimeError::BreakOutsideLoop { span }),
        Flow::Continue(span) => Err(RuntimeError::ContinueOutsideLoop { span }),
    }
}
