use std::{fs, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        env::Env,
        evaluator::core::{EvalResult, Flow, eval_statement},
        lexer::tokenize,
        parser::core::parse,
        value::{core::Value, function::NativeFunction},
    },
    span::Span,
};

/// Defines the host functions installed into every global environment.
///
/// Each entry provides a name, an exact arity (checked before the call),
/// and the implementing function. The macro produces the static
/// `NATIVE_TABLE` consumed by [`make_global_env`].
macro_rules! native_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Table of host functions installed into every global environment.
        pub static NATIVE_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

native_functions! {
    "print"  => { arity: 1, func: print },
    "len"    => { arity: 1, func: len },
    "append" => { arity: 2, func: append },
    "run"    => { arity: 1, func: run },
}

/// Produces the initial global environment.
///
/// The environment contains one binding per entry of the native table and
/// nothing else. Programs may shadow the natives; `var print = 1` simply
/// rebinds the name.
///
/// # Example
/// ```
/// use slate::interpreter::evaluator::builtins::make_global_env;
///
/// let globals = make_global_env();
/// assert!(globals.lookup("print").is_some());
/// ```
#[must_use]
pub fn make_global_env() -> Rc<Env> {
    let env = Env::new();

    for native in NATIVE_TABLE {
        env.define(native.name, Value::Native(*native));
    }

    env
}

/// Prints a value to standard output and returns `Null`.
///
/// The value is formatted using its `Display` implementation, so strings
/// print without quotes.
fn print(args: &[Value], _env: &Rc<Env>, _span: Span) -> EvalResult<Value> {
    println!("{}", args[0]);
    Ok(Value::Null)
}

/// Returns the length of a string (in bytes) or list as an integer.
fn len(args: &[Value], _env: &Rc<Env>, span: Span) -> EvalResult<Value> {
    let length = match &args[0] {
        Value::Str(text) => text.len(),
        Value::List(items) => items.len(),
        other => {
            return Err(RuntimeError::TypeError { details: format!("len expects a string or a list, got {other}"),
                                                 span });
        },
    };

    i64::try_from(length).map(Value::Integer).map_err(|_| RuntimeError::Overflow { span })
}

/// Returns a new list with a value appended.
fn append(args: &[Value], _env: &Rc<Env>, span: Span) -> EvalResult<Value> {
    let Value::List(items) = &args[0] else {
        return Err(RuntimeError::TypeError { details: format!("append expects a list, got {}",
                                                              args[0]),
                                             span });
    };

    let mut items = items.as_ref().clone();
    items.push(args[1].clone());
    Ok(Value::List(Rc::new(items)))
}

/// Loads and runs a script file, returning its last statement's value.
///
/// The script is tokenized, parsed and evaluated against the globals of the
/// calling environment chain, so definitions it makes are visible to the
/// caller afterwards. Any failure, from the file read to a runtime error
/// inside the script, surfaces as a runtime error at the `run` call; the
/// nested diagnostic (which points at the script's own lines) is carried in
/// the message.
fn run(args: &[Value], env: &Rc<Env>, span: Span) -> EvalResult<Value> {
    let Value::Str(path) = &args[0] else {
        return Err(RuntimeError::TypeError { details: format!("run expects a file path string, got {}",
                                                              args[0]),
                                             span });
    };

    let source = fs::read_to_string(path.as_ref()).map_err(|error| {
                                                      RuntimeError::ScriptError {
                        details: format!("Failed to read '{path}': {error}"),
                        span,
                    }
                                                  })?;

    let tokens = tokenize(&source).map_err(|error| {
                                      RuntimeError::ScriptError { details: error.to_string(),
                                                                  span }
                                  })?;
    let program = parse(&tokens).map_err(|error| {
                                    RuntimeError::ScriptError { details: error.to_string(),
                                                                span }
                                })?;

    let globals = env.globals();
    let mut last = Value::Null;

    for statement in &program {
        let outcome = eval_statement(statement, &globals).map_err(|error| {
                                                             RuntimeError::ScriptError {
                              details: error.to_string(),
                              span,
                          }
                                                         })?;
        match outcome {
            Flow::Value(value) => last = value,
            Flow::Return(..) => {
                return Err(RuntimeError::ReturnOutsideFunction { span });
            },
            Flow::Break(_) => return Err(RuntimeError::BreakOutsideLoop { span }),
            Flow::Continue(_) => return Err(RuntimeError::ContinueOutsideLoop { span }),
        }
    }

    Ok(last)
}
