//! # slate
//!
//! slate is a small, dynamically-typed, expression-oriented scripting
//! language written in Rust. It provides variables, arithmetic and
//! comparison operators, short-circuit boolean connectives, `if`/`for`/
//! `while` control flow with `break`/`continue`, and first-class functions
//! with lexical scoping over integers, floats, strings, and lists.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::rc::Rc;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr`, `Statement` and `Body` types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source spans to AST nodes for error reporting.
/// - Records which surface form (inline or block) each body used.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code. It
/// standardizes error reporting and carries source spans for debugging and
/// user feedback, including a caret rendering of the offending line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches spans and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, environments,
/// value representations and error handling to provide a complete runtime
/// for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides entry points for tokenizing, parsing and evaluating code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source positions and spans.
///
/// Defines the `Position` and `Span` types attached to every token and AST
/// node so that diagnostics can point back at the exact source range.
pub mod span;
/// General utilities.
///
/// Numeric conversion helpers shared by the evaluator.
pub mod util;

pub use crate::{
    error::Error,
    interpreter::{
        env::Env,
        evaluator::{builtins::make_global_env, core::eval_program},
        lexer::tokenize,
        parser::core::parse,
        value::core::Value,
    },
};

/// Runs a complete program in a fresh global environment.
///
/// The source is tokenized, parsed and evaluated in one step. A program of
/// one statement yields that statement's value, a longer program yields the
/// list of all statement values, and an empty program yields `Null`.
///
/// # Errors
/// Returns an error if tokenizing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use slate::{Value, interpret};
///
/// let result = interpret("1 + 2 * 3").unwrap();
/// assert_eq!(result, Value::Integer(7));
///
/// // Unknown names are runtime errors.
/// assert!(interpret("nope + 1").is_err());
/// ```
pub fn interpret(source: &str) -> Result<Value, Error> {
    interpret_in(source, &make_global_env())
}

/// Runs a complete program in a caller-owned environment.
///
/// The interactive prompt uses this to keep definitions alive between
/// lines; tests use it to inspect the environment afterwards.
///
/// # Errors
/// Returns an error if tokenizing, parsing or evaluation fails.
pub fn interpret_in(source: &str, env: &Rc<Env>) -> Result<Value, Error> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;

    Ok(eval_program(&program, env)?)
}
