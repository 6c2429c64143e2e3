/// Core parsing entry points.
///
/// Contains the program parser, the expression entry point, and conditional
/// parsing with `elif`/`else` chains.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence ladder for logical, comparison, additive and
/// multiplicative operators, all left-associative.
pub mod binary;

/// Unary, power, call and atom parsing.
///
/// Covers the high-precedence end of the grammar: sign operators, the
/// right-associative power operator, the single call suffix, and every
/// atomic form including list literals, loops and function definitions.
pub mod unary;

/// Statement parsing.
///
/// Distinguishes `return`/`continue`/`break` from plain expression
/// statements.
pub mod statement;

/// Body parsing.
///
/// Parses the two surface forms shared by `if`, `for`, `while` and `func`:
/// a single inline statement, or a newline-separated block.
pub mod block;

/// Utility functions for the parser.
///
/// Provides the comma-separated list helper, identifier parsing, and token
/// expectation shared across the grammar.
pub mod utils;
