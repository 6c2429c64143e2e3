/// Core evaluation logic and control-flow propagation.
///
/// Contains the main expression and statement visitors, the [`Flow`] sum
/// type that models `return`/`break`/`continue` as explicit results, and
/// program-level evaluation.
///
/// [`Flow`]: core::Flow
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations, including short-circuit
/// logic, numeric arithmetic, string and list forms, and comparisons.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the sign operators and logical negation.
pub mod unary;

/// Evaluation of `for` and `while` loops.
///
/// Manages the loop variable, the step direction, per-iteration value
/// collection for expression-form bodies, and `break`/`continue`.
pub mod loops;

/// Function evaluation.
///
/// Handles closure construction, user-defined and host-provided calls,
/// argument checking, and return value computation.
pub mod function;

/// Host-provided callables.
///
/// Defines the native function table and builds the global environment the
/// shell hands to every program.
pub mod builtins;
