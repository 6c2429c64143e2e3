use crate::{
    error::report::render,
    span::Span,
};

/// Represents all errors that can be raised during evaluation.
///
/// Every variant carries the source span of the construct whose evaluation
/// failed. Runtime errors are fatal to the evaluation in progress; there is
/// no in-language way to catch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Looked up a name with no binding in the scope chain.
    NotDefined {
        /// The name that failed to resolve.
        name: String,
        /// Source range of the reference.
        span: Span,
    },
    /// An operator or operation was applied to values of unsuitable kinds.
    TypeError {
        /// Details about the mismatch.
        details: String,
        /// Source range of the failing operation.
        span:    Span,
    },
    /// Call syntax was applied to a value that is not a function.
    NotCallable {
        /// Details about the offending value.
        details: String,
        /// Source range of the call.
        span:    Span,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// Name of the function, or `anonymous`.
        name:     String,
        /// Number of parameters the function declares.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// Source range of the call.
        span:     Span,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// Source range of the division.
        span: Span,
    },
    /// A list was indexed outside its bounds.
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the list.
        len:   usize,
        /// Source range of the indexing operation.
        span:  Span,
    },
    /// An operation received a value outside its domain.
    InvalidArgument {
        /// Details about why the value is invalid.
        details: String,
        /// Source range of the failing operation.
        span:    Span,
    },
    /// A `for` loop was given a step of zero.
    ZeroStep {
        /// Source range of the loop header.
        span: Span,
    },
    /// Integer arithmetic overflowed the 64-bit range.
    Overflow {
        /// Source range of the failing operation.
        span: Span,
    },
    /// `return` unwound past the outermost function body.
    ReturnOutsideFunction {
        /// Source range of the statement.
        span: Span,
    },
    /// `break` unwound past the innermost loop.
    BreakOutsideLoop {
        /// Source range of the statement.
        span: Span,
    },
    /// `continue` unwound past the innermost loop.
    ContinueOutsideLoop {
        /// Source range of the statement.
        span: Span,
    },
    /// A script executed through `run` failed to load or evaluate.
    ScriptError {
        /// The propagated failure, already rendered.
        details: String,
        /// Source range of the `run` call.
        span:    Span,
    },
}

impl RuntimeError {
    /// Gets the source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::NotDefined { span, .. }
            | Self::TypeError { span, .. }
            | Self::NotCallable { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::DivisionByZero { span }
            | Self::IndexOutOfRange { span, .. }
            | Self::InvalidArgument { span, .. }
            | Self::ZeroStep { span }
            | Self::Overflow { span }
            | Self::ReturnOutsideFunction { span }
            | Self::BreakOutsideLoop { span }
            | Self::ContinueOutsideLoop { span }
            | Self::ScriptError { span, .. } => *span,
        }
    }

    /// Returns the human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotDefined { name, .. } => format!("'{name}' is not defined"),
            Self::TypeError { details, .. } => format!("Type error: {details}"),
            Self::NotCallable { details, .. } => details.clone(),
            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  .. } => {
                format!("Function '{name}' expects {expected} argument(s), but {found} were given")
            },
            Self::DivisionByZero { .. } => "Division by zero".to_string(),
            Self::IndexOutOfRange { index, len, .. } => {
                format!("Index {index} is out of range for a list of length {len}")
            },
            Self::InvalidArgument { details, .. } => format!("Invalid argument: {details}"),
            Self::ZeroStep { .. } => "Loop step must not be zero".to_string(),
            Self::Overflow { .. } => {
                "Integer overflow while trying to compute result".to_string()
            },
            Self::ReturnOutsideFunction { .. } => "'return' outside of a function".to_string(),
            Self::BreakOutsideLoop { .. } => "'break' outside of a loop".to_string(),
            Self::ContinueOutsideLoop { .. } => "'continue' outside of a loop".to_string(),
            Self::ScriptError { details, .. } => details.clone(),
        }
    }

    /// Renders the full diagnostic, including the offending source line with
    /// a caret underline.
    #[must_use]
    pub fn report(&self, file_name: &str, source: &str) -> String {
        render("RuntimeError", &self.message(), self.span(), file_name, source)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Error on line {}: {}.",
               self.span().start.line,
               self.message())
    }
}

impl std::error::Error for RuntimeError {}
