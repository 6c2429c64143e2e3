use crate::{
    error::report::render,
    span::Span,
};

/// Represents all errors that can occur while parsing a token stream.
///
/// Every variant names what the parser expected and carries the span of the
/// token that disappointed it, so diagnostics can underline the exact spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Found a token other than the one the grammar requires.
    UnexpectedToken {
        /// Description of what the grammar expected here.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// Source range of the offending token.
        span:     Span,
    },
    /// Ran out of tokens before the construct was complete.
    UnexpectedEndOfInput {
        /// Source range at which input ended.
        span: Span,
    },
    /// Found leftover tokens after a complete program.
    TrailingInput {
        /// Description of the first leftover token.
        found: String,
        /// Source range of the leftover token.
        span:  Span,
    },
}

impl ParseError {
    /// Gets the source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span }
            | Self::TrailingInput { span, .. } => *span,
        }
    }

    /// Returns the human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedToken { expected, found, .. } => {
                format!("Expected {expected}, found {found}")
            },
            Self::UnexpectedEndOfInput { .. } => "Unexpected end of input".to_string(),
            Self::TrailingInput { found, .. } => {
                format!("Unexpected {found} after the end of the program")
            },
        }
    }

    /// Renders the full diagnostic, including the offending source line with
    /// a caret underline.
    #[must_use]
    pub fn report(&self, file_name: &str, source: &str) -> String {
        render("SyntaxError", &self.message(), self.span(), file_name, source)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Error on line {}: {}.",
               self.span().start.line,
               self.message())
    }
}

impl std::error::Error for ParseError {}
