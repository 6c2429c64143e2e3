/// Lexing errors.
///
/// Defines the error type raised while turning source text into tokens,
/// covering unknown characters, unterminated strings, malformed numbers, and
/// related failures, each with the span of the offending text.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the error type raised while building the syntax tree from tokens.
/// Parse errors describe what the grammar expected and point at the token
/// that was found instead.
pub mod parse_error;
/// Diagnostic rendering.
///
/// Produces the multi-line report shared by all error families: the error
/// kind and message, the file and line, and the offending source line with a
/// caret underline.
pub mod report;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include things like division by zero, type mismatches, undefined
/// names, and control-flow signals escaping their construct.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

use crate::span::Span;

/// Any failure the pipeline can produce, one variant per phase.
///
/// The public entry points return this type so callers can handle all three
/// families uniformly while still being able to match on the phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Tokenization failed.
    Lex(LexError),
    /// The token stream did not form a valid program.
    Parse(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl Error {
    /// Gets the source span the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(error) => error.span,
            Self::Parse(error) => error.span(),
            Self::Runtime(error) => error.span(),
        }
    }

    /// Renders the full diagnostic, including the offending source line with
    /// a caret underline.
    #[must_use]
    pub fn report(&self, file_name: &str, source: &str) -> String {
        match self {
            Self::Lex(error) => error.report(file_name, source),
            Self::Parse(error) => error.report(file_name, source),
            Self::Runtime(error) => error.report(file_name, source),
        }
    }
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(error) => error.fmt(f),
            Self::Parse(error) => error.fmt(f),
            Self::Runtime(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
