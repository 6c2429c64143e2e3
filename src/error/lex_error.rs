use crate::{
    error::report::render,
    span::Span,
};

/// Classifies a failure during tokenization.
///
/// The default variant is produced by the lexer for any input that matches no
/// token pattern; the remaining variants are raised by dedicated patterns for
/// the malformed inputs worth a precise message.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[default]
    UnknownCharacter,
    /// A string literal with no closing `"` before the end of input.
    UnterminatedString,
    /// A numeric literal containing more than one `.`.
    MalformedNumber,
    /// A `!` that is not the start of `!=`.
    LoneBang,
    /// An integer literal outside the 64-bit signed range.
    LiteralTooLarge,
}

impl LexErrorKind {
    /// Returns the human-readable description of the failure.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::UnknownCharacter => "Unexpected character",
            Self::UnterminatedString => "Unterminated string literal",
            Self::MalformedNumber => "A number may contain at most one '.'",
            Self::LoneBang => "Expected '=' after '!'",
            Self::LiteralTooLarge => "Integer literal is too large",
        }
    }
}

/// Represents a failure to turn source text into tokens.
///
/// Carries the kind of failure together with the source range of the
/// offending text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Source range of the offending text.
    pub span: Span,
}

impl LexError {
    /// Renders the full diagnostic, including the offending source line with
    /// a caret underline.
    #[must_use]
    pub fn report(&self, file_name: &str, source: &str) -> String {
        render("LexError", self.kind.message(), self.span, file_name, source)
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Error on line {}: {}.",
               self.span.start.line,
               self.kind.message())
    }
}

impl std::error::Error for LexError {}
