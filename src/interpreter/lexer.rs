use logos::Logos;

use crate::{
    error::{LexError, LexErrorKind},
    span::{Position, Span},
};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language. Reserved words
/// get their own variants; an identifier can therefore never collide with
/// one.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`, `.5` or `2.`.
    ///
    /// The extra patterns catch a second `.` inside a single numeric literal
    /// and reject it with a dedicated error instead of splitting it into two
    /// adjacent numbers.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    #[regex(r"\.[0-9]+", parse_float)]
    #[regex(r"[0-9]+\.[0-9]*\.[0-9.]*", malformed_number)]
    #[regex(r"\.[0-9]+\.[0-9.]*", malformed_number)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, with escape sequences already resolved.
    ///
    /// Recognized escapes are `\n`, `\t`, `\"` and `\\`; any other escaped
    /// character denotes itself. The second pattern catches a string that
    /// reaches the end of input without a closing `"`.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    #[regex(r#""([^"\\]|\\.)*"#, unterminated_string)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `fact`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `var`
    #[token("var")]
    Var,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `end`
    #[token("end")]
    End,
    /// `for`
    #[token("for")]
    For,
    /// `to`
    #[token("to")]
    To,
    /// `step`
    #[token("step")]
    Step,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `break`
    #[token("break")]
    Break,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LSquare,
    /// `]`
    #[token("]")]
    RSquare,
    /// `,`
    #[token(",")]
    Comma,
    /// `->`
    #[token("->")]
    Arrow,
    /// A `!` on its own is always a lex error; only `!=` is a token.
    #[token("!", lone_bang)]
    Bang,
    /// Statement separator: a literal newline or `;`.
    #[token("\n")]
    #[token(";")]
    Newline,
    /// End of input. Synthesized by [`tokenize`] after the last real token.
    #[token("\0")]
    Eof,
    /// `# Comments run to the end of the line.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Spaces, tabs and carriage returns carry no meaning.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// A token paired with the source range of its lexeme.
pub type SpannedToken = (Token, Span);

/// Converts a source text into a list of spanned tokens.
///
/// The returned list always ends with a single [`Token::Eof`] whose span is
/// the empty range at the end of input. Byte ranges reported by the lexer are
/// converted into line/column positions by walking the source exactly once.
///
/// # Errors
/// Returns a [`LexError`] with the span of the offending text when the input
/// contains a malformed token or a character that starts no token.
///
/// # Example
/// ```
/// use slate::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("1 + 2").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Integer(1), Token::Plus, Token::Integer(2), Token::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(cursor.position_at(range.start), cursor.position_at(range.end));

        match result {
            Ok(token) => tokens.push((token, span)),
            Err(kind) => return Err(LexError { kind, span }),
        }
    }

    let end = cursor.position_at(source.len());
    tokens.push((Token::Eof, Span::new(end, end)));

    Ok(tokens)
}

/// Translates monotonically increasing byte offsets into positions.
///
/// The lexer hands out byte ranges in source order, so a single forward walk
/// over the text suffices to recover line and column numbers.
struct Cursor<'source> {
    source:   &'source str,
    position: Position,
}

impl<'source> Cursor<'source> {
    const fn new(source: &'source str) -> Self {
        Self { source,
               position: Position::start(), }
    }

    /// Advances to `offset` and returns the position there.
    ///
    /// `offset` must not precede an offset this cursor has already visited.
    fn position_at(&mut self, offset: usize) -> Position {
        while self.position.offset < offset {
            let Some(character) = self.source[self.position.offset..].chars().next() else {
                break;
            };
            self.position.advance(character);
        }

        self.position
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(value) => return write!(f, "the number {value}"),
            Self::Integer(value) => return write!(f, "the number {value}"),
            Self::Str(_) => return write!(f, "a string literal"),
            Self::Identifier(name) => return write!(f, "'{name}'"),
            _ => {},
        }

        let text = match self {
            Self::Var => "'var'",
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::Not => "'not'",
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Elif => "'elif'",
            Self::Else => "'else'",
            Self::End => "'end'",
            Self::For => "'for'",
            Self::To => "'to'",
            Self::Step => "'step'",
            Self::While => "'while'",
            Self::Do => "'do'",
            Self::Func => "'func'",
            Self::Return => "'return'",
            Self::Continue => "'continue'",
            Self::Break => "'break'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Caret => "'^'",
            Self::Equals => "'='",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::LessEqual => "'<='",
            Self::GreaterEqual => "'>='",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LSquare => "'['",
            Self::RSquare => "']'",
            Self::Comma => "','",
            Self::Arrow => "'->'",
            Self::Bang => "'!'",
            Self::Newline => "a new line",
            Self::Eof => "end of input",
            Self::Comment | Self::Ignored => "nothing",
            Self::Float(_) | Self::Integer(_) | Self::Str(_) | Self::Identifier(_) => {
                unreachable!()
            },
        };
        write!(f, "{text}")
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// A run of digits that does not fit into an `i64` is rejected with a
/// dedicated error rather than being silently truncated.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::LiteralTooLarge)
}

/// Resolves the escape sequences of a string literal.
///
/// The surrounding quotes are stripped; `\n` and `\t` become their control
/// characters and any other escaped character denotes itself, which covers
/// `\"` and `\\`.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut text = String::with_capacity(inner.len());
    let mut characters = inner.chars();

    while let Some(character) = characters.next() {
        if character == '\\' {
            match characters.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some(other) => text.push(other),
                None => {},
            }
        } else {
            text.push(character);
        }
    }

    text
}

/// Rejects a numeric literal containing a second `.`.
fn malformed_number(_: &logos::Lexer<Token>) -> Result<f64, LexErrorKind> {
    Err(LexErrorKind::MalformedNumber)
}

/// Rejects a string literal that never closes.
fn unterminated_string(_: &logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

/// Rejects a `!` that is not part of `!=`.
fn lone_bang(_: &logos::Lexer<Token>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::LoneBang)
}
