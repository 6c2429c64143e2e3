use std::iter::Peekable;

use crate::{
    ast::{Body, Statement},
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token},
        parser::{core::ParseResult, statement::parse_statement},
    },
    span::Span,
};

/// Parses the body of an `if`, `for`, `while` or `func` construct.
///
/// A new line directly after the header keyword selects the block form: a
/// sequence of statements that runs until one of the `terminators` appears
/// at a statement boundary. The terminator itself is left in the stream for
/// the caller, which knows whether it continues the construct (`elif`,
/// `else`) or closes it (`end`). Anything other than a new line selects the
/// inline form, a single statement.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the header keyword.
/// - `terminators`: Tokens that end a block body.
///
/// # Returns
/// The parsed [`Body`], recording which surface form was used.
///
/// # Errors
/// Returns a `ParseError` if a statement fails to parse, statements are not
/// separated, or the input ends before a terminator.
pub fn parse_body<'a, I>(tokens: &mut Peekable<I>, terminators: &[Token]) -> ParseResult<Body>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    if let Some((Token::Newline, _)) = tokens.peek() {
        tokens.next();
        Ok(Body::Block(parse_block_statements(tokens, terminators)?))
    } else {
        Ok(Body::Inline(Box::new(parse_statement(tokens)?)))
    }
}

/// Parses the statements of a block body up to a terminator.
///
/// Blank separator runs are skipped between statements; after every
/// statement the next token must be a separator or a terminator. The
/// terminator is not consumed.
fn parse_block_statements<'a, I>(tokens: &mut Peekable<I>,
                                 terminators: &[Token])
                                 -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let mut statements = Vec::new();

    loop {
        while let Some((Token::Newline, _)) = tokens.peek() {
            tokens.next();
        }

        match tokens.peek() {
            Some((token, _)) if terminators.contains(token) => break,
            Some((Token::Eof, span)) => {
                return Err(ParseError::UnexpectedEndOfInput { span: *span });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
            _ => {},
        }

        statements.push(parse_statement(tokens)?);

        match tokens.peek() {
            Some((Token::Newline, _)) => {},
            Some((token, _)) if terminators.contains(token) => {},
            Some((token, span)) => {
                return Err(ParseError::UnexpectedToken { expected:
                                                             "';' or a new line".to_string(),
                                                         found: token.to_string(),
                                                         span: *span, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
        }
    }

    Ok(statements)
}
