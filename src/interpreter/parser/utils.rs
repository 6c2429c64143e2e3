use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token},
        parser::core::ParseResult,
    },
    span::Span,
};

/// Consumes the next token, which must equal `expected`.
///
/// Returns the span of the consumed token so callers can extend the span of
/// the construct they are building.
///
/// # Errors
/// Returns a `ParseError` naming `expected` when the next token differs.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Span>
    where I: Iterator<Item = &'a SpannedToken>
{
    match tokens.next() {
        Some((token, span)) if token == expected => Ok(*span),
        Some((token, span)) => {
            Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                              found:    token.to_string(),
                                              span:     *span, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, call argument lists and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either a comma to continue the list or the specified closing
/// token to end it. An immediately encountered closing token produces an
/// empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// The parsed items together with the span of the consumed closing token.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or the closing token is
/// missing.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<(Vec<T>, Span)>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let mut items = Vec::new();
    if let Some((token, span)) = tokens.peek()
       && token == closing
    {
        let close = *span;
        tokens.next();

        return Ok((items, close));
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, span)) if token == closing => {
                let close = *span;
                tokens.next();
                return Ok((items, close));
            },
            Some((token, span)) => {
                return Err(ParseError::UnexpectedToken { expected: format!("',' or {closing}"),
                                                         found:    token.to_string(),
                                                         span:     *span, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
        }
    }
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`. Reserved words have their own
/// token kinds, so they can never be parsed as a name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a SpannedToken>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, span)) => {
            Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                              found:    token.to_string(),
                                              span:     *span, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
    }
}
