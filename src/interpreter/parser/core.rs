use std::iter::Peekable;

use crate::{
    ast::{Body, Expr, IfCase, Statement},
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token},
        parser::{
            binary::parse_logical,
            block::parse_body,
            statement::parse_statement,
            utils::{expect, parse_identifier},
        },
    },
    span::Span,
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program from a token stream.
///
/// A program is zero or more statements separated by one or more statement
/// separators (newline or `;`), with optional leading and trailing
/// separators, terminated by the EOF token. No partial tree is ever
/// produced; the first error aborts parsing.
///
/// # Parameters
/// - `tokens`: The spanned tokens produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The program's statements in source order.
///
/// # Errors
/// Returns a `ParseError` when the tokens do not form a valid program.
pub fn parse(tokens: &[SpannedToken]) -> ParseResult<Vec<Statement>> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        while let Some((Token::Newline, _)) = iter.peek() {
            iter.next();
        }

        match iter.peek() {
            Some((Token::Eof, _)) | None => break,
            _ => {},
        }

        statements.push(parse_statement(&mut iter)?);

        match iter.peek() {
            Some((Token::Newline | Token::Eof, _)) | None => {},
            Some((token, span)) => {
                return Err(ParseError::UnexpectedToken { expected:
                                                             "';' or a new line".to_string(),
                                                         found: token.to_string(),
                                                         span: *span, });
            },
        }
    }

    // A stray NUL in the input lexes as an EOF token; make sure the one we
    // stopped at is the final one.
    iter.next();
    if let Some((token, span)) = iter.next() {
        return Err(ParseError::TrailingInput { found: token.to_string(),
                                               span:  *span, });
    }

    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. A `var` binding is the
/// lowest-precedence form and is right-associative over the whole expression
/// to its right; everything else starts at the logical-connective level and
/// descends through the precedence hierarchy.
///
/// Grammar:
/// ```text
///     expression := "var" IDENTIFIER "=" expression
///                 | logical
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    if let Some((Token::Var, span)) = tokens.peek() {
        let var_span = *span;
        tokens.next();

        let name = parse_identifier(tokens)?;
        expect(tokens, &Token::Equals)?;
        let value = parse_expression(tokens)?;
        let span = var_span.to(value.span());

        return Ok(Expr::Assign { name,
                                 value: Box::new(value),
                                 span });
    }

    parse_logical(tokens)
}

/// Parses an `if` expression with optional `elif` chain and `else`.
///
/// Syntax:
/// ```text
///     if <condition> then <statement>
///     elif <condition> then <statement>
///     else <statement>
/// ```
///
/// Each body is either a single inline statement on the header's line or a
/// newline-introduced block. A block body is terminated by the `elif`,
/// `else` or `end` that follows it; the conditional as a whole needs a
/// closing `end` exactly when its final body is a block.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `if_span`: Span of the `if` token.
///
/// # Returns
/// An `Expr::If` node representing the full conditional expression.
///
/// # Errors
/// - `UnexpectedToken` if `then` or a required `end` is missing.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, if_span: Span) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let mut cases = Vec::new();
    let mut else_body = None;
    let mut closing = if_span;

    loop {
        let condition = parse_expression(tokens)?;
        expect(tokens, &Token::Then)?;

        let body = parse_body(tokens, &[Token::Elif, Token::Else, Token::End])?;
        let body_is_block = matches!(body, Body::Block(_));
        if let Some(span) = body.span() {
            closing = span;
        }
        cases.push(IfCase { condition, body });

        match tokens.peek() {
            Some((Token::Elif, _)) => {
                tokens.next();
            },
            Some((Token::Else, _)) => {
                tokens.next();

                let body = parse_body(tokens, &[Token::End])?;
                if let Some(span) = body.span() {
                    closing = span;
                }
                if matches!(body, Body::Block(_)) {
                    closing = expect(tokens, &Token::End)?;
                }
                else_body = Some(body);
                break;
            },
            Some((Token::End, _)) if body_is_block => {
                closing = expect(tokens, &Token::End)?;
                break;
            },
            Some((token, span)) if body_is_block => {
                return Err(ParseError::UnexpectedToken { expected:
                                                             "'elif', 'else' or 'end'".to_string(),
                                                         found: token.to_string(),
                                                         span: *span, });
            },
            _ => break,
        }
    }

    Ok(Expr::If { cases,
                  else_body,
                  span: if_span.to(closing) })
}
