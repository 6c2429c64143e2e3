use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Body, Expr, LiteralValue, Statement, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token},
        parser::{
            block::parse_body,
            core::{ParseResult, parse_expression, parse_if},
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
    span::Span,
};

/// Parses a factor expression.
///
/// Supports the prefix sign operators `+` and `-`, which are
/// right-associative: `--x` is parsed as `-(-x)`. If no sign is present, the
/// function delegates to [`parse_power`].
///
/// Grammar:
/// ```text
///     factor := ("+" | "-") factor
///             | power
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a power expression.
pub(crate) fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    if let Some((Token::Minus, span)) = tokens.peek() {
        let sign_span = *span;
        tokens.next();
        let expr = parse_factor(tokens)?;
        let span = sign_span.to(expr.span());
        Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                           expr: Box::new(expr),
                           span })
    } else if let Some((Token::Plus, span)) = tokens.peek() {
        let sign_span = *span;
        tokens.next();
        let expr = parse_factor(tokens)?;
        let span = sign_span.to(expr.span());
        Ok(Expr::UnaryOp { op: UnaryOperator::Plus,
                           expr: Box::new(expr),
                           span })
    } else {
        parse_power(tokens)
    }
}

/// Parses exponentiation expressions.
///
/// The right operand re-enters the factor level, which makes `^`
/// right-associative: `2 ^ 3 ^ 2` parses as `2 ^ (3 ^ 2)`.
///
/// Grammar: `power := call ("^" factor)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub(crate) fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let mut left = parse_call(tokens)?;
    while let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let right = parse_factor(tokens)?;
        let span = left.span().to(right.span());
        left = Expr::BinaryOp { left: Box::new(left),
                                op: BinaryOperator::Pow,
                                right: Box::new(right),
                                span };
    }
    Ok(left)
}

/// Parses an atom with at most one call suffix.
///
/// A parenthesized argument list directly after an atom turns it into a
/// call. Call suffixes do not chain; `f(1)(2)` is rejected by the grammar
/// because the second `(` follows a complete call, not an atom.
///
/// Grammar: `call := atom ("(" (expression ("," expression)*)? ")")?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The atom itself, or an [`Expr::Call`] wrapping it.
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let expr = parse_atom(tokens)?;

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let (arguments, closing) = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        let span = expr.span().to(closing);

        return Ok(Expr::Call { callee: Box::new(expr),
                               arguments,
                               span });
    }

    Ok(expr)
}

/// Parses an atomic expression.
///
/// Atoms form the base of the expression grammar and include:
/// - numeric and string literals
/// - identifiers
/// - parenthesized expressions
/// - list literals (`[ ... ]`)
/// - `if` expressions
/// - `for` and `while` loops
/// - `func` definitions
///
/// This function does not handle unary operators or call suffixes. It
/// dispatches to specialized parsing functions depending on the leading
/// token.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an atom.
///
/// # Returns
/// The parsed atomic [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { span: Span::default() })?;

    match peeked {
        (Token::Integer(..) | Token::Float(..) | Token::Str(..), _) => parse_literal(tokens),
        (Token::Identifier(_), _) => parse_variable(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LSquare, _) => parse_list_literal(tokens),
        (Token::If, _) => parse_if_expression(tokens),
        (Token::For, _) => parse_for(tokens),
        (Token::While, _) => parse_while(tokens),
        (Token::Func, _) => parse_func_def(tokens),
        (token, span) => {
            Err(ParseError::UnexpectedToken { expected: "an expression".to_string(),
                                              found:    token.to_string(),
                                              span:     *span, })
        },
    }
}

/// Parses a numeric or string literal.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken>
{
    match tokens.next() {
        Some((Token::Integer(value), span)) => {
            Ok(Expr::Literal { value: LiteralValue::Integer(*value),
                               span:  *span, })
        },
        Some((Token::Float(value), span)) => {
            Ok(Expr::Literal { value: LiteralValue::Float(*value),
                               span:  *span, })
        },
        Some((Token::Str(text), span)) => {
            Ok(Expr::Literal { value: LiteralValue::Str(text.clone()),
                               span:  *span, })
        },
        _ => unreachable!(),
    }
}

/// Parses a variable reference.
fn parse_variable<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken>
{
    match tokens.next() {
        Some((Token::Identifier(name), span)) => {
            Ok(Expr::Variable { name: name.clone(),
                                span: *span, })
        },
        _ => unreachable!(),
    }
}

/// Parses a parenthesized expression.
///
/// The inner expression is returned as-is; no wrapper node is built, so the
/// node's span covers the expression without the parentheses.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    tokens.next();
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    Ok(expr)
}

/// Parses a list literal of the form `[expr1, expr2, ..., exprN]`.
///
/// An empty list `[]` is accepted.
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let Some((_, open)) = tokens.next() else {
        unreachable!()
    };
    let (elements, closing) = parse_comma_separated(tokens, parse_expression, &Token::RSquare)?;

    Ok(Expr::ListLiteral { elements,
                           span: open.to(closing) })
}

/// Parses an `if` expression.
///
/// This consumes the `if` keyword and delegates to [`parse_if`], which
/// handles the full grammar including `elif` chains and `else`.
fn parse_if_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let Some((_, span)) = tokens.next() else {
        unreachable!()
    };
    parse_if(tokens, *span)
}

/// Parses a `for` expression.
///
/// Supported forms:
///
/// ```text
///     for i = start to end do <statement>
///     for i = start to end step s do <statement>
///     for i = start to end do
///         <statements>
///     end
/// ```
///
/// The upper bound is exclusive; a missing `step` defaults to `1` at
/// evaluation time. The body after `do` is a single inline statement or a
/// newline-introduced block closed by `end`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `for`.
///
/// # Returns
/// An [`Expr::For`] node.
///
/// # Errors
/// Returns a `ParseError` if the loop variable, `=`, `to`, `do`, or a
/// required `end` is missing, or any sub-expression fails to parse.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let Some((_, for_span)) = tokens.next() else {
        unreachable!()
    };
    let for_span = *for_span;

    let var = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals)?;
    let start = parse_expression(tokens)?;
    expect(tokens, &Token::To)?;
    let end = parse_expression(tokens)?;

    let step = if let Some((Token::Step, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_expression(tokens)?))
    } else {
        None
    };

    expect(tokens, &Token::Do)?;
    let body = parse_body(tokens, &[Token::End])?;
    let closing = finish_body(tokens, &body, for_span)?;

    Ok(Expr::For { var,
                   start: Box::new(start),
                   end: Box::new(end),
                   step,
                   body,
                   span: for_span.to(closing) })
}

/// Parses a `while` expression.
///
/// Supported forms:
///
/// ```text
///     while condition do <statement>
///     while condition do
///         <statements>
///     end
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `while`.
///
/// # Returns
/// An [`Expr::While`] node.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let Some((_, while_span)) = tokens.next() else {
        unreachable!()
    };
    let while_span = *while_span;

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Do)?;
    let body = parse_body(tokens, &[Token::End])?;
    let closing = finish_body(tokens, &body, while_span)?;

    Ok(Expr::While { condition: Box::new(condition),
                     body,
                     span: while_span.to(closing) })
}

/// Parses a function definition.
///
/// Supported forms:
///
/// ```text
///     func name(a, b) -> expression
///     func (a, b) -> expression
///     func name(a, b)
///         <statements>
///     end
/// ```
///
/// The name is optional; a named definition is additionally bound in the
/// scope it appears in. The `->` form has an expression body and yields its
/// value on call; the block form runs its statements and yields `Null`
/// unless a `return` fires.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `func`.
///
/// # Returns
/// An [`Expr::FuncDef`] node.
///
/// # Errors
/// Returns a `ParseError` if the parameter list is malformed or the body is
/// introduced by neither `->` nor a new line.
fn parse_func_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    let Some((_, func_span)) = tokens.next() else {
        unreachable!()
    };
    let func_span = *func_span;

    let name = if let Some((Token::Identifier(_), _)) = tokens.peek() {
        Some(parse_identifier(tokens)?)
    } else {
        None
    };

    expect(tokens, &Token::LParen)?;
    let (params, _) = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;

    let (body, closing) = match tokens.peek() {
        Some((Token::Arrow, _)) => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            let closing = expr.span();
            (Body::Inline(Box::new(Statement::Expression { expr })), closing)
        },
        Some((Token::Newline, _)) => {
            let body = parse_body(tokens, &[Token::End])?;
            let closing = expect(tokens, &Token::End)?;
            (body, closing)
        },
        Some((token, span)) => {
            return Err(ParseError::UnexpectedToken { expected:
                                                         "'->' or a new line".to_string(),
                                                     found: token.to_string(),
                                                     span: *span, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { span: Span::default() }),
    };

    Ok(Expr::FuncDef { name,
                       params,
                       body: std::rc::Rc::new(body),
                       span: func_span.to(closing) })
}

/// Consumes the `end` that closes a block body and returns its span.
///
/// Inline bodies need no `end`; their own span closes the construct.
fn finish_body<'a, I>(tokens: &mut Peekable<I>, body: &Body, header: Span) -> ParseResult<Span>
    where I: Iterator<Item = &'a SpannedToken>
{
    match body {
        Body::Block(_) => expect(tokens, &Token::End),
        Body::Inline(_) => Ok(body.span().unwrap_or(header)),
    }
}
