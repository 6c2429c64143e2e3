use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::{SpannedToken, Token},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - `return` with an optional value expression,
/// - `continue`,
/// - `break`,
/// - an expression used as a statement.
///
/// The three keyword forms are meaningful only inside the construct that
/// catches them; the parser accepts them anywhere and leaves "outside of a
/// loop"/"outside of a function" to the evaluator, which knows the dynamic
/// context.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Span)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a SpannedToken> + Clone
{
    match tokens.peek() {
        Some((Token::Return, span)) => {
            let mut span = *span;
            tokens.next();

            let value = match tokens.peek() {
                Some((Token::Newline
                      | Token::Eof
                      | Token::End
                      | Token::Elif
                      | Token::Else,
                      _))
                | None => None,
                _ => Some(parse_expression(tokens)?),
            };

            if let Some(expr) = &value {
                span = span.to(expr.span());
            }

            Ok(Statement::Return { value, span })
        },
        Some((Token::Continue, span)) => {
            let span = *span;
            tokens.next();
            Ok(Statement::Continue { span })
        },
        Some((Token::Break, span)) => {
            let span = *span;
            tokens.next();
            Ok(Statement::Break { span })
        },
        _ => Ok(Statement::Expression { expr: parse_expression(tokens)? }),
    }
}
