//! Syntactic analysis: token sequence to [`Expression`] tree. The grammar is
//! tiny: a form is `(` followed by a mandatory head word and any number of
//! child forms, closed by `)`; a lone word is a leaf. The top-level entry
//! [`parse_program`] additionally enforces the program shape: the token
//! sequence must begin with `(`, end with `)`, and contain exactly one
//! expression. Descent recurses with the input, so nesting depth is bounded
//! only by the call stack.

use std::iter::Peekable;
use std::slice::Iter;

use crate::SemanticError;
use crate::ast::{Expression, token_to_atom};
use crate::lexer::{Token, tokenize};

/// Parse one complete program.
///
/// This is the `Result` form underneath `Interpreter::parse`; callers who
/// want the failure message use it directly.
pub fn parse_program(input: &str) -> Result<Expression, SemanticError> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(SemanticError::new("Empty program"));
    }
    // A bare atom is not a program.
    if !matches!(tokens.first(), Some(Token::OpenParen))
        || !matches!(tokens.last(), Some(Token::CloseParen))
    {
        return Err(SemanticError::new(
            "A program is a single parenthesized expression",
        ));
    }

    let mut current = tokens.iter().peekable();
    let expression = parse_expression(&mut current)?;
    if current.next().is_some() {
        return Err(SemanticError::new("Unexpected tokens after expression"));
    }
    Ok(expression)
}

fn parse_expression(tokens: &mut Peekable<Iter<'_, Token>>) -> Result<Expression, SemanticError> {
    match tokens.next() {
        None => Err(SemanticError::new("Unexpected end of input")),
        Some(Token::CloseParen) => Err(SemanticError::new("Unexpected ')'")),
        Some(Token::Word(word)) => Ok(Expression::from(token_to_atom(word)?)),
        Some(Token::OpenParen) => {
            // The head is mandatory; there are no empty-headed forms.
            let head = match tokens.next() {
                Some(Token::Word(word)) => token_to_atom(word)?,
                Some(Token::OpenParen | Token::CloseParen) => {
                    return Err(SemanticError::new("Expected an atom after '('"));
                }
                None => return Err(SemanticError::new("Unexpected end of input after '('")),
            };

            let mut expression = Expression::from(head);
            loop {
                match tokens.peek() {
                    Some(Token::CloseParen) => break,
                    None => return Err(SemanticError::new("Expected ')'")),
                    Some(_) => expression.tail.push(parse_expression(tokens)?),
                }
            }
            tokens.next(); // the ')'
            Ok(expression)
        }
    }
}
