//! Lexical analysis: source text to an ordered token sequence. Parentheses
//! are always single tokens, `;` comments run to end-of-line, and any other
//! maximal run of non-whitespace characters is one word. Tokenizing is total:
//! every input, including the empty string, yields a (possibly empty) token
//! sequence and never an error.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace1},
    combinator::{map, value},
    multi::many0,
    sequence::{pair, preceded},
};

/// One lexical token. Words keep their text; classification into atoms
/// happens later (see `ast::token_to_atom`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    Word(String),
}

/// Word characters are everything that does not separate or structure:
/// not whitespace, not a parenthesis, not a comment marker.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != ';'
}

/// Skip any run of whitespace and `;` line comments. Matching nothing is
/// fine, so this parser never fails.
fn spacing(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), pair(char(';'), take_till(|c| c == '\n'))),
        ))),
    )
    .parse(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::OpenParen, char('(')),
        value(Token::CloseParen, char(')')),
        map(take_while1(is_word_char), |word: &str| {
            Token::Word(word.to_owned())
        }),
    ))
    .parse(input)
}

/// Split source text into tokens.
///
/// A word already in progress ends at a `;`, so `ab;cd` lexes as the single
/// word `ab` with the rest of the line discarded.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;
    // The only way `token` can fail after `spacing` is end of input, since
    // every character class is covered by one of its alternatives.
    while let Ok((after, tok)) = preceded(spacing, token).parse(rest) {
        tokens.push(tok);
        rest = after;
    }
    tokens
}
