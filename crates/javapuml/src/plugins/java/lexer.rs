//! Java lexer using chumsky
//!
//! Splits Java source into identifiers, literals and single-character
//! punctuation, dropping whitespace and comments. Multi-character operators
//! are left as runs of punctuation so that `>>` closes two type argument
//! lists.

use std::fmt;

use chumsky::prelude::*;

use crate::core::DiagramError;

/// A Java token borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// Identifiers and keywords
    Ident(&'src str),
    /// String, text block, character and numeric literals, verbatim
    Literal(&'src str),
    Punct(char),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Literal(s) => write!(f, "'{}'", s),
            Token::Punct(c) => write!(f, "'{}'", c),
        }
    }
}

pub type Spanned<'src> = (Token<'src>, SimpleSpan);

pub fn lexer<'src>(
) -> impl Parser<'src, &'src str, Vec<Spanned<'src>>, extra::Err<Rich<'src, char>>> {
    let line_comment = just("//")
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();

    let block_comment = just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored();

    let whitespace = any().filter(|c: &char| c.is_whitespace()).ignored();

    let trivia = choice((line_comment, block_comment, whitespace)).repeated();

    let escape = just('\\').then(any()).ignored();

    let text_block = just("\"\"\"")
        .then(
            escape
                .clone()
                .or(any().and_is(just("\"\"\"").not()).ignored())
                .repeated(),
        )
        .then(just("\"\"\""))
        .to_slice()
        .map(Token::Literal);

    let string = just('"')
        .then(escape.clone().or(none_of("\\\"\n").ignored()).repeated())
        .then(just('"'))
        .to_slice()
        .map(Token::Literal);

    let character = just('\'')
        .then(escape.or(none_of("\\'\n").ignored()).repeated())
        .then(just('\''))
        .to_slice()
        .map(Token::Literal);

    let number = any()
        .filter(|c: &char| c.is_ascii_digit())
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                .repeated(),
        )
        .to_slice()
        .map(Token::Literal);

    let identifier = any()
        .filter(|c: &char| c.is_alphabetic() || *c == '_' || *c == '$')
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '$')
                .repeated(),
        )
        .to_slice()
        .map(Token::Ident);

    let punct = any()
        .filter(|c: &char| !c.is_whitespace())
        .map(Token::Punct);

    // Order matters: text blocks before strings, literals before identifiers.
    let token = choice((text_block, string, character, number, identifier, punct));

    trivia
        .clone()
        .ignore_then(token.map_with(|tok, extra| (tok, extra.span())))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(trivia)
        .then_ignore(end())
}

/// Tokenize `source`, mapping the first lexer error to a located parse error
pub fn tokenize(source: &str) -> Result<Vec<Spanned<'_>>, DiagramError> {
    lexer().parse(source).into_result().map_err(|errors| {
        match errors.into_iter().next() {
            Some(error) => DiagramError::parse_error_at(error.to_string(), source, error.span().start),
            None => DiagramError::parse_error_at("invalid input", source, 0),
        }
    })
}
