//! Tokens of the bracketed tree notation
//!
//! Whitespace separates atoms and is otherwise insignificant. Anything that is
//! not a parenthesis or whitespace is part of an atom, so labels like
//! `NS-elaboration` or leaves like `1` lex as single tokens.

use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum BracketToken {
    #[token("(")]
    Open,

    #[token(")")]
    Close,

    #[regex(r"[^ \t\r\n\f()]+", |lex| lex.slice().to_string())]
    Atom(String),
}

impl fmt::Display for BracketToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketToken::Open => write!(f, "("),
            BracketToken::Close => write!(f, ")"),
            BracketToken::Atom(text) => write!(f, "{}", text),
        }
    }
}

/// Tokenize bracketed text, returning the byte offset of the first
/// unrecognized input on failure
pub fn tokenize(source: &str) -> Result<Vec<BracketToken>, usize> {
    let mut lexer = BracketToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(lexer.span().start),
        }
    }

    Ok(tokens)
}
