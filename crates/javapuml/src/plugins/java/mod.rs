//! Java front-end
//!
//! Tokenizes Java source with chumsky and parses class and interface
//! declarations into the core declaration model.

mod lexer;
mod parser;

pub use lexer::{lexer, tokenize, Spanned, Token};
pub use parser::JavaParser;
