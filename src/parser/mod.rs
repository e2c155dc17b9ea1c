//! Lexer and recursive-descent parser for placeholder text

mod grammar;
mod lexer;

pub use grammar::{parse_node, parse_template, parse_templates, ParseState};
pub use lexer::{classify, lex, KindSet, Token, TokenKind, ALPHA, OMEGA};
