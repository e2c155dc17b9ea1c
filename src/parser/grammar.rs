//! Recursive-descent parser for placeholder nodes
//!
//! A placeholder is `@` followed by name characters (letters, or digits
//! once at least one prior name character established letter mode),
//! optionally containing further nested placeholders, terminated either
//! explicitly by `_` (consumed) or implicitly by whitespace, an
//! unrecognized character, or end of input (not consumed).

use tracing::trace;

use crate::error::ParseError;
use crate::parser::lexer::{lex, KindSet, Token, TokenKind};
use crate::template::{MultiTemplate, Node, Template};
use crate::text::Text;

/// Token stream plus cursor for one parse run.
pub struct ParseState {
    tokens: Vec<Token>,
    cursor: usize,
}

impl ParseState {
    pub fn new(source: &str) -> Self {
        ParseState {
            tokens: lex(source),
            cursor: 0,
        }
    }

    fn token_text(&self) -> String {
        self.tokens.iter().map(|t| t.ch).collect()
    }

    fn next_token(&self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(&token) => token,
            None => Token {
                kind: TokenKind::Eof,
                ch: '\0',
                pos: self.tokens.last().map_or(0, |t| t.pos),
            },
        }
    }

    /// Position of the next token past the cursor matching any of `kinds`.
    fn peek_next(&self, kinds: impl Into<KindSet>) -> Option<usize> {
        let kinds = kinds.into();
        if self.cursor + 1 >= self.tokens.len() {
            return None;
        }
        self.tokens[self.cursor + 1..]
            .iter()
            .position(|t| kinds.contains(t.kind))
            .map(|n| self.cursor + 1 + n)
    }

    /// Parses one placeholder rooted at `from` (which must hold `@`).
    ///
    /// Returns the node and the position parsing stopped at. On failure
    /// the cursor is left wherever the attempt abandoned it; callers
    /// decide whether to resume past it.
    pub fn parse(&mut self, from: usize) -> Result<(Node, usize), ParseError> {
        self.parse_at(from, None)
            .map(|(node, next, _)| (node, next))
    }

    /// `parent_start` is the absolute start of the enclosing placeholder,
    /// `None` at top level. The third result is the subtree's count of
    /// inferred terminators, which a top-level caller's covered range
    /// must not include.
    fn parse_at(
        &mut self,
        from: usize,
        parent_start: Option<usize>,
    ) -> Result<(Node, usize, usize), ParseError> {
        if from >= self.tokens.len() || self.next_token().kind != TokenKind::Alpha {
            return Err(ParseError::MissingSigil);
        }

        let nested = parent_start.is_some();
        let mut node = Node::at(from - parent_start.unwrap_or(0));

        // an `@` must be immediately followed by `@`, `_`, or a letter
        match self.peek_next(TokenKind::Alpha | TokenKind::Omega | TokenKind::Letter) {
            Some(index) if index == from + 1 => self.cursor = index,
            _ => {
                return Err(ParseError::Incomplete {
                    input: self.token_text(),
                    at: from,
                })
            }
        }
        node.push(super::ALPHA);
        let mut valid = 1usize;
        let mut phantoms = 0usize;

        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::Eof => {
                    node.close(false, nested);
                    phantoms += 1;
                    return Ok((node, token.pos + 1, phantoms));
                }

                TokenKind::Alpha => match self.parse_at(self.cursor, Some(from)) {
                    Ok((child, next, child_phantoms)) => {
                        node.absorb(&child, if nested { 0 } else { child_phantoms });
                        phantoms += child_phantoms;
                        node.children.push(child);
                        self.cursor = next;
                    }
                    Err(err) => {
                        if valid < 2 {
                            return Err(err);
                        }
                        node.close(false, nested);
                        phantoms += 1;
                        return Ok((node, from + valid, phantoms));
                    }
                },

                TokenKind::Omega => {
                    node.close(true, nested);
                    return Ok((node, token.pos + 1, phantoms));
                }

                TokenKind::Space | TokenKind::Other => {
                    node.close(false, nested);
                    phantoms += 1;
                    return Ok((node, token.pos, phantoms));
                }

                TokenKind::Digit if valid < 2 => {
                    return Err(ParseError::Incomplete {
                        input: self.token_text(),
                        at: from,
                    });
                }

                TokenKind::Digit | TokenKind::Letter => {
                    node.push(token.ch);
                    valid += 1;
                    self.cursor += 1;
                }
            }
        }
    }
}

/// Parses `source` into a [`Template`], annotating every position where a
/// valid placeholder starts. An `@` that does not begin a valid
/// placeholder stays ordinary literal text.
pub fn parse_template(source: &str) -> Template {
    let mut state = ParseState::new(source);
    let mut template = Template {
        text: Text::from(source),
        children: Vec::new(),
    };

    let mut var_start = 0;
    loop {
        if state.next_token().kind != TokenKind::Alpha {
            match state.peek_next(TokenKind::Alpha) {
                Some(next) => var_start = next,
                None => break,
            }
        }
        state.cursor = var_start;
        match state.parse_at(var_start, None) {
            Ok((node, next, _)) => {
                template.children.push(node);
                state.cursor = next;
                var_start = next;
            }
            Err(_) => state.cursor += 1,
        }
    }

    trace!(template = %template.text, placeholders = template.children.len(), "parsed template");
    template
}

/// Parses a collection of named templates that may reference each other.
pub fn parse_templates<K, V, I>(templates: I) -> MultiTemplate
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    MultiTemplate {
        templates: templates
            .into_iter()
            .map(|(name, text)| (name.into(), parse_template(text.as_ref())))
            .collect(),
    }
}

/// Parses a single placeholder from the start of `source`, returning the
/// node and the unparsed remainder. On error nothing is consumed: the
/// remainder is the caller's input.
pub fn parse_node(source: &str) -> Result<(Node, String), ParseError> {
    if !source.starts_with(super::ALPHA) {
        return Err(ParseError::MissingSigil);
    }

    let mut state = ParseState::new(source);
    match state.parse_at(0, None) {
        Ok((node, next, _)) => {
            let rest: String = source.chars().skip(next).collect();
            Ok((node, rest))
        }
        Err(err) => Err(ParseError::InvalidNode {
            input: source.to_string(),
            source: Box::new(err),
        }),
    }
}
