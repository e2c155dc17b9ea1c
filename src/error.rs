//! Error types for parsing and validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Recoverable parse failures.
///
/// Template-level parsing never surfaces these: an `@` that fails to start
/// a valid placeholder is kept as literal text. [`crate::parse_node`]
/// returns them to the caller instead, with the whole input unconsumed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input does not begin with the placeholder-start character.
    #[error("node must start with '@'")]
    MissingSigil,

    /// An `@` was found but no valid placeholder follows it.
    #[error("could not complete variable from: '{input}'")]
    Incomplete { input: String, at: usize },

    /// Wrapper used by [`crate::parse_node`] for inputs that start with
    /// `@` but do not form a node.
    #[error("'{input}' does not begin a valid node")]
    InvalidNode {
        input: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Character position the error points at.
    pub fn position(&self) -> usize {
        match self {
            ParseError::MissingSigil => 0,
            ParseError::Incomplete { at, .. } => *at,
            ParseError::InvalidNode { source, .. } => source.position(),
        }
    }

    /// Format the error with source context using ariadne.
    pub fn format(&self, source: &str, filename: &str) -> String {
        // ariadne spans are byte ranges; error positions count characters.
        let start = source
            .char_indices()
            .nth(self.position())
            .map(|(byte, _)| byte)
            .unwrap_or(source.len());
        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |ch| start + ch.len_utf8());
        let message = self.to_string();

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, start)
            .with_message(&message)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}
