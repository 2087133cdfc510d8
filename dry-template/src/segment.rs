//! Compiled template segments

use std::fmt::Display;

use crate::{escape::quote_literal, path::Path};

/// A compiled unit of a template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text emitted verbatim
    Literal(String),
    /// A field resolved against the model at render time
    Field {
        path: Path,
        /// HTML-escape the value, false when the placeholder carried `| safe`
        escape: bool,
    },
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }
}

/// Literals display as quoted strings, fields as their placeholder
impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(&quote_literal(text)),
            Segment::Field { path, escape: true } => write!(f, "{{{}}}", path),
            Segment::Field { path, escape: false } => write!(f, "{{{} | safe}}", path),
        }
    }
}
