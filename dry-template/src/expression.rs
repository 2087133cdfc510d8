//! Placeholder scanning
//!
//! Templates mark substitution sites with single braces:
//! - Escaped substitution: `{name}`, `{ user.name }`
//! - Raw substitution: `{body | safe}`
//!
//! Anything else, including a lone `{`, `{}` or `{a b}`, is not a placeholder and stays
//! part of the surrounding text.
//!
//! # Examples
//!
//! ```rust
//! use dry_template::expression::Expression;
//!
//! let expr = Expression::from("Hello {name}!").unwrap();
//! assert_eq!(expr.prefix, "Hello ");
//! assert_eq!(expr.path, "name");
//! assert!(!expr.safe);
//! assert_eq!(expr.postfix, "!");
//! ```

use std::{fmt::Display, sync::LazyLock};

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[ \t]*([A-Za-z0-9_.()]+)[ \t]*(\|[ \t]*safe)?[ \t]*\}").unwrap()
});

/// A placeholder found in template text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression<'a> {
    /// Text before the placeholder
    pub prefix: &'a str,
    /// The field path between the braces
    pub path: &'a str,
    /// Whether the placeholder carried `| safe`
    pub safe: bool,
    /// Text after the placeholder
    pub postfix: &'a str,
    /// The complete placeholder including braces
    pub raw: &'a str,
}

impl<'a> Expression<'a> {
    /// Finds the first placeholder in `src`
    pub fn from(src: &'a str) -> Option<Self> {
        let captures = PLACEHOLDER.captures(src)?;
        let whole = captures.get(0)?;
        Some(Self {
            prefix: &src[..whole.start()],
            path: captures.get(1)?.as_str(),
            safe: captures.get(2).is_some(),
            postfix: &src[whole.end()..],
            raw: whole.as_str(),
        })
    }

    /// Finds the placeholder following this one
    pub fn next(&self) -> Option<Self> {
        Self::from(self.postfix)
    }
}

impl<'a> Display for Expression<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}
