//! Escaping helpers
//!
//! Two unrelated kinds of escaping live here:
//! - [`escape`] turns a substituted value into HTML-safe text.
//! - [`quote_literal`] renders literal template text as a quoted string constant,
//!   which is how compiled segments are displayed.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

static HTML: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[&"'<>]"#).unwrap());

static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new("[\\\\\"\n\r]").unwrap());

/// Escapes `&`, `"`, `'`, `<` and `>` as HTML entities.
///
/// Every occurrence is replaced in a single pass over the input, so an entity
/// produced for one character is never escaped again. Input without any of these
/// characters is returned borrowed.
///
/// ```rust
/// assert_eq!(dry_template::escape("a<b<c"), "a&lt;b&lt;c");
/// ```
pub fn escape(content: &str) -> Cow<'_, str> {
    HTML.replace_all(content, |captures: &Captures| match &captures[0] {
        "&" => "&amp;",
        "\"" => "&quot;",
        "'" => "&#39;",
        "<" => "&lt;",
        _ => "&gt;",
    })
}

/// Wraps literal text in double quotes, backslash-escaping `\`, `"` and line breaks.
pub fn quote_literal(content: &str) -> String {
    let body = QUOTED.replace_all(content, |captures: &Captures| match &captures[0] {
        "\n" => "\\n".to_string(),
        "\r" => "\\r".to_string(),
        other => format!("\\{}", other),
    });
    format!("\"{}\"", body)
}
