//! Compile-once, render-many HTML string templates
//!
//! Templates are plain text with `{path}` placeholders. Substituted values are
//! HTML-escaped unless the placeholder says `{path | safe}`. Literal text is copied
//! as written, so braces that do not form a placeholder (inline scripts, CSS) are
//! left alone.
//!
//! # Example
//!
//! ```rust
//! use dry_template::{compile, render};
//! use serde_json::json;
//!
//! let template = compile("<h1>{blog.name}</h1>{blog.content | safe}");
//! let model = json!({"blog": {"name": "Tom & Jerry", "content": "<p>chase</p>"}});
//! assert_eq!(render(&template, &model), "<h1>Tom &amp; Jerry</h1><p>chase</p>");
//! ```
//!
//! # Module Structure
//!
//! - `escape.rs`: HTML escaping and literal quoting
//! - `expression.rs`: Placeholder scanning
//! - `path.rs`: Placeholder path parsing
//! - `segment.rs`: Compiled template segments
//! - `model.rs`: The `Model` trait and values
//! - `template.rs`: Compilation and rendering
//! - `set.rs`: Named template collections loaded from disk
//! - `error.rs`: Error types

extern crate self as dry_template;

pub mod error;
pub mod escape;
pub mod expression;
pub mod model;
pub mod path;
pub mod segment;
pub mod set;
pub mod template;

pub use dry_template_macros::Model;
pub use dry_template_macros::dry_template_directory as directory;
pub use dry_template_macros::dry_template_file as file;
pub use dry_template_macros::dry_template_str as str;

pub use error::{Error, Result};
pub use escape::{escape, quote_literal};
pub use model::{ToValue, Value};
pub use path::{Path, Step};
pub use segment::Segment;
pub use set::TemplateSet;
pub use template::{Missing, Options, Template};
pub use model::Model;

/// Compiles template text into a reusable [`Template`]
pub fn compile(src: &str) -> Template {
    Template::compile(src)
}

/// Renders a compiled template, leaving unresolved fields empty
pub fn render(template: &Template, model: &dyn Model) -> String {
    template.render(model)
}
