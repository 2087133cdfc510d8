//! Template compilation and rendering
//!
//! Compiling scans the template text once and produces an ordered list of
//! [`Segment`]s. Rendering walks those segments, copying literal text and
//! resolving each field against the model.
//!
//! # Examples
//!
//! ```rust
//! use dry_template::Template;
//! use serde_json::json;
//!
//! let template = Template::compile("<p>{user.name}</p>{bio | safe}");
//! let model = json!({"user": {"name": "<Tom>"}, "bio": "<b>cat</b>"});
//! assert_eq!(template.render(&model), "<p>&lt;Tom&gt;</p><b>cat</b>");
//! ```
//!
//! Missing fields render as empty text unless strict rendering is requested:
//!
//! ```rust
//! use dry_template::{Error, Options, Template};
//! use serde_json::json;
//!
//! let template = Template::compile("Hello {name}");
//! assert_eq!(template.render(&json!({})), "Hello ");
//! assert!(matches!(
//!     template.render_with(&json!({}), &Options::strict()),
//!     Err(Error::Unresolved { .. })
//! ));
//! ```

use std::borrow::Cow;

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    escape::escape,
    expression::Expression,
    model::{Model, Value},
    path::{Path, Step},
    segment::Segment,
};

/// What rendering does with a field it cannot display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Missing {
    /// Render an empty string
    #[default]
    Lenient,
    /// Fail the whole render
    Strict,
}

/// Render options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub missing: Missing,
}

impl Options {
    pub fn strict() -> Self {
        Self {
            missing: Missing::Strict,
        }
    }
}

/// A compiled template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Moves accumulated literal text into a segment
fn commit_pending(pending: &mut String, segments: &mut Vec<Segment>) {
    if !pending.is_empty() {
        segments.push(Segment::Literal(std::mem::take(pending)));
    }
}

/// Resolves a path step by step, starting from the root model
fn resolve<'a>(model: &'a dyn Model, path: &Path) -> Option<Value<'a>> {
    let mut current = Value::Model(model);
    for step in path.steps() {
        let model = current.as_model()?;
        current = match step {
            Step::Field(name) => model.get(name)?,
            Step::Call(name) => model.call(name)?,
        };
    }
    Some(current)
}

impl Template {
    /// Compiles template text. Never fails: anything that is not a well formed
    /// placeholder is kept as literal text.
    pub fn compile(src: &str) -> Self {
        let mut segments = Vec::new();
        let mut pending = String::new();
        let mut rest = src;
        let mut expression = Expression::from(src);
        while let Some(expr) = expression {
            rest = expr.postfix;
            pending.push_str(expr.prefix);
            match Path::parse(expr.path) {
                Some(path) => {
                    commit_pending(&mut pending, &mut segments);
                    segments.push(Segment::Field {
                        path,
                        escape: !expr.safe,
                    });
                }
                None => {
                    tracing::trace!(placeholder = %expr, "malformed path kept as text");
                    pending.push_str(expr.raw);
                }
            }
            expression = expr.next();
        }
        pending.push_str(rest);
        commit_pending(&mut pending, &mut segments);

        tracing::debug!(segments = segments.len(), "compiled template");
        for segment in &segments {
            tracing::trace!(%segment, "segment");
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Renders leniently: unresolved fields become empty text
    pub fn render(&self, model: &dyn Model) -> String {
        let mut out = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { path, escape } => match field_text(model, path) {
                    Ok(text) => push_field(&mut out, &text, *escape),
                    Err(miss) => {
                        tracing::trace!(%path, segment = index, ?miss, "field rendered empty")
                    }
                },
            }
        }
        out
    }

    /// Renders with explicit options. In strict mode the first unresolved field
    /// fails the render and no output is returned.
    pub fn render_with(&self, model: &dyn Model, options: &Options) -> Result<String> {
        if options.missing == Missing::Lenient {
            return Ok(self.render(model));
        }
        let mut out = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { path, escape } => {
                    let text = field_text(model, path)
                        .map_err(|miss| miss.into_error(path, index))?;
                    push_field(&mut out, &text, *escape);
                }
            }
        }
        Ok(out)
    }
}

/// Why a field produced no text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    Unresolved,
    NotDisplayable,
}

impl Miss {
    fn into_error(self, path: &Path, segment: usize) -> Error {
        let path = path.to_string();
        match self {
            Miss::Unresolved => Error::Unresolved { path, segment },
            Miss::NotDisplayable => Error::NotDisplayable { path, segment },
        }
    }
}

fn field_text<'a>(
    model: &'a dyn Model,
    path: &Path,
) -> std::result::Result<Cow<'a, str>, Miss> {
    resolve(model, path)
        .ok_or(Miss::Unresolved)?
        .into_display()
        .ok_or(Miss::NotDisplayable)
}

fn push_field(out: &mut String, text: &str, escaped: bool) {
    if escaped {
        out.push_str(&escape(text));
    } else {
        out.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    static STRICT: Options = Options {
        missing: Missing::Strict,
    };

    fn field(path: &str, escape: bool) -> Segment {
        Segment::Field {
            path: Path::parse(path).unwrap(),
            escape,
        }
    }

    #[test]
    fn compiles_segments() {
        let template = Template::compile("Hello {name}, {bio | safe}!");
        assert_eq!(
            template.segments(),
            &[
                Segment::literal("Hello "),
                field("name", true),
                Segment::literal(", "),
                field("bio", false),
                Segment::literal("!"),
            ]
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let src = "<li>{item.title}</li>{ item.body|safe }";
        assert_eq!(Template::compile(src), Template::compile(src));
    }

    #[test]
    fn empty_template() {
        assert!(Template::compile("").segments().is_empty());
        assert_eq!(Template::compile("").render(&json!({})), "");
    }

    #[test]
    fn no_placeholders_round_trip() {
        for src in [
            "plain text",
            "line one\nline \"two\"\r\n",
            "it's a \\ backslash",
            "{unterminated",
            "unopened}",
            "{}",
            "{ }",
            "<style>p { color: red; }</style>",
            "<script>if (x) { run(); }</script>",
        ] {
            assert_eq!(Template::compile(src).render(&json!({"x": 1})), src);
        }
    }

    #[test]
    fn malformed_brace_is_single_literal() {
        assert_eq!(
            Template::compile("{unterminated").segments(),
            &[Segment::literal("{unterminated")]
        );
    }

    #[test]
    fn malformed_paths_stay_literal() {
        let template = Template::compile("{a..b} {c(} {d}");
        assert_eq!(
            template.segments(),
            &[Segment::literal("{a..b} {c(} "), field("d", true)]
        );
        assert_eq!(template.render(&json!({"d": "D"})), "{a..b} {c(} D");
    }

    #[test]
    fn escapes_values() {
        let model = json!({"field": "<a href=\"x\">&'"});
        assert_eq!(
            Template::compile("{field}").render(&model),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
        assert_eq!(
            Template::compile("{field | safe}").render(&model),
            "<a href=\"x\">&'"
        );
    }

    #[test]
    fn escapes_all_occurrences() {
        assert_eq!(
            Template::compile("{v}").render(&json!({"v": "a<b<c"})),
            "a&lt;b&lt;c"
        );
    }

    #[test]
    fn literal_text_is_not_escaped() {
        assert_eq!(
            Template::compile("Tom & Jerry {name}").render(&json!({"name": "Spike"})),
            "Tom & Jerry Spike"
        );
    }

    #[test]
    fn nested_paths() {
        let model = json!({"user": {"profile": {"age": 30}}});
        assert_eq!(Template::compile("{user.profile.age}").render(&model), "30");
    }

    #[test]
    fn array_indices_and_len() {
        let model = json!({"items": [{"title": "first"}, {"title": "second"}]});
        assert_eq!(
            Template::compile("{items.1.title} of {items.len()}").render(&model),
            "second of 2"
        );
    }

    #[test]
    fn order_preserved() {
        let model = json!({"a": "X", "b": "Y"});
        assert_eq!(Template::compile("{a}-{b}-{a}").render(&model), "X-Y-X");
    }

    #[test]
    fn idempotent() {
        let template = Template::compile("<b>{name}</b> & {count}");
        let model = json!({"name": "<i>", "count": 3});
        let first = template.render(&model);
        assert_eq!(first, template.render(&model));
        assert_eq!(first, "<b>&lt;i&gt;</b> & 3");
    }

    #[test]
    fn scalars_display() {
        let model = json!({"t": true, "n": null, "f": 1.5, "neg": -4});
        assert_eq!(
            Template::compile("{t}|{n}|{f}|{neg}").render(&model),
            "true||1.5|-4"
        );
    }

    #[test]
    fn lenient_missing_fields_render_empty() {
        let model = json!({"user": {"name": "Tom"}, "flat": "x"});
        assert_eq!(
            Template::compile("[{missing}][{user.age}][{flat.deeper}][{user}][{user.name()}]")
                .render(&model),
            "[][][][][]"
        );
    }

    #[test]
    fn strict_missing_field_fails() {
        let template = Template::compile("Hi {user.name}, {user.age}");
        let err = template
            .render_with(&json!({"user": {"name": "Tom"}}), &STRICT)
            .unwrap_err();
        match err {
            Error::Unresolved { path, segment } => {
                assert_eq!(path, "user.age");
                assert_eq!(segment, 3);
            }
            other => panic!("unexpected error {}", other),
        }
        assert_eq!(
            template
                .render_with(&json!({"user": {"name": "Tom", "age": 9}}), &STRICT)
                .unwrap(),
            "Hi Tom, 9"
        );
    }

    #[test]
    fn strict_object_field_fails() {
        let err = Template::compile("{user}")
            .render_with(&json!({"user": {}}), &STRICT)
            .unwrap_err();
        assert!(matches!(err, Error::NotDisplayable { segment: 0, .. }));
        assert_eq!(
            err.to_string(),
            "field `user` in segment 0 is an object and cannot be displayed"
        );
    }

    #[test]
    fn strict_null_renders_empty() {
        assert_eq!(
            Template::compile("[{n}]")
                .render_with(&json!({"n": null}), &STRICT)
                .unwrap(),
            "[]"
        );
    }

    #[test]
    fn lenient_render_with_matches_render() {
        let template = Template::compile("{a} {b}");
        let model = json!({"a": 1});
        assert_eq!(
            template.render_with(&model, &Options::default()).unwrap(),
            template.render(&model)
        );
    }

    #[test]
    fn renders_hash_maps() {
        let mut model = HashMap::new();
        model.insert("name".to_string(), "Jerry".to_string());
        assert_eq!(Template::compile("Hi {name}").render(&model), "Hi Jerry");
    }

    #[test]
    fn renders_f32_without_widening_noise() {
        let mut model = HashMap::new();
        model.insert("price".to_string(), 0.1f32);
        let template = Template::compile("{price}");
        assert_eq!(template.render(&model), "0.1");
        assert_eq!(template.render_with(&model, &STRICT).unwrap(), "0.1");
    }

    #[test]
    fn field_text_reports_why_it_failed() {
        let model = json!({"user": {"name": "Tom"}});
        let path = |p: &str| Path::parse(p).unwrap();
        assert_eq!(field_text(&model, &path("user.name")).as_deref(), Ok("Tom"));
        assert_eq!(field_text(&model, &path("user.age")), Err(Miss::Unresolved));
        assert_eq!(field_text(&model, &path("user")), Err(Miss::NotDisplayable));
    }

    #[test]
    fn strict_and_lenient_agree_when_everything_resolves() {
        let template = Template::compile("<b>{a}</b>{b | safe}");
        let model = json!({"a": "<x>", "b": "<y>"});
        assert_eq!(
            template.render_with(&model, &STRICT).unwrap(),
            template.render(&model)
        );
    }

    #[test]
    fn preserves_newlines_and_quotes() {
        let template = Template::compile("line 'one'\n\"{x}\"\r\nend");
        assert_eq!(template.render(&json!({"x": "y"})), "line 'one'\n\"y\"\r\nend");
    }

    #[test]
    fn options_deserialize() {
        let options: Options = serde_json::from_str(r#"{"missing": "strict"}"#).unwrap();
        assert_eq!(options, STRICT);
        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options.missing, Missing::Lenient);
    }

    #[test]
    fn shared_across_threads() {
        let template = Template::compile("{n}");
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|n| {
                    let template = &template;
                    scope.spawn(move || template.render(&json!({ "n": n })))
                })
                .collect();
            let rendered: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(rendered, vec!["0", "1", "2", "3"]);
        });
    }
}
