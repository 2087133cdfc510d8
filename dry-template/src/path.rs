//! Placeholder path parsing
//!
//! A path is a dotted list of steps resolved left to right against a model:
//!
//! ```text
//! name
//! user.profile.age
//! user.full_name()
//! items.0
//! ```
//!
//! A step written with a trailing `()` invokes a zero-argument accessor through
//! [`Model::call`](crate::Model::call), every other step reads a property through
//! [`Model::get`](crate::Model::get).

use std::fmt::Display;

/// One component of a dotted path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Property lookup: `name`
    Field(String),
    /// Zero-argument accessor: `name()`
    Call(String),
}

/// A parsed placeholder path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    source: String,
    steps: Vec<Step>,
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses a single step, `None` if the text is not `name` or `name()`
fn parse_step(src: &str) -> Option<Step> {
    match src.strip_suffix("()") {
        Some(name) => valid_name(name).then(|| Step::Call(name.to_string())),
        None => valid_name(src).then(|| Step::Field(src.to_string())),
    }
}

impl Path {
    /// Parses `step(.step)*`, returning `None` for empty steps or misplaced parentheses
    pub fn parse(src: &str) -> Option<Self> {
        let steps = src.split('.').map(parse_step).collect::<Option<Vec<_>>>()?;
        Some(Self {
            source: src.to_string(),
            steps,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The path as written in the template
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
