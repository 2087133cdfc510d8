//! Error types for rendering and loading templates
//!
//! Compiling never fails: text that does not form a placeholder is kept as literal
//! text. Errors only arise when rendering in strict mode or when loading templates
//! from disk.

use thiserror::Error;

/// Errors that can occur while rendering or loading templates
#[derive(Debug, Error)]
pub enum Error {
    /// A placeholder path could not be resolved against the model (strict mode only)
    #[error("unresolved field `{path}` in segment {segment}")]
    Unresolved { path: String, segment: usize },

    /// A placeholder path resolved to a nested object rather than a value (strict mode only)
    #[error("field `{path}` in segment {segment} is an object and cannot be displayed")]
    NotDisplayable { path: String, segment: usize },

    /// No template registered under the name
    #[error("template not found: {name}")]
    NotFound { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, Error>;
