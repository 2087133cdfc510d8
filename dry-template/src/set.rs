//! Named collections of compiled templates
//!
//! A [`TemplateSet`] compiles each template once and keeps it under a name, usually
//! loaded from a directory of template files:
//!
//! ```text
//! templates/
//!   index.html          -> "index"
//!   blog/item.html      -> "blog/item"
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    model::Model,
    template::{Options, Template},
};

#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    options: Options,
    templates: BTreeMap<String, Template>,
}

/// Template name for a file: its path relative to the root, without extension
fn template_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl TemplateSet {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            templates: BTreeMap::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Compiles and stores a template, replacing any previous template of that name
    pub fn insert(&mut self, name: impl Into<String>, src: &str) -> &Template {
        let name = name.into();
        tracing::debug!(%name, "adding template");
        self.templates.insert(name.clone(), Template::compile(src));
        &self.templates[&name]
    }

    /// Loads every file with the given extension below `dir`
    pub fn load_dir(&mut self, dir: impl AsRef<Path>, extension: &str) -> Result<usize> {
        let root = dir.as_ref();
        tracing::debug!(dir = %root.display(), extension, "loading templates");
        let mut loaded = 0;
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != extension) {
                continue;
            }
            let src = fs::read_to_string(path)?;
            self.insert(template_name(root, path), &src);
            loaded += 1;
        }
        tracing::debug!(loaded, "loaded templates");
        Ok(loaded)
    }

    /// Creates a set from a directory of templates
    pub fn from_dir(dir: impl AsRef<Path>, extension: &str, options: Options) -> Result<Self> {
        let mut set = Self::new(options);
        set.load_dir(dir, extension)?;
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Renders the named template with the set's options
    pub fn render(&self, name: &str, model: &dyn Model) -> Result<String> {
        self.get(name)
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
            })?
            .render_with(model, &self.options)
    }
}
