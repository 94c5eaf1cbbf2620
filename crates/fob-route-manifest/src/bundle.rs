//! Built-file records handed over by the bundler.

use serde::{Deserialize, Serialize};

/// One file of a bundle snapshot.
///
/// Produced by the bundler once per build and never mutated by the manifest
/// pipeline. Only entry points are offered to the route classifier; every
/// other file is reached through an entry's `imports` or `referenced_files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltFile {
    /// Output file name, unique within the snapshot (e.g. `index.1c5aebde.js`)
    pub file_name: String,

    /// Source module this file was built from, when the bundler reports one
    #[serde(default)]
    pub facade_module_id: Option<String>,

    /// Whether the file directly corresponds to a top-level application module
    #[serde(default)]
    pub is_entry_point: bool,

    /// Statically imported files, in bundle order
    #[serde(default)]
    pub imports: Vec<String>,

    /// Other files pulled in by this one (sibling styles, images, fonts)
    #[serde(default)]
    pub referenced_files: Vec<String>,
}

impl BuiltFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    pub fn entry(mut self, is_entry_point: bool) -> Self {
        self.is_entry_point = is_entry_point;
        self
    }

    pub fn facade(mut self, module_id: impl Into<String>) -> Self {
        self.facade_module_id = Some(module_id.into());
        self
    }

    pub fn import(mut self, file_name: impl Into<String>) -> Self {
        self.imports.push(file_name.into());
        self
    }

    pub fn reference(mut self, file_name: impl Into<String>) -> Self {
        self.referenced_files.push(file_name.into());
        self
    }

    /// Key handed to the route classifier.
    ///
    /// The facade module id when known, otherwise the output file name.
    pub fn route_key(&self) -> &str {
        self.facade_module_id.as_deref().unwrap_or(&self.file_name)
    }

    /// Files this entry contributes to its route, in first-seen order.
    ///
    /// The file itself, then its static imports, then its referenced files.
    /// Duplicates are not removed here.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.file_name.as_str())
            .chain(self.imports.iter().map(String::as_str))
            .chain(self.referenced_files.iter().map(String::as_str))
    }
}
