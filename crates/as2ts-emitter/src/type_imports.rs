//! Type references and the imports they require.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// Names that never need an import.
pub const BUILTIN_TYPES: &[&str] = &[
    "number", "string", "boolean", "any", "Array", "[]", "Object", "void",
];

/// Per-file record of referenced and explicitly imported type names.
#[derive(Debug, Default, Clone)]
pub struct TypeImportResolver {
    referenced: IndexSet<String>,
    imported: FxHashSet<String>,
}

impl TypeImportResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.referenced.clear();
        self.imported.clear();
    }

    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_TYPES.contains(&name)
    }

    /// Record a (renamed) type referenced in a type position.
    pub fn record(&mut self, name: &str) {
        if !Self::is_builtin(name) && !self.referenced.contains(name) {
            self.referenced.insert(name.to_string());
        }
    }

    /// Record a name already brought into scope by the file itself.
    pub fn mark_imported(&mut self, name: &str) {
        self.imported.insert(name.to_string());
    }

    pub fn is_imported(&self, name: &str) -> bool {
        self.imported.contains(name)
    }

    /// Every recorded type, in first-seen order.
    pub fn referenced(&self) -> impl Iterator<Item = &str> {
        self.referenced.iter().map(String::as_str)
    }

    /// Types still lacking an import, in first-seen order.
    pub fn pending(&self) -> Vec<&str> {
        self.referenced()
            .filter(|name| !self.is_imported(name))
            .collect()
    }

    /// The directory part of an import path for a file at `relative_path`,
    /// with a trailing slash.
    pub fn module_dir(relative_path: &str) -> String {
        let normalized = relative_path.replace('\\', "/");
        match normalized.rsplit_once('/') {
            Some((dir, _)) if !dir.is_empty() => format!("{dir}/"),
            _ => "./".to_string(),
        }
    }

    /// Put one import per pending type in front of `body`.
    ///
    /// Each import is prepended on its own, so the finished block lists the
    /// types in reverse order of discovery.
    pub fn prepend_imports(&self, body: String, relative_path: &str) -> String {
        let dir = Self::module_dir(relative_path);
        let mut text = body;
        for name in self.pending() {
            text = format!("import {{{name}}} from \"{dir}{name}\";\n{text}");
        }
        text
    }
}
