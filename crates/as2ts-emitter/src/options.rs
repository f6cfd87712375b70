//! Emitter configuration.

use regex::Regex;
use rustc_hash::FxHashMap;

/// Rewrites an import whose source path matches `pattern` into
/// `import X = <module>.<last path segment>`.
#[derive(Debug, Clone)]
pub struct ImportRule {
    pub module: String,
    pub pattern: Regex,
}

impl ImportRule {
    pub fn new(module: impl Into<String>, pattern: Regex) -> Self {
        ImportRule {
            module: module.into(),
            pattern,
        }
    }

    /// The qualified name an import of `source` turns into, if this rule
    /// applies to it.
    pub fn rewrite(&self, source: &str) -> Option<String> {
        if !self.pattern.is_match(source) {
            return None;
        }
        let last = source.rsplit('/').next().unwrap_or(source);
        Some(format!("{}.{}", self.module, last))
    }
}

/// Static options for one run.
#[derive(Debug, Clone)]
pub struct EmitterOptions {
    /// Identifier renames. Never applied to `constructor`.
    pub id_replacement: FxHashMap<String, String>,
    /// Literal renames, keyed by the literal's raw source text.
    pub literal_replacement: FxHashMap<String, String>,
    /// Type renames applied in type positions.
    pub type_mapper: FxHashMap<String, String>,
    pub import_rules: Vec<ImportRule>,
    /// Abort the file on the first error diagnostic.
    pub terminate_on_error: bool,
    /// Dump the offending node alongside each diagnostic.
    pub error_detail: bool,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        EmitterOptions {
            id_replacement: FxHashMap::default(),
            literal_replacement: FxHashMap::default(),
            type_mapper: default_type_mapper(),
            import_rules: Vec::new(),
            terminate_on_error: true,
            error_detail: false,
        }
    }
}

/// AS3 builtin types and their TypeScript spelling.
pub fn default_type_mapper() -> FxHashMap<String, String> {
    [
        ("int", "number"),
        ("uint", "number"),
        ("Number", "number"),
        ("Boolean", "boolean"),
        ("String", "string"),
        ("Object", "any"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

impl EmitterOptions {
    pub fn rename_identifier<'s>(&'s self, name: &'s str) -> &'s str {
        if name == "constructor" {
            return name;
        }
        self.id_replacement.get(name).map_or(name, String::as_str)
    }

    pub fn rename_literal<'s>(&'s self, raw: &'s str) -> &'s str {
        self.literal_replacement.get(raw).map_or(raw, String::as_str)
    }

    pub fn map_type<'s>(&'s self, name: &'s str) -> &'s str {
        self.type_mapper.get(name).map_or(name, String::as_str)
    }

    /// The first import rule matching `source`, rendered.
    pub fn rewrite_import(&self, source: &str) -> Option<String> {
        self.import_rules.iter().find_map(|rule| rule.rewrite(source))
    }
}
