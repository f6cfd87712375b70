//! Cross-file class member index.
//!
//! Built during the Analyse phase from every file's tree and consulted
//! read-only while emitting, so inherited members can be qualified even
//! though their declarations live in another file.

use std::fmt;

use as2ts_syntax::{Node, NodeKind};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub super_class: Option<String>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl ClassEntry {
    pub fn has_member(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p == name) || self.methods.iter().any(|m| m == name)
    }
}

/// Every class seen so far, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberIndex {
    classes: IndexMap<String, ClassEntry>,
}

impl MemberIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassEntry> {
        self.classes.get(class_name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    pub fn insert(&mut self, entry: ClassEntry) {
        if let Some(previous) = self.classes.get(&entry.name) {
            debug!(
                class = %entry.name,
                previous = %previous.file,
                file = %entry.file,
                "class declared twice, keeping the later one"
            );
        }
        self.classes.insert(entry.name.clone(), entry);
    }

    /// Record every class declared in `program`. Returns how many were found.
    pub fn collect(&mut self, program: &Node, relative_path: &str) -> usize {
        let mut found = 0;
        for node in program.descendants() {
            let NodeKind::ClassDeclaration(class) = &node.kind else {
                continue;
            };
            let Some(name) = class.id.as_deref().and_then(Node::as_identifier) else {
                continue;
            };
            let mut entry = ClassEntry {
                name: name.to_string(),
                file: relative_path.to_string(),
                super_class: class.super_class.as_deref().and_then(entity_name),
                ..Default::default()
            };
            class.body.for_each_child(&mut |member| match &member.kind {
                NodeKind::ClassProperty(prop) => {
                    if let Some(key) = prop.key.as_identifier() {
                        entry.properties.push(key.to_string());
                    }
                }
                NodeKind::MethodDefinition(method) | NodeKind::TSAbstractMethodDefinition(method) => {
                    if let Some(key) = method.key.as_identifier()
                        && key != "constructor"
                        && !entry.methods.iter().any(|m| m == key)
                    {
                        entry.methods.push(key.to_string());
                    }
                }
                _ => {}
            });
            trace!(class = %entry.name, file = relative_path, "indexed class");
            self.insert(entry);
            found += 1;
        }
        found
    }

    /// Whether `member` is declared by `class_name` or one of its ancestors.
    pub fn has_inherited_member(&self, class_name: &str, member: &str) -> bool {
        let mut seen = FxHashSet::default();
        let mut current = Some(class_name);
        while let Some(name) = current {
            if !seen.insert(name) {
                return false;
            }
            let Some(entry) = self.classes.get(name) else {
                return false;
            };
            if entry.has_member(member) {
                return true;
            }
            current = entry.super_class.as_deref();
        }
        false
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The last segment of an `Identifier` or dotted `MemberExpression`.
pub(crate) fn entity_name(node: &Node) -> Option<String> {
    match &node.kind {
        NodeKind::Identifier(ident) => Some(ident.name.clone()),
        NodeKind::MemberExpression(member) if !member.computed => entity_name(&member.property),
        _ => None,
    }
}

impl fmt::Display for MemberIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.classes.values() {
            write!(f, "{} ({})", entry.name, entry.file)?;
            if let Some(super_class) = &entry.super_class {
                write!(f, " extends {super_class}")?;
            }
            writeln!(f)?;
            writeln!(f, "    properties: {}", entry.properties.join(", "))?;
            writeln!(f, "    methods: {}", entry.methods.join(", "))?;
        }
        Ok(())
    }
}
