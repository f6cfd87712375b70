//! Per-file emission state.
//!
//! Nothing here outlives one call to `CodeEmitter::emit`; the input tree is
//! never annotated in place.

use as2ts_common::Diagnostic;
use as2ts_syntax::Node;
use rustc_hash::FxHashMap;

use crate::scope::ScopeResolver;
use crate::type_imports::TypeImportResolver;

/// Position flags for the node about to be emitted.
///
/// Flags describe where a node sits in its parent. They are consumed by the
/// node they were set for and never inherited by its children; a parent that
/// wants a grandchild to see a flag passes it on explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitFlags {
    /// A type name: renamed through the type mapper and recorded for import.
    pub type_position: bool,
    /// A parameter binding of the enclosing function.
    pub function_parameter: bool,
    /// A local binding (`let`, `catch`, `for` left-hand side).
    pub declaration_name: bool,
    /// The name after `.` in a member access.
    pub member_property: bool,
    /// An object literal or class member key.
    pub object_key: bool,
    /// The declaration sits under `export`.
    pub exported: bool,
}

impl EmitFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_position() -> Self {
        EmitFlags {
            type_position: true,
            ..Self::default()
        }
    }

    pub fn function_parameter() -> Self {
        EmitFlags {
            function_parameter: true,
            ..Self::default()
        }
    }

    pub fn declaration_name() -> Self {
        EmitFlags {
            declaration_name: true,
            ..Self::default()
        }
    }

    pub fn member_property() -> Self {
        EmitFlags {
            member_property: true,
            ..Self::default()
        }
    }

    pub fn object_key() -> Self {
        EmitFlags {
            object_key: true,
            ..Self::default()
        }
    }

    pub fn exported() -> Self {
        EmitFlags {
            exported: true,
            ..Self::default()
        }
    }

    /// The subset of flags a binding pattern passes to its inner name.
    pub fn binding(self) -> Self {
        EmitFlags {
            function_parameter: self.function_parameter,
            declaration_name: self.declaration_name,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct EmitContext {
    pub relative_path: String,
    pub flags: EmitFlags,
    pub scope: ScopeResolver,
    pub type_imports: TypeImportResolver,
    pub diagnostics: Vec<Diagnostic>,
    /// Precedence ranks already computed this pass, keyed by node address.
    ranks: FxHashMap<usize, u32>,
}

impl EmitContext {
    pub fn new(relative_path: impl Into<String>) -> Self {
        EmitContext {
            relative_path: relative_path.into(),
            flags: EmitFlags::new(),
            scope: ScopeResolver::new(),
            type_imports: TypeImportResolver::new(),
            diagnostics: Vec::new(),
            ranks: FxHashMap::default(),
        }
    }

    fn rank_key(node: &Node) -> usize {
        std::ptr::from_ref(node) as usize
    }

    pub fn cached_rank(&self, node: &Node) -> Option<u32> {
        self.ranks.get(&Self::rank_key(node)).copied()
    }

    pub fn remember_rank(&mut self, node: &Node, rank: u32) {
        self.ranks.insert(Self::rank_key(node), rank);
    }

    /// Take the flags set for the current node, leaving defaults behind.
    pub fn take_flags(&mut self) -> EmitFlags {
        std::mem::take(&mut self.flags)
    }
}
