//! Type annotations and references.

use as2ts_syntax::{Node, NodeKind, QualifiedName, TypeAnnotation, TypeReference};

use super::Printer;
use crate::context::EmitFlags;
use crate::error::EmitResult;

/// `A.B.C` for a chain of qualified names.
fn dotted_name(node: &Node) -> Option<String> {
    match &node.kind {
        NodeKind::Identifier(ident) => Some(ident.name.clone()),
        NodeKind::TSQualifiedName(name) => {
            Some(format!("{}.{}", dotted_name(&name.left)?, dotted_name(&name.right)?))
        }
        _ => None,
    }
}

impl<'a> Printer<'a> {
    /// A bare `Array` annotation has no element type in TypeScript; it
    /// becomes `any[]`.
    pub(super) fn emit_type_annotation(&mut self, annotation: &TypeAnnotation) -> EmitResult {
        let text = self.capture(&annotation.type_annotation, EmitFlags::new())?;
        if text == "Array" {
            self.write("any[]");
        } else {
            self.write_raw(&text);
        }
        Ok(())
    }

    pub(super) fn emit_type_reference(&mut self, reference: &TypeReference) -> EmitResult {
        self.emit_with(&reference.type_name, EmitFlags::type_position())?;
        if let Some(args) = reference.type_args() {
            self.emit_node(args)?;
        }
        Ok(())
    }

    pub(super) fn emit_type_arguments(&mut self, params: &[Node]) -> EmitResult {
        self.write("<");
        self.emit_comma_list(params, EmitFlags::type_position())?;
        self.write_ok(">")
    }

    /// Qualified type names are written as they are and never imported.
    pub(super) fn emit_qualified_name(&mut self, name: &QualifiedName) -> EmitResult {
        let (Some(left), Some(right)) = (dotted_name(&name.left), dotted_name(&name.right)) else {
            self.emit_node(&name.left)?;
            self.write(".");
            return self.emit_with(&name.right, EmitFlags::member_property());
        };
        self.write(&left);
        self.write(".");
        self.write_ok(&right)
    }
}
