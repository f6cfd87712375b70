//! Functions, classes, interfaces and module-level declarations.

use as2ts_common::DiagnosticKind;
use as2ts_syntax::{
    Class, ClassProperty, ExportNamed, Function, Heritage, ImportDeclaration, InterfaceDeclaration,
    MethodDefinition, MethodKind, MethodSignature, Node, NodeKind, PropertySignature,
};

use super::Printer;
use crate::context::EmitFlags;
use crate::error::EmitResult;
use crate::member_index::entity_name;

/// Statement synthesized at the top of constructors that never call `super`.
const SUPER_CALL: &str = "super();";

/// Whether `body` already contains a `super(...)` call anywhere inside it.
fn calls_super(body: &Node) -> bool {
    let mut is_super_call = |node: &Node| match &node.kind {
        NodeKind::CallExpression(call) => matches!(call.callee.kind, NodeKind::Super),
        _ => false,
    };
    body.find_descendant(&mut is_super_call, &mut |_| true).is_some()
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// `function name(params): ret { … }` for declarations and expressions.
    pub(super) fn emit_function(
        &mut self,
        node: &Node,
        func: &Function,
        flags: EmitFlags,
    ) -> EmitResult {
        self.reject_if(func.generator, node, "generator function")?;
        self.reject_if(func.is_async, node, "async function")?;
        self.reject_if(func.declare, node, "declare function")?;

        let options = self.options;
        let name = func
            .id
            .as_deref()
            .and_then(Node::as_identifier)
            .map(|name| options.rename_identifier(name));
        if matches!(node.kind, NodeKind::FunctionDeclaration(_)) {
            if flags.exported {
                self.write("export ");
            }
            if let Some(name) = name {
                // Nested named functions are locals of the enclosing one.
                self.ctx.scope.declare_local(name);
            }
        }

        self.write("function");
        if let Some(name) = name {
            self.write(" ");
            self.write(name);
        }
        self.ctx.scope.enter_function(name.unwrap_or_default(), false, false);
        self.emit_params(&func.params)?;
        self.emit_annotation(func.return_type.as_deref())?;
        match func.body.as_deref() {
            Some(body) => {
                self.write(" ");
                self.emit_braced(body)?;
            }
            None => self.report(node, DiagnosticKind::MissingRequiredField, &["Function body"])?,
        }
        self.ctx.scope.exit_function();
        Ok(())
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(super) fn emit_class(&mut self, node: &Node, class: &Class, flags: EmitFlags) -> EmitResult {
        let Some(raw_name) = class.id.as_deref().and_then(Node::as_identifier) else {
            return self.report(node, DiagnosticKind::MissingRequiredField, &["Class name"]);
        };
        self.reject_if(!class.decorators.is_empty(), node, "Decorator")?;
        self.reject_if(class.declare, node, "declare class")?;

        let options = self.options;
        let name = options.rename_identifier(raw_name);
        self.ctx.type_imports.mark_imported(name);

        if flags.exported {
            self.write("export ");
        }
        if class.is_abstract {
            self.write("abstract ");
        }
        self.write("class ");
        self.write(name);
        if let Some(super_class) = class.super_class.as_deref() {
            self.write(" extends ");
            self.emit_with(super_class, EmitFlags::type_position())?;
        }
        if !class.implements.is_empty() {
            self.write(" implements ");
            self.emit_comma_list(&class.implements, EmitFlags::new())?;
        }
        self.write(" ");

        let super_name = class.super_class.as_deref().and_then(entity_name);
        self.ctx.scope.enter_class(name, super_name);
        self.emit_node(&class.body)?;
        self.ctx.scope.exit_class();
        Ok(())
    }

    pub(super) fn emit_class_body(&mut self, members: &[Node]) -> EmitResult {
        self.emit_block(None, members)
    }

    pub(super) fn emit_class_property(&mut self, node: &Node, prop: &ClassProperty) -> EmitResult {
        self.reject_if(!prop.decorators.is_empty(), node, "Decorator")?;
        self.reject_if(prop.optional, node, "optional property")?;
        self.reject_if(prop.computed, node, "computed property")?;
        self.reject_if(prop.definite, node, "definite assignment")?;
        self.reject_if(prop.declare, node, "declare property")?;

        if let Some(accessibility) = &prop.accessibility {
            self.write(accessibility);
            self.write(" ");
        }
        if prop.is_static {
            self.write("static ");
        }
        if prop.readonly {
            self.write("readonly ");
        }
        self.emit_with(&prop.key, EmitFlags::object_key())?;
        if let Some(key) = prop.key.as_identifier() {
            let options = self.options;
            self.ctx
                .scope
                .declare_property(options.rename_identifier(key), prop.is_static);
        }
        self.emit_annotation(prop.type_annotation.as_deref())?;
        if let Some(value) = prop.value.as_deref() {
            self.write(" = ");
            self.emit_node(value)?;
        }
        self.write_ok(";")
    }

    /// Methods, accessors and constructors.
    ///
    /// A constructor whose body has no `super(...)` call gets one as its
    /// first statement. An abstract method without a body ends in `;`.
    pub(super) fn emit_method(
        &mut self,
        node: &Node,
        method: &MethodDefinition,
        is_abstract: bool,
    ) -> EmitResult {
        self.reject_if(method.computed, node, "computed method name")?;
        let func = match &method.value.kind {
            NodeKind::FunctionExpression(func) => func,
            NodeKind::TSEmptyBodyFunctionExpression(func) if is_abstract => func,
            NodeKind::TSEmptyBodyFunctionExpression(_) => {
                return self.unsupported(&method.value, "TSEmptyBodyFunctionExpression");
            }
            _ => return self.unsupported(&method.value, method.value.category()),
        };
        self.reject_if(func.generator, node, "generator function")?;
        self.reject_if(func.is_async, node, "async function")?;

        let is_constructor = method.kind == MethodKind::Constructor;
        let options = self.options;
        let name = if is_constructor {
            "constructor"
        } else {
            match method.key.as_identifier() {
                Some(key) => options.rename_identifier(key),
                None => {
                    return self.report(node, DiagnosticKind::MissingRequiredField, &["Method name"]);
                }
            }
        };

        if let Some(accessibility) = &method.accessibility {
            self.write(accessibility);
            self.write(" ");
        }
        if is_abstract {
            self.write("abstract ");
        }
        if method.is_static {
            self.write("static ");
        }
        match method.kind {
            MethodKind::Get => self.write("get "),
            MethodKind::Set => self.write("set "),
            MethodKind::Method | MethodKind::Constructor => {}
        }
        self.write(name);

        self.ctx.scope.enter_function(name, true, method.is_static);
        self.emit_params(&func.params)?;
        if !is_constructor {
            self.emit_annotation(func.return_type.as_deref())?;
        }
        match func.body.as_deref() {
            None if is_abstract => self.write(";"),
            None => self.report(node, DiagnosticKind::MissingRequiredField, &["Method body"])?,
            Some(body) => {
                self.write(" ");
                let previous = self.ctx.scope.set_member_body(true);
                let statements = match &body.kind {
                    NodeKind::BlockStatement(block) => block.body.as_slice(),
                    _ => std::slice::from_ref(body),
                };
                let prologue = (is_constructor && !calls_super(body)).then_some(SUPER_CALL);
                self.emit_block(prologue, statements)?;
                self.ctx.scope.set_member_body(previous);
            }
        }
        self.ctx.scope.exit_function();
        Ok(())
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    /// Interfaces are always exported.
    pub(super) fn emit_interface(&mut self, node: &Node, iface: &InterfaceDeclaration) -> EmitResult {
        self.reject_if(!iface.implements.is_empty(), node, "interface implements")?;
        let Some(raw_name) = iface.id.as_identifier() else {
            return self.report(node, DiagnosticKind::MissingRequiredField, &["Interface name"]);
        };
        let options = self.options;
        let name = options.rename_identifier(raw_name);
        self.ctx.type_imports.mark_imported(name);

        self.write("export interface ");
        self.write(name);
        if !iface.heritage.is_empty() {
            self.write(" extends ");
            self.emit_comma_list(&iface.heritage, EmitFlags::new())?;
        }
        self.write(" ");
        self.emit_node(&iface.body)
    }

    pub(super) fn emit_interface_body(&mut self, members: &[Node]) -> EmitResult {
        self.emit_block(None, members)
    }

    /// An `extends` or `implements` entry: a type name plus type arguments.
    pub(super) fn emit_heritage(&mut self, heritage: &Heritage) -> EmitResult {
        self.emit_with(&heritage.expression, EmitFlags::type_position())?;
        if let Some(args) = heritage.type_args() {
            self.emit_node(args)?;
        }
        Ok(())
    }

    pub(super) fn emit_method_signature(&mut self, sig: &MethodSignature) -> EmitResult {
        if let Some(accessibility) = &sig.accessibility {
            self.write(accessibility);
            self.write(" ");
        }
        if sig.is_static {
            self.write("static ");
        }
        self.emit_signature_key(&sig.key, sig.computed)?;
        if sig.optional {
            self.write("?");
        }
        self.ctx.scope.enter_function("", false, false);
        self.emit_params(&sig.params)?;
        self.ctx.scope.exit_function();
        self.emit_annotation(sig.return_type.as_deref())?;
        self.write_ok(";")
    }

    pub(super) fn emit_property_signature(&mut self, sig: &PropertySignature) -> EmitResult {
        if sig.readonly {
            self.write("readonly ");
        }
        self.emit_signature_key(&sig.key, sig.computed)?;
        if sig.optional {
            self.write("?");
        }
        self.emit_annotation(sig.type_annotation.as_deref())?;
        self.write_ok(";")
    }

    fn emit_signature_key(&mut self, key: &Node, computed: bool) -> EmitResult {
        if computed {
            self.write("[");
            self.emit_node(key)?;
            self.write_ok("]")
        } else {
            self.emit_with(key, EmitFlags::object_key())
        }
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    /// `import D, * as N, {A, B as C} from "src"`, or
    /// `import A = Module.Last` when an import rule matches the source path.
    pub(super) fn emit_import(&mut self, import: &ImportDeclaration) -> EmitResult {
        let mut default = None;
        let mut namespace = None;
        let mut named = Vec::new();
        for specifier in &import.specifiers {
            let Some(text) = self.import_binding(specifier) else {
                self.unsupported(specifier, specifier.category())?;
                continue;
            };
            match specifier.kind {
                NodeKind::ImportDefaultSpecifier(_) => default = Some(text),
                NodeKind::ImportNamespaceSpecifier(_) => namespace = Some(text),
                _ => named.push(text),
            }
        }

        self.write("import ");
        let rewritten = import
            .source
            .as_string_literal()
            .and_then(|source| self.options.rewrite_import(source));
        if let Some(qualified) = rewritten {
            let names: Vec<String> = default.into_iter().chain(namespace).chain(named).collect();
            self.write(&names.join(", "));
            self.write(" = ");
            self.write(&qualified);
            return Ok(());
        }

        let mut clauses: Vec<String> = default.into_iter().chain(namespace).collect();
        if !named.is_empty() {
            clauses.push(format!("{{{}}}", named.join(", ")));
        }
        if !clauses.is_empty() {
            self.write(&clauses.join(", "));
            self.write(" from ");
        }
        self.emit_node(&import.source)
    }

    /// A specifier reached outside its declaration.
    pub(super) fn emit_import_specifier(&mut self, node: &Node) -> EmitResult {
        match self.import_binding(node) {
            Some(text) => self.write_ok(&text),
            None => self.unsupported(node, node.category()),
        }
    }

    /// The rendered form of one import specifier. The local name it binds is
    /// recorded so the type it names is not imported a second time.
    fn import_binding(&mut self, specifier: &Node) -> Option<String> {
        let options = self.options;
        let (text, local) = match &specifier.kind {
            NodeKind::ImportSpecifier(spec) => {
                let imported = options.rename_identifier(spec.imported.as_identifier()?);
                let local = match spec.local.as_deref().and_then(Node::as_identifier) {
                    Some(local) => options.rename_identifier(local),
                    None => imported,
                };
                if local == imported {
                    (imported.to_string(), local)
                } else {
                    (format!("{imported} as {local}"), local)
                }
            }
            NodeKind::ImportDefaultSpecifier(binding) => {
                let local = options.rename_identifier(binding.local.as_identifier()?);
                (local.to_string(), local)
            }
            NodeKind::ImportNamespaceSpecifier(binding) => {
                let local = options.rename_identifier(binding.local.as_identifier()?);
                (format!("* as {local}"), local)
            }
            _ => return None,
        };
        self.ctx.type_imports.mark_imported(local);
        Some(text)
    }

    pub(super) fn emit_export_named(&mut self, node: &Node, export: &ExportNamed) -> EmitResult {
        match export.declaration.as_deref() {
            Some(declaration) => self.emit_with(declaration, EmitFlags::exported()),
            None if !export.specifiers.is_empty() => self.unsupported(node, "ExportSpecifier"),
            None => Ok(()),
        }
    }
}
