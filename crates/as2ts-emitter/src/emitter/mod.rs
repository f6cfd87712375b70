//! The code emitter.
//!
//! `Printer` walks the tree once, writing into a `SourceWriter`. Its methods
//! are spread over several files by node family:
//! - `statements.rs`: statement lists, control flow, variables
//! - `expressions.rs`: operators, calls, literals, identifiers
//! - `declarations.rs`: classes, functions, interfaces, imports, modules
//! - `types.rs`: annotations and type references
//! - `helpers.rs`: output helpers, precedence lookups, diagnostics

use as2ts_common::Diagnostic;
use as2ts_syntax::{Node, NodeKind};
use tracing::debug;

use crate::context::{EmitContext, EmitFlags};
use crate::error::EmitResult;
use crate::member_index::MemberIndex;
use crate::options::EmitterOptions;
use crate::source_writer::SourceWriter;

mod declarations;
mod expressions;
mod helpers;
mod statements;
mod types;

/// Generated text for one file plus every diagnostic raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOutput {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl EmitOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Turns syntax trees into TypeScript text.
///
/// Holds only static configuration (and optionally a finished member index),
/// so a single emitter may be shared by many files and threads.
#[derive(Debug, Clone, Default)]
pub struct CodeEmitter {
    options: EmitterOptions,
    member_index: Option<MemberIndex>,
}

impl CodeEmitter {
    pub fn new(options: EmitterOptions) -> Self {
        CodeEmitter {
            options,
            member_index: None,
        }
    }

    #[must_use]
    pub fn with_member_index(mut self, index: MemberIndex) -> Self {
        self.member_index = Some(index);
        self
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    pub fn member_index(&self) -> Option<&MemberIndex> {
        self.member_index.as_ref()
    }

    /// Generate the TypeScript text for `tree`, the tree of the file at
    /// `relative_path`.
    ///
    /// Fails only when an error diagnostic is raised with
    /// `terminate_on_error` set; otherwise diagnostics are returned in the
    /// output and the text is best effort.
    pub fn emit(&self, tree: &Node, relative_path: &str) -> EmitResult<EmitOutput> {
        debug!(file = relative_path, "emitting");
        let mut printer = Printer::new(&self.options, self.member_index.as_ref(), relative_path);
        printer.emit_node(tree)?;
        let output = printer.finish();
        debug!(
            file = relative_path,
            bytes = output.text.len(),
            diagnostics = output.diagnostics.len(),
            "emitted"
        );
        Ok(output)
    }
}

pub(crate) struct Printer<'a> {
    options: &'a EmitterOptions,
    member_index: Option<&'a MemberIndex>,
    writer: SourceWriter,
    ctx: EmitContext,
}

impl<'a> Printer<'a> {
    fn new(
        options: &'a EmitterOptions,
        member_index: Option<&'a MemberIndex>,
        relative_path: &str,
    ) -> Self {
        Printer {
            options,
            member_index,
            writer: SourceWriter::new(),
            ctx: EmitContext::new(relative_path),
        }
    }

    fn finish(self) -> EmitOutput {
        let Printer { writer, ctx, .. } = self;
        let text = ctx
            .type_imports
            .prepend_imports(writer.into_string(), &ctx.relative_path);
        EmitOutput {
            text,
            diagnostics: ctx.diagnostics,
        }
    }

    /// Emit `node` with the given position flags.
    pub(super) fn emit_with(&mut self, node: &Node, flags: EmitFlags) -> EmitResult {
        self.ctx.flags = flags;
        self.emit_node(node)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub(super) fn emit_node(&mut self, node: &Node) -> EmitResult {
        let flags = self.ctx.take_flags();
        match &node.kind {
            // Program and blocks
            NodeKind::Program(body) => self.emit_statements(&body.body).map(|_| ()),
            NodeKind::BlockStatement(_) => self.emit_braced(node),

            // Expressions
            NodeKind::Identifier(ident) => self.emit_identifier(ident, flags),
            NodeKind::Literal(lit) => self.emit_literal(lit),
            NodeKind::ThisExpression => {
                self.write("this");
                Ok(())
            }
            NodeKind::Super => {
                self.write("super");
                Ok(())
            }
            NodeKind::ArrayExpression(array) => self.emit_array(array),
            NodeKind::ObjectExpression(object) => self.emit_object(object),
            NodeKind::Property(prop) => self.emit_property(prop),
            NodeKind::FunctionExpression(func) => self.emit_function(node, func, flags),
            NodeKind::ArrowFunctionExpression(func) => self.emit_arrow(node, func),
            NodeKind::ClassExpression(class) => self.emit_class(node, class, flags),
            NodeKind::UnaryExpression(unary) => self.emit_unary(node, unary),
            NodeKind::UpdateExpression(update) => self.emit_update(node, update),
            NodeKind::BinaryExpression(binary)
            | NodeKind::LogicalExpression(binary)
            | NodeKind::AssignmentExpression(binary) => self.emit_binary(node, binary),
            NodeKind::ConditionalExpression(cond) => self.emit_conditional(node, cond),
            NodeKind::CallExpression(call) => self.emit_call(node, call),
            NodeKind::NewExpression(call) => self.emit_new(node, call),
            NodeKind::MemberExpression(member) => self.emit_member(node, member),
            NodeKind::SequenceExpression(seq) => self.emit_sequence(node, seq),
            NodeKind::SpreadElement(spread) => self.emit_spread(node, spread),
            NodeKind::RestElement(rest) => self.emit_rest(rest, flags),
            NodeKind::AssignmentPattern(pattern) => self.emit_assignment_pattern(pattern, flags),
            NodeKind::TSAsExpression(cast) => self.emit_node(&cast.expression),

            // Statements
            NodeKind::EmptyStatement => Ok(()),
            NodeKind::DebuggerStatement => {
                self.write("debugger");
                Ok(())
            }
            NodeKind::ExpressionStatement(stmt) => self.emit_node(&stmt.expression),
            NodeKind::IfStatement(stmt) => self.emit_if(stmt),
            NodeKind::SwitchStatement(stmt) => self.emit_switch(stmt),
            NodeKind::SwitchCase(case) => self.emit_switch_case(case),
            NodeKind::ForStatement(stmt) => self.emit_for(stmt),
            NodeKind::ForInStatement(stmt) => self.emit_for_in(stmt, "in"),
            NodeKind::ForOfStatement(stmt) => self.emit_for_in(stmt, "of"),
            NodeKind::WhileStatement(stmt) => self.emit_while(stmt),
            NodeKind::DoWhileStatement(stmt) => self.emit_do_while(stmt),
            NodeKind::BreakStatement(jump) => self.emit_jump("break", jump),
            NodeKind::ContinueStatement(jump) => self.emit_jump("continue", jump),
            NodeKind::ReturnStatement(arg) => self.emit_return(arg),
            NodeKind::ThrowStatement(arg) => self.emit_throw(node, arg),
            NodeKind::TryStatement(stmt) => self.emit_try(stmt),
            NodeKind::CatchClause(clause) => self.emit_catch(clause),
            NodeKind::VariableDeclaration(decl) => self.emit_variable_declaration(decl, flags),
            NodeKind::VariableDeclarator(decl) => self.emit_variable_declarator(decl),

            // Declarations
            NodeKind::FunctionDeclaration(func) => self.emit_function(node, func, flags),
            NodeKind::TSDeclareFunction(_) => self.unsupported(node, "TSDeclareFunction"),
            NodeKind::TSEmptyBodyFunctionExpression(_) => {
                self.unsupported(node, "TSEmptyBodyFunctionExpression")
            }
            NodeKind::ClassDeclaration(class) => self.emit_class(node, class, flags),
            NodeKind::ClassBody(body) => self.emit_class_body(&body.body),
            NodeKind::ClassProperty(prop) => self.emit_class_property(node, prop),
            NodeKind::MethodDefinition(method) => self.emit_method(node, method, false),
            NodeKind::TSAbstractMethodDefinition(method) => self.emit_method(node, method, true),
            NodeKind::ImportDeclaration(import) => self.emit_import(import),
            NodeKind::ImportSpecifier(_)
            | NodeKind::ImportDefaultSpecifier(_)
            | NodeKind::ImportNamespaceSpecifier(_) => self.emit_import_specifier(node),
            NodeKind::ExportNamedDeclaration(export) => self.emit_export_named(node, export),
            NodeKind::ExportDefaultDeclaration(export) => {
                self.write("export default ");
                self.emit_node(&export.declaration)
            }
            NodeKind::TSModuleDeclaration(module) => match &module.body {
                Some(body) => self.emit_node(body),
                None => Ok(()),
            },
            NodeKind::TSModuleBlock(body) => self.emit_statements(&body.body).map(|_| ()),
            NodeKind::TSInterfaceDeclaration(iface) => self.emit_interface(node, iface),
            NodeKind::TSInterfaceBody(body) => self.emit_interface_body(&body.body),
            NodeKind::TSInterfaceHeritage(heritage) | NodeKind::TSClassImplements(heritage) => {
                self.emit_heritage(heritage)
            }
            NodeKind::TSMethodSignature(sig) => self.emit_method_signature(sig),
            NodeKind::TSPropertySignature(sig) => self.emit_property_signature(sig),

            // Types
            NodeKind::TSTypeAnnotation(annotation) => self.emit_type_annotation(annotation),
            NodeKind::TSTypeReference(reference) => self.emit_type_reference(reference),
            NodeKind::TSTypeParameterInstantiation(inst) => self.emit_type_arguments(&inst.params),
            NodeKind::TSQualifiedName(name) => self.emit_qualified_name(name),
            NodeKind::TSArrayType(array) => {
                self.emit_node(&array.element_type)?;
                self.write("[]");
                Ok(())
            }
            NodeKind::TSVoidKeyword => self.write_ok("void"),
            NodeKind::TSAnyKeyword | NodeKind::TSJSDocAllType => self.write_ok("any"),
            NodeKind::TSNumberKeyword => self.write_ok("number"),
            NodeKind::TSStringKeyword => self.write_ok("string"),
            NodeKind::TSBooleanKeyword => self.write_ok("boolean"),
            NodeKind::TSNullKeyword => self.write_ok("null"),
            NodeKind::TSUndefinedKeyword => self.write_ok("undefined"),

            // Recognized, never translated
            NodeKind::AwaitExpression
            | NodeKind::YieldExpression
            | NodeKind::TemplateLiteral
            | NodeKind::TemplateElement
            | NodeKind::TaggedTemplateExpression
            | NodeKind::MetaProperty
            | NodeKind::ArrayPattern
            | NodeKind::ObjectPattern
            | NodeKind::Decorator
            | NodeKind::LabeledStatement
            | NodeKind::WithStatement
            | NodeKind::ExportAllDeclaration
            | NodeKind::ExportSpecifier
            | NodeKind::TSEnumDeclaration
            | NodeKind::TSTypeAssertion => self.unsupported(node, node.category()),

            NodeKind::Unknown(unknown) => self.unrecognized(node, &unknown.node_type),
        }
    }
}
