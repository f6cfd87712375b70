//! Child traversal.

use crate::node::*;

fn visit_opt<'a>(node: &'a Option<Box<Node>>, f: &mut dyn FnMut(&'a Node)) {
    if let Some(node) = node {
        f(node);
    }
}

fn visit_all<'a>(nodes: &'a [Node], f: &mut dyn FnMut(&'a Node)) {
    for node in nodes {
        f(node);
    }
}

fn visit_function<'a>(func: &'a Function, f: &mut dyn FnMut(&'a Node)) {
    visit_opt(&func.id, f);
    visit_all(&func.params, f);
    visit_opt(&func.return_type, f);
    visit_opt(&func.body, f);
}

impl Node {
    /// Call `f` on every direct child of this node, in source order.
    ///
    /// Unit categories (keywords, and the ones the emitter rejects) and
    /// unknown nodes have no visible children.
    pub fn for_each_child<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        match &self.kind {
            NodeKind::Program(body)
            | NodeKind::BlockStatement(body)
            | NodeKind::ClassBody(body)
            | NodeKind::TSModuleBlock(body)
            | NodeKind::TSInterfaceBody(body) => visit_all(&body.body, f),

            NodeKind::Identifier(ident) => visit_opt(&ident.type_annotation, f),
            NodeKind::ArrayExpression(array) => {
                for element in array.elements.iter().flatten() {
                    f(element);
                }
            }
            NodeKind::ObjectExpression(object) => visit_all(&object.properties, f),
            NodeKind::Property(prop) => {
                f(&prop.key);
                f(&prop.value);
            }
            NodeKind::FunctionExpression(func)
            | NodeKind::ArrowFunctionExpression(func)
            | NodeKind::FunctionDeclaration(func)
            | NodeKind::TSDeclareFunction(func)
            | NodeKind::TSEmptyBodyFunctionExpression(func) => visit_function(func, f),
            NodeKind::ClassExpression(class) | NodeKind::ClassDeclaration(class) => {
                visit_opt(&class.id, f);
                visit_opt(&class.super_class, f);
                visit_all(&class.implements, f);
                f(&class.body);
            }
            NodeKind::UnaryExpression(unary) | NodeKind::UpdateExpression(unary) => {
                f(&unary.argument);
            }
            NodeKind::BinaryExpression(binary)
            | NodeKind::LogicalExpression(binary)
            | NodeKind::AssignmentExpression(binary) => {
                f(&binary.left);
                f(&binary.right);
            }
            NodeKind::ConditionalExpression(cond) => {
                f(&cond.test);
                f(&cond.consequent);
                f(&cond.alternate);
            }
            NodeKind::CallExpression(call) | NodeKind::NewExpression(call) => {
                f(&call.callee);
                if let Some(args) = call.type_args() {
                    f(args);
                }
                visit_all(&call.arguments, f);
            }
            NodeKind::MemberExpression(member) => {
                f(&member.object);
                f(&member.property);
            }
            NodeKind::SequenceExpression(seq) => visit_all(&seq.expressions, f),
            NodeKind::SpreadElement(spread) | NodeKind::RestElement(spread) => {
                f(&spread.argument);
                visit_opt(&spread.type_annotation, f);
            }
            NodeKind::AssignmentPattern(pattern) => {
                f(&pattern.left);
                f(&pattern.right);
            }
            NodeKind::TSAsExpression(cast) => {
                f(&cast.expression);
                f(&cast.type_annotation);
            }

            NodeKind::ExpressionStatement(stmt) => f(&stmt.expression),
            NodeKind::IfStatement(stmt) => {
                f(&stmt.test);
                f(&stmt.consequent);
                visit_opt(&stmt.alternate, f);
            }
            NodeKind::SwitchStatement(stmt) => {
                f(&stmt.discriminant);
                visit_all(&stmt.cases, f);
            }
            NodeKind::SwitchCase(case) => {
                visit_opt(&case.test, f);
                visit_all(&case.consequent, f);
            }
            NodeKind::ForStatement(stmt) => {
                visit_opt(&stmt.init, f);
                visit_opt(&stmt.test, f);
                visit_opt(&stmt.update, f);
                f(&stmt.body);
            }
            NodeKind::ForInStatement(stmt) | NodeKind::ForOfStatement(stmt) => {
                f(&stmt.left);
                f(&stmt.right);
                f(&stmt.body);
            }
            NodeKind::WhileStatement(stmt) => {
                f(&stmt.test);
                f(&stmt.body);
            }
            NodeKind::DoWhileStatement(stmt) => {
                f(&stmt.body);
                f(&stmt.test);
            }
            NodeKind::BreakStatement(jump) | NodeKind::ContinueStatement(jump) => {
                visit_opt(&jump.label, f);
            }
            NodeKind::ReturnStatement(arg) | NodeKind::ThrowStatement(arg) => {
                visit_opt(&arg.argument, f);
            }
            NodeKind::TryStatement(stmt) => {
                f(&stmt.block);
                visit_opt(&stmt.handler, f);
                visit_opt(&stmt.finalizer, f);
            }
            NodeKind::CatchClause(clause) => {
                visit_opt(&clause.param, f);
                f(&clause.body);
            }
            NodeKind::VariableDeclaration(decl) => visit_all(&decl.declarations, f),
            NodeKind::VariableDeclarator(decl) => {
                f(&decl.id);
                visit_opt(&decl.init, f);
            }

            NodeKind::ClassProperty(prop) => {
                f(&prop.key);
                visit_opt(&prop.type_annotation, f);
                visit_opt(&prop.value, f);
            }
            NodeKind::MethodDefinition(method) | NodeKind::TSAbstractMethodDefinition(method) => {
                f(&method.key);
                f(&method.value);
            }
            NodeKind::ImportDeclaration(import) => {
                visit_all(&import.specifiers, f);
                f(&import.source);
            }
            NodeKind::ImportSpecifier(spec) => {
                f(&spec.imported);
                visit_opt(&spec.local, f);
            }
            NodeKind::ImportDefaultSpecifier(binding)
            | NodeKind::ImportNamespaceSpecifier(binding) => f(&binding.local),
            NodeKind::ExportNamedDeclaration(export) => {
                visit_opt(&export.declaration, f);
                visit_all(&export.specifiers, f);
                visit_opt(&export.source, f);
            }
            NodeKind::ExportDefaultDeclaration(export) => f(&export.declaration),
            NodeKind::TSModuleDeclaration(module) => {
                f(&module.id);
                visit_opt(&module.body, f);
            }
            NodeKind::TSInterfaceDeclaration(iface) => {
                f(&iface.id);
                visit_all(&iface.heritage, f);
                f(&iface.body);
            }
            NodeKind::TSInterfaceHeritage(heritage) | NodeKind::TSClassImplements(heritage) => {
                f(&heritage.expression);
                if let Some(args) = heritage.type_args() {
                    f(args);
                }
            }
            NodeKind::TSMethodSignature(sig) => {
                f(&sig.key);
                visit_all(&sig.params, f);
                visit_opt(&sig.return_type, f);
            }
            NodeKind::TSPropertySignature(sig) => {
                f(&sig.key);
                visit_opt(&sig.type_annotation, f);
            }

            NodeKind::TSTypeAnnotation(annotation) => f(&annotation.type_annotation),
            NodeKind::TSTypeReference(reference) => {
                f(&reference.type_name);
                if let Some(args) = reference.type_args() {
                    f(args);
                }
            }
            NodeKind::TSTypeParameterInstantiation(inst) => visit_all(&inst.params, f),
            NodeKind::TSQualifiedName(name) => {
                f(&name.left);
                f(&name.right);
            }
            NodeKind::TSArrayType(array) => f(&array.element_type),

            NodeKind::Literal(_)
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::TSVoidKeyword
            | NodeKind::TSAnyKeyword
            | NodeKind::TSNumberKeyword
            | NodeKind::TSStringKeyword
            | NodeKind::TSBooleanKeyword
            | NodeKind::TSNullKeyword
            | NodeKind::TSUndefinedKeyword
            | NodeKind::TSJSDocAllType
            | NodeKind::AwaitExpression
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
            | NodeKind::TSTypeAssertion
            | NodeKind::Unknown(_) => {}
        }
    }

    /// Depth-first search over this node's descendants (not the node itself).
    ///
    /// `descend` decides whether the children of a visited node are searched;
    /// it is consulted after `pred` has rejected that node.
    pub fn find_descendant<'a>(
        &'a self,
        pred: &mut dyn FnMut(&Node) -> bool,
        descend: &mut dyn FnMut(&Node) -> bool,
    ) -> Option<&'a Node> {
        let mut found = None;
        self.for_each_child(&mut |child| {
            if found.is_some() {
                return;
            }
            if pred(child) {
                found = Some(child);
            } else if descend(child) {
                found = child.find_descendant(pred, descend);
            }
        });
        found
    }

    /// This node and all of its descendants, in pre-order.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_preorder(&mut out);
        out
    }

    fn collect_preorder<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        self.for_each_child(&mut |child| child.collect_preorder(out));
    }
}
