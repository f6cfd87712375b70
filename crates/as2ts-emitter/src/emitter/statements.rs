//! Statement lists, control flow and variable declarations.

use as2ts_common::DiagnosticKind;
use as2ts_syntax::{
    Argument, CatchClause, For, ForIn, If, Jump, Loop, Node, NodeKind, Switch, SwitchCase, Try,
    VariableDeclaration, VariableDeclarator,
};

use super::Printer;
use crate::context::EmitFlags;
use crate::error::EmitResult;
use crate::precedence::{Operand, PrecedenceTable};

/// Whether `node`, emitted as a statement, is followed by `;`.
fn needs_terminator(node: &Node) -> bool {
    match &node.kind {
        NodeKind::ExpressionStatement(_)
        | NodeKind::VariableDeclaration(_)
        | NodeKind::ReturnStatement(_)
        | NodeKind::ThrowStatement(_)
        | NodeKind::BreakStatement(_)
        | NodeKind::ContinueStatement(_)
        | NodeKind::DoWhileStatement(_)
        | NodeKind::DebuggerStatement
        | NodeKind::ImportDeclaration(_) => true,
        NodeKind::ExportNamedDeclaration(export) => {
            export.declaration.as_deref().is_none_or(needs_terminator)
        }
        NodeKind::ExportDefaultDeclaration(export) => !matches!(
            export.declaration.kind,
            NodeKind::FunctionDeclaration(_)
                | NodeKind::ClassDeclaration(_)
                | NodeKind::TSInterfaceDeclaration(_)
        ),
        _ => false,
    }
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Emit statements one per line. Returns whether anything was written.
    pub(super) fn emit_statements(&mut self, statements: &[Node]) -> EmitResult<bool> {
        self.emit_statement_list(statements, false)
    }

    /// `wrote_any` says whether the current line already holds a statement
    /// the next one must be separated from.
    fn emit_statement_list<'n>(
        &mut self,
        statements: impl IntoIterator<Item = &'n Node>,
        mut wrote_any: bool,
    ) -> EmitResult<bool> {
        for statement in statements {
            if matches!(statement.kind, NodeKind::EmptyStatement) {
                continue;
            }
            let mark = self.writer.len();
            if wrote_any {
                self.write_line();
            }
            let start = self.writer.len();
            self.emit_node(statement)?;
            if self.writer.len() == start {
                // Nothing came out (e.g. a reported construct); drop the separator.
                self.writer.truncate(mark);
                continue;
            }
            if needs_terminator(statement) {
                self.write(";");
            }
            wrote_any = true;
        }
        Ok(wrote_any)
    }

    /// `{ … }` around a block's statements, with `prologue` as the first
    /// line when given. An empty block prints `{}`.
    pub(super) fn emit_block(&mut self, prologue: Option<&str>, statements: &[Node]) -> EmitResult {
        self.write("{");
        let mark = self.writer.len();
        self.increase_indent();
        self.write_line();
        let mut wrote_any = false;
        if let Some(prologue) = prologue {
            self.write(prologue);
            wrote_any = true;
        }
        let wrote_any = self.emit_statement_list(statements, wrote_any)?;
        self.decrease_indent();
        if wrote_any {
            self.write_line();
        } else {
            self.writer.truncate(mark);
        }
        self.write_ok("}")
    }

    /// A statement position that always gets braces: a block prints as is,
    /// any other statement is wrapped in one.
    pub(super) fn emit_braced(&mut self, node: &Node) -> EmitResult {
        match &node.kind {
            NodeKind::BlockStatement(body) => self.emit_block(None, &body.body),
            _ => self.emit_block(None, std::slice::from_ref(node)),
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(super) fn emit_if(&mut self, stmt: &If) -> EmitResult {
        self.write("if (");
        self.emit_node(&stmt.test)?;
        self.write(") ");
        self.emit_braced(&stmt.consequent)?;
        let Some(alternate) = stmt.alternate.as_deref() else {
            return Ok(());
        };
        match &alternate.kind {
            NodeKind::IfStatement(_) => {
                self.write(" else ");
                self.emit_node(alternate)
            }
            NodeKind::BlockStatement(body) if body.body.is_empty() => Ok(()),
            _ => {
                self.write(" else ");
                self.emit_braced(alternate)
            }
        }
    }

    /// Every case ends in a synthesized `break;`, so fallthrough is lost and
    /// explicit breaks in the source are dropped rather than doubled.
    pub(super) fn emit_switch(&mut self, stmt: &Switch) -> EmitResult {
        self.write("switch (");
        self.emit_node(&stmt.discriminant)?;
        self.write(") {");
        self.increase_indent();
        for case in &stmt.cases {
            self.write_line();
            self.emit_node(case)?;
        }
        self.decrease_indent();
        if !stmt.cases.is_empty() {
            self.write_line();
        }
        self.write_ok("}")
    }

    pub(super) fn emit_switch_case(&mut self, case: &SwitchCase) -> EmitResult {
        match case.test.as_deref() {
            Some(test) => {
                self.write("case ");
                self.emit_node(test)?;
                self.write(":");
            }
            None => self.write("default:"),
        }
        self.increase_indent();
        self.write_line();

        let mark = self.writer.len();
        self.write("{");
        self.increase_indent();
        self.write_line();
        let body = case
            .consequent
            .iter()
            .filter(|stmt| !matches!(stmt.kind, NodeKind::BreakStatement(_)));
        let wrote_any = self.emit_statement_list(body, false)?;
        self.decrease_indent();
        if wrote_any {
            self.write_line();
            self.write("}");
            self.write_line();
        } else {
            self.writer.truncate(mark);
        }
        self.write("break;");
        self.decrease_indent();
        Ok(())
    }

    pub(super) fn emit_for(&mut self, stmt: &For) -> EmitResult {
        self.write("for (");
        if let Some(init) = stmt.init.as_deref() {
            self.emit_node(init)?;
        }
        self.write(";");
        if let Some(test) = stmt.test.as_deref() {
            self.write(" ");
            self.emit_node(test)?;
        }
        self.write(";");
        if let Some(update) = stmt.update.as_deref() {
            self.write(" ");
            self.emit_node(update)?;
        }
        self.write(") ");
        self.emit_braced(&stmt.body)
    }

    pub(super) fn emit_for_in(&mut self, stmt: &ForIn, keyword: &str) -> EmitResult {
        self.write("for (");
        self.emit_node(&stmt.left)?;
        self.write(" ");
        self.write(keyword);
        self.write(" ");
        self.emit_node(&stmt.right)?;
        self.write(") ");
        self.emit_braced(&stmt.body)
    }

    pub(super) fn emit_while(&mut self, stmt: &Loop) -> EmitResult {
        self.write("while (");
        self.emit_node(&stmt.test)?;
        self.write(") ");
        self.emit_braced(&stmt.body)
    }

    pub(super) fn emit_do_while(&mut self, stmt: &Loop) -> EmitResult {
        self.write("do ");
        self.emit_braced(&stmt.body)?;
        self.write(" while (");
        self.emit_node(&stmt.test)?;
        self.write_ok(")")
    }

    pub(super) fn emit_jump(&mut self, keyword: &str, jump: &Jump) -> EmitResult {
        self.write(keyword);
        if let Some(label) = jump.label.as_deref() {
            self.write(" ");
            self.emit_with(label, EmitFlags::member_property())?;
        }
        Ok(())
    }

    pub(super) fn emit_return(&mut self, ret: &Argument) -> EmitResult {
        self.write("return");
        if let Some(argument) = ret.argument.as_deref() {
            self.write(" ");
            self.emit_node(argument)?;
        }
        Ok(())
    }

    pub(super) fn emit_throw(&mut self, node: &Node, throw: &Argument) -> EmitResult {
        let Some(argument) = throw.argument.as_deref() else {
            return self.report(node, DiagnosticKind::MissingRequiredField, &["Thrown value"]);
        };
        self.write("throw ");
        self.emit_node(argument)
    }

    pub(super) fn emit_try(&mut self, stmt: &Try) -> EmitResult {
        self.write("try ");
        self.emit_braced(&stmt.block)?;
        if let Some(handler) = stmt.handler.as_deref() {
            self.write(" ");
            self.emit_node(handler)?;
        }
        if let Some(finalizer) = stmt.finalizer.as_deref() {
            self.write(" finally ");
            self.emit_braced(finalizer)?;
        }
        Ok(())
    }

    /// `catch (e) { … }`. The binding's type annotation is dropped: a catch
    /// variable cannot be annotated with a concrete type.
    pub(super) fn emit_catch(&mut self, clause: &CatchClause) -> EmitResult {
        self.write("catch");
        if let Some(param) = clause.param.as_deref() {
            self.write(" (");
            match &param.kind {
                NodeKind::Identifier(ident) => {
                    let options = self.options;
                    let name = options.rename_identifier(&ident.name);
                    self.ctx.scope.declare_local(name);
                    self.write(name);
                }
                _ => self.emit_with(param, EmitFlags::declaration_name())?,
            }
            self.write(")");
        }
        self.write(" ");
        self.emit_braced(&clause.body)
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub(super) fn emit_variable_declaration(
        &mut self,
        decl: &VariableDeclaration,
        flags: EmitFlags,
    ) -> EmitResult {
        if flags.exported {
            self.write("export ");
        }
        self.write(if decl.kind == "const" { "const " } else { "let " });
        self.emit_comma_list(&decl.declarations, EmitFlags::new())
    }

    pub(super) fn emit_variable_declarator(&mut self, decl: &VariableDeclarator) -> EmitResult {
        self.emit_with(&decl.id, EmitFlags::declaration_name())?;
        if let Some(init) = decl.init.as_deref() {
            self.write(" = ");
            let comma = PrecedenceTable::comma_rank();
            self.emit_operand(init, comma, Operand::Tight)?;
        }
        Ok(())
    }
}
