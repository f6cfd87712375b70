//! Expressions: identifiers, literals, operators, calls.

use as2ts_syntax::{
    ArrayExpression, AssignmentPattern, Binary, Call, Conditional, Function, Identifier, Literal,
    Member, Node, NodeKind, ObjectExpression, Property, Sequence, Spread, Unary,
};

use super::Printer;
use crate::context::EmitFlags;
use crate::error::EmitResult;
use crate::precedence::{Operand, PrecedenceTable, is_right_associative};

/// The escape hatch: `__JS__("code")` emits `code` verbatim.
const RAW_CODE_CALLEE: &str = "__JS__";

impl<'a> Printer<'a> {
    // =========================================================================
    // Names and literals
    // =========================================================================

    pub(super) fn emit_identifier(&mut self, ident: &Identifier, flags: EmitFlags) -> EmitResult {
        let options = self.options;
        let name = options.rename_identifier(&ident.name);

        if flags.type_position {
            let mapped = options.map_type(name);
            self.ctx.type_imports.record(mapped);
            self.write(mapped);
        } else {
            if flags.function_parameter {
                self.ctx.scope.declare_param(name);
            } else if flags.declaration_name {
                self.ctx.scope.declare_local(name);
            } else if !flags.member_property
                && !flags.object_key
                && let Some(prefix) = self.ctx.scope.qualifier(name, self.member_index)
            {
                self.write(&prefix);
            }
            self.write(name);
        }

        if ident.optional {
            self.write("?");
        }
        self.emit_annotation(ident.type_annotation.as_deref())
    }

    pub(super) fn emit_literal(&mut self, lit: &Literal) -> EmitResult {
        let options = self.options;
        if lit.raw.is_empty() {
            let text = lit.value.to_string();
            self.write(options.rename_literal(&text));
        } else {
            self.write(options.rename_literal(&lit.raw));
        }
        Ok(())
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub(super) fn emit_unary(&mut self, node: &Node, unary: &Unary) -> EmitResult {
        let rank = self.rank(node)?;
        if unary.prefix {
            self.write(&unary.operator);
            if unary.operator.chars().all(|c| c.is_ascii_alphabetic()) {
                self.write(" ");
            }
            self.emit_operand(&unary.argument, rank, Operand::Tight)
        } else {
            self.emit_operand(&unary.argument, rank, Operand::Tight)?;
            self.write_ok(&unary.operator)
        }
    }

    pub(super) fn emit_update(&mut self, node: &Node, update: &Unary) -> EmitResult {
        self.emit_unary(node, update)
    }

    /// Binary, logical and assignment expressions.
    ///
    /// For left-associative operators the left operand only wraps when it is
    /// strictly looser, so `(a - b) - c` prints as `a - b - c` while
    /// `a - (b - c)` keeps its parentheses. Right-associative operators
    /// mirror this.
    pub(super) fn emit_binary(&mut self, node: &Node, binary: &Binary) -> EmitResult {
        let rank = self.rank(node)?;
        let (left, right) = if is_right_associative(node) {
            (Operand::Tight, Operand::Loose)
        } else {
            (Operand::Loose, Operand::Tight)
        };
        self.emit_operand(&binary.left, rank, left)?;
        self.write(" ");
        self.write(&binary.operator);
        self.write(" ");
        self.emit_operand(&binary.right, rank, right)
    }

    pub(super) fn emit_conditional(&mut self, node: &Node, cond: &Conditional) -> EmitResult {
        let rank = self.rank(node)?;
        self.emit_operand(&cond.test, rank, Operand::Tight)?;
        self.write(" ? ");
        self.emit_operand(&cond.consequent, rank, Operand::Tight)?;
        self.write(" : ");
        self.emit_operand(&cond.alternate, rank, Operand::Tight)
    }

    pub(super) fn emit_sequence(&mut self, node: &Node, seq: &Sequence) -> EmitResult {
        let rank = self.rank(node)?;
        for (i, expr) in seq.expressions.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_operand(expr, rank, Operand::Loose)?;
        }
        Ok(())
    }

    pub(super) fn emit_spread(&mut self, node: &Node, spread: &Spread) -> EmitResult {
        let rank = self.rank(node)?;
        self.write("...");
        self.emit_operand(&spread.argument, rank, Operand::Loose)
    }

    /// `...rest` in a parameter list or binding.
    pub(super) fn emit_rest(&mut self, rest: &Spread, flags: EmitFlags) -> EmitResult {
        self.write("...");
        self.emit_with(&rest.argument, flags.binding())?;
        self.emit_annotation(rest.type_annotation.as_deref())
    }

    /// `name = default` in a parameter list or binding.
    pub(super) fn emit_assignment_pattern(
        &mut self,
        pattern: &AssignmentPattern,
        flags: EmitFlags,
    ) -> EmitResult {
        self.emit_with(&pattern.left, flags.binding())?;
        self.write(" = ");
        self.emit_node(&pattern.right)
    }

    // =========================================================================
    // Member access and calls
    // =========================================================================

    pub(super) fn emit_member(&mut self, node: &Node, member: &Member) -> EmitResult {
        let rank = self.rank(node)?;
        self.emit_operand(&member.object, rank, Operand::Loose)?;
        if member.computed {
            self.write(if member.optional { "?.[" } else { "[" });
            // A computed key is an ordinary expression and may need a receiver.
            self.emit_node(&member.property)?;
            self.write_ok("]")
        } else {
            self.write(if member.optional { "?." } else { "." });
            self.emit_with(&member.property, EmitFlags::member_property())
        }
    }

    pub(super) fn emit_call(&mut self, node: &Node, call: &Call) -> EmitResult {
        if call.callee.as_identifier() == Some(RAW_CODE_CALLEE) {
            return self.emit_raw_code(call);
        }
        let rank = self.rank(node)?;
        self.emit_operand(&call.callee, rank, Operand::Loose)?;
        if let Some(args) = call.type_args() {
            self.emit_node(args)?;
        }
        self.write(if call.optional { "?.(" } else { "(" });
        self.emit_arguments(&call.arguments)?;
        self.write_ok(")")
    }

    fn emit_raw_code(&mut self, call: &Call) -> EmitResult {
        let Some(first) = call.arguments.first() else {
            return Ok(());
        };
        match first.as_string_literal() {
            Some(code) => self.write(code),
            None => {
                let text = self.capture(first, EmitFlags::new())?;
                self.write_raw(strip_quotes(&text));
            }
        }
        Ok(())
    }

    /// `new C<T>(args)`.
    ///
    /// `new Array(...)` of any arity becomes `[]`, and `new RegExp(...)`
    /// collapses to its first argument (normally a regex literal already).
    pub(super) fn emit_new(&mut self, node: &Node, call: &Call) -> EmitResult {
        let rank = self.rank(node)?;
        let callee = {
            let mark = self.writer.mark();
            if has_call_in_chain(&call.callee) {
                // Without parentheses the call would take the `new` arguments.
                self.write("(");
                self.emit_node(&call.callee)?;
                self.write(")");
            } else {
                self.emit_operand(&call.callee, rank, Operand::Loose)?;
            }
            self.writer.split_off(mark)
        };
        match callee.as_str() {
            "Array" => self.write_ok("[]"),
            "RegExp" => match call.arguments.first() {
                Some(pattern) => self.emit_node(pattern),
                None => Ok(()),
            },
            _ => {
                self.write("new ");
                self.write_raw(&callee);
                if let Some(args) = call.type_args() {
                    self.emit_node(args)?;
                }
                self.write("(");
                self.emit_arguments(&call.arguments)?;
                self.write_ok(")")
            }
        }
    }

    // =========================================================================
    // Literals with children
    // =========================================================================

    pub(super) fn emit_array(&mut self, array: &ArrayExpression) -> EmitResult {
        let comma = PrecedenceTable::comma_rank();
        self.write("[");
        for (i, element) in array.elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(element) = element {
                self.emit_operand(element, comma, Operand::Tight)?;
            }
        }
        self.write_ok("]")
    }

    pub(super) fn emit_object(&mut self, object: &ObjectExpression) -> EmitResult {
        if object.properties.is_empty() {
            return self.write_ok("{}");
        }
        self.write("{");
        self.emit_comma_list(&object.properties, EmitFlags::new())?;
        self.write_ok("}")
    }

    /// One object literal entry. Shorthand entries are spelled out so the
    /// value can pick up a receiver prefix.
    pub(super) fn emit_property(&mut self, prop: &Property) -> EmitResult {
        if prop.computed {
            self.write("[");
            self.emit_node(&prop.key)?;
            self.write("]");
        } else {
            self.emit_with(&prop.key, EmitFlags::object_key())?;
        }
        self.write(": ");
        self.emit_node(&prop.value)
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    pub(super) fn emit_arrow(&mut self, node: &Node, func: &Function) -> EmitResult {
        self.ctx.scope.enter_function("", false, false);
        self.emit_params(&func.params)?;
        self.emit_annotation(func.return_type.as_deref())?;
        self.write(" => ");
        match func.body.as_deref() {
            Some(body) if matches!(body.kind, NodeKind::BlockStatement(_)) => {
                self.emit_braced(body)?;
            }
            Some(body) => {
                let wrap = matches!(body.kind, NodeKind::ObjectExpression(_))
                    || self.rank(body)? > PrecedenceTable::assignment_rank();
                if wrap {
                    self.write("(");
                }
                self.emit_node(body)?;
                if wrap {
                    self.write(")");
                }
            }
            None => self.unsupported(node, "ArrowFunctionExpression without body")?,
        }
        self.ctx.scope.exit_function();
        Ok(())
    }
}

/// Whether a call appears along `node`'s member chain, as in `a.b().c`.
fn has_call_in_chain(node: &Node) -> bool {
    match &node.kind {
        NodeKind::CallExpression(_) => true,
        NodeKind::MemberExpression(member) => has_call_in_chain(&member.object),
        _ => false,
    }
}

fn strip_quotes(text: &str) -> &str {
    let quoted = text.len() >= 2
        && (text.starts_with('"') && text.ends_with('"')
            || text.starts_with('\'') && text.ends_with('\''));
    if quoted { &text[1..text.len() - 1] } else { text }
}
