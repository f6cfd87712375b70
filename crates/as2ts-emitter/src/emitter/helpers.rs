//! Output helpers, precedence lookups and the diagnostic funnel.

use as2ts_common::{Diagnostic, DiagnosticKind};
use as2ts_syntax::{Node, NodeKind};
use tracing::{error, trace, warn};

use super::Printer;
use crate::context::EmitFlags;
use crate::error::{EmitError, EmitResult};
use crate::precedence::{Operand, PRIMARY_RANK, PrecedenceTable, UNKNOWN_RANK, operator_pattern};

impl<'a> Printer<'a> {
    // =========================================================================
    // Writing
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_ok(&mut self, text: &str) -> EmitResult {
        self.writer.write(text);
        Ok(())
    }

    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// Emit `node` and hand back its text instead of leaving it in the
    /// output. Callers write it back with `write_raw` if they keep it.
    pub(super) fn capture(&mut self, node: &Node, flags: EmitFlags) -> EmitResult<String> {
        let mark = self.writer.mark();
        self.emit_with(node, flags)?;
        Ok(self.writer.split_off(mark))
    }

    pub(super) fn write_raw(&mut self, text: &str) {
        self.writer.write_raw(text);
    }

    /// `a, b, c` with every item emitted under `flags`.
    pub(super) fn emit_comma_list(&mut self, nodes: &[Node], flags: EmitFlags) -> EmitResult {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_with(node, flags)?;
        }
        Ok(())
    }

    /// Call and `new` arguments. Only a bare sequence needs wrapping.
    pub(super) fn emit_arguments(&mut self, args: &[Node]) -> EmitResult {
        let comma = PrecedenceTable::comma_rank();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_operand(arg, comma, Operand::Tight)?;
        }
        Ok(())
    }

    /// `(a: T, b = 1, ...rest)`, registering every binding as a parameter.
    pub(super) fn emit_params(&mut self, params: &[Node]) -> EmitResult {
        self.write("(");
        self.emit_comma_list(params, EmitFlags::function_parameter())?;
        self.write(")");
        Ok(())
    }

    /// `: T` for an optional annotation node.
    pub(super) fn emit_annotation(&mut self, annotation: Option<&Node>) -> EmitResult {
        if let Some(annotation) = annotation {
            self.write(": ");
            self.emit_node(annotation)?;
        }
        Ok(())
    }

    // =========================================================================
    // Precedence
    // =========================================================================

    /// The precedence rank of `node`, memoized for the rest of the file.
    ///
    /// A pattern missing from the table is reported once and treated as the
    /// loosest rank.
    pub(super) fn rank(&mut self, node: &Node) -> EmitResult<u32> {
        if let NodeKind::TSAsExpression(cast) = &node.kind {
            return self.rank(&cast.expression);
        }
        if let Some(rank) = self.ctx.cached_rank(node) {
            return Ok(rank);
        }
        let rank = match operator_pattern(node) {
            None => PRIMARY_RANK,
            Some(pattern) => match PrecedenceTable::lookup(&pattern) {
                Some(rank) => rank,
                None => {
                    self.report(node, DiagnosticKind::UnknownOperatorPriority, &[&pattern])?;
                    UNKNOWN_RANK
                }
            },
        };
        trace!(category = node.category(), rank, "rank computed");
        self.ctx.remember_rank(node, rank);
        Ok(rank)
    }

    /// Emit an operand of an operator with rank `parent_rank`, wrapping it in
    /// parentheses when it binds more loosely.
    pub(super) fn emit_operand(
        &mut self,
        child: &Node,
        parent_rank: u32,
        operand: Operand,
    ) -> EmitResult {
        let wrap = operand.needs_parens(self.rank(child)?, parent_rank);
        if wrap {
            self.write("(");
        }
        self.emit_node(child)?;
        if wrap {
            self.write(")");
        }
        Ok(())
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record a diagnostic at `node`.
    ///
    /// Errors abort the file when `terminate_on_error` is set; otherwise
    /// emission continues and the offending node produces no text.
    pub(super) fn report(
        &mut self,
        node: &Node,
        kind: DiagnosticKind,
        args: &[&str],
    ) -> EmitResult {
        let diagnostic = Diagnostic::new(
            kind,
            self.ctx.relative_path.as_str(),
            node.line(),
            node.column(),
            args,
        );
        if diagnostic.is_error() {
            error!(
                file = %diagnostic.file,
                line = diagnostic.line,
                column = diagnostic.column,
                code = diagnostic.code,
                "{}",
                diagnostic.message_text
            );
        } else {
            warn!(
                file = %diagnostic.file,
                line = diagnostic.line,
                column = diagnostic.column,
                code = diagnostic.code,
                "{}",
                diagnostic.message_text
            );
        }
        if self.options.error_detail {
            match node.to_json_string_pretty() {
                Ok(dump) => error!(node = %dump, "offending node"),
                Err(err) => warn!(%err, "could not dump offending node"),
            }
        }

        let fatal = diagnostic.is_error() && self.options.terminate_on_error;
        self.ctx.diagnostics.push(diagnostic.clone());
        if fatal {
            return Err(EmitError::Terminated(Box::new(diagnostic)));
        }
        Ok(())
    }

    pub(super) fn unsupported(&mut self, node: &Node, what: &str) -> EmitResult {
        self.report(node, DiagnosticKind::UnsupportedConstruct, &[what])
    }

    /// Report `what` as unsupported when `present` holds.
    pub(super) fn reject_if(&mut self, present: bool, node: &Node, what: &str) -> EmitResult {
        if present {
            self.unsupported(node, what)?;
        }
        Ok(())
    }

    pub(super) fn unrecognized(&mut self, node: &Node, tag: &str) -> EmitResult {
        self.report(node, DiagnosticKind::UnrecognizedNode, &[tag])
    }
}
