//! Operator precedence.
//!
//! Ranks are small integers: 0 binds tightest. A node's rank comes from a
//! canonical pattern string (`"… + …"`, `"new … ( … )"`, `"! …"`) looked up
//! in a table built once per process.

use as2ts_syntax::{Node, NodeKind};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Rank of anything that is not an operator expression: identifiers,
/// literals, `this`, object and array literals, function expressions.
pub const PRIMARY_RANK: u32 = 0;

/// Rank given to an operator pattern missing from the table. Loosest of all,
/// so such a child is always parenthesized.
pub const UNKNOWN_RANK: u32 = 999;

const GROUPS: &[&[&str]] = &[
    &["( … )"],
    &["… . …", "… [ … ]", "new … ( … )", "… ( … )"],
    &["new …"],
    &["… ++", "… --"],
    &[
        "! …", "~ …", "+ …", "- …", "++ …", "-- …", "typeof …", "void …", "delete …", "await …",
    ],
    &["… ** …"],
    &["… * …", "… / …", "… % …"],
    &["… + …", "… - …"],
    &["… << …", "… >> …", "… >>> …"],
    &["… < …", "… <= …", "… > …", "… >= …", "… in …", "… instanceof …"],
    &["… == …", "… != …", "… === …", "… !== …"],
    &["… & …"],
    &["… ^ …"],
    &["… | …"],
    &["… && …"],
    &["… || …", "… ?? …"],
    &["… ? … : …"],
    &[
        "… = …", "… += …", "… -= …", "… *= …", "… /= …", "… %= …", "… **= …", "… <<= …",
        "… >>= …", "… >>>= …", "… &= …", "… ^= …", "… |= …", "… &&= …", "… ||= …", "… ??= …",
    ],
    &["yield …", "yield* …"],
    &["..."],
    &["… , …"],
];

/// The operator pattern → rank table.
#[derive(Debug)]
pub struct PrecedenceTable {
    ranks: FxHashMap<&'static str, u32>,
}

static TABLE: Lazy<PrecedenceTable> = Lazy::new(PrecedenceTable::build);

impl PrecedenceTable {
    fn build() -> Self {
        let mut ranks = FxHashMap::default();
        for (rank, group) in GROUPS.iter().enumerate() {
            for pattern in group.iter() {
                ranks.insert(*pattern, rank as u32);
            }
        }
        PrecedenceTable { ranks }
    }

    /// The process-wide table.
    pub fn global() -> &'static PrecedenceTable {
        &TABLE
    }

    pub fn rank(&self, pattern: &str) -> Option<u32> {
        self.ranks.get(pattern).copied()
    }

    /// Rank of `pattern`, or `None` if the table has no entry for it.
    pub fn lookup(pattern: &str) -> Option<u32> {
        Self::global().rank(pattern)
    }

    pub fn assignment_rank() -> u32 {
        Self::lookup("… = …").unwrap_or(UNKNOWN_RANK)
    }

    /// Rank of the comma operator. Items of argument lists, array literals
    /// and declarator lists wrap against it.
    pub fn comma_rank() -> u32 {
        Self::lookup("… , …").unwrap_or(UNKNOWN_RANK)
    }
}

/// How an operand relates to the operator that contains it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Wrapped when its rank is strictly looser than the parent's.
    Loose,
    /// Wrapped when its rank is looser than or equal to the parent's.
    Tight,
}

impl Operand {
    pub fn needs_parens(self, child_rank: u32, parent_rank: u32) -> bool {
        match self {
            Operand::Loose => child_rank > parent_rank,
            Operand::Tight => child_rank >= parent_rank,
        }
    }
}

/// Operators that group right-to-left: `**` and every assignment form.
pub fn is_right_associative(node: &Node) -> bool {
    match &node.kind {
        NodeKind::AssignmentExpression(_) => true,
        NodeKind::BinaryExpression(binary) => binary.operator == "**",
        _ => false,
    }
}

/// The canonical pattern of an operator node, or `None` for primaries.
///
/// `TSAsExpression` is transparent: the cast is dropped on output, so it
/// takes the rank of what it wraps and has no pattern of its own.
pub fn operator_pattern(node: &Node) -> Option<String> {
    let pattern = match &node.kind {
        NodeKind::UnaryExpression(unary) | NodeKind::UpdateExpression(unary) => {
            if unary.prefix {
                format!("{} …", unary.operator)
            } else {
                format!("… {}", unary.operator)
            }
        }
        NodeKind::BinaryExpression(binary)
        | NodeKind::LogicalExpression(binary)
        | NodeKind::AssignmentExpression(binary) => format!("… {} …", binary.operator),
        NodeKind::MemberExpression(member) => {
            if member.computed {
                "… [ … ]".to_string()
            } else {
                "… . …".to_string()
            }
        }
        NodeKind::ConditionalExpression(_) => "… ? … : …".to_string(),
        NodeKind::CallExpression(_) => "… ( … )".to_string(),
        NodeKind::NewExpression(call) => {
            if call.arguments.is_empty() {
                "new …".to_string()
            } else {
                "new … ( … )".to_string()
            }
        }
        NodeKind::SequenceExpression(_) => "… , …".to_string(),
        NodeKind::SpreadElement(_) => "...".to_string(),
        NodeKind::YieldExpression => "yield …".to_string(),
        NodeKind::AwaitExpression => "await …".to_string(),
        NodeKind::ArrowFunctionExpression(_) => "… = …".to_string(),
        _ => return None,
    };
    Some(pattern)
}
