//! Line/column positions attached to syntax-tree nodes.
//!
//! Positions follow the ESTree convention: lines are 1-indexed and columns
//! are 0-indexed. They are only used for diagnostics.

use serde::{Deserialize, Serialize};

/// A position in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-indexed line number (0 when unknown)
    pub line: u32,
    /// 0-indexed column
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// The `loc` record of a node: where it starts and ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub start: Position,
    #[serde(default)]
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        SourceLocation { start, end }
    }

    /// A location known only by its starting point.
    pub fn at(line: u32, column: u32) -> Self {
        let start = Position::new(line, column);
        SourceLocation { start, end: start }
    }
}
