//! Common types and utilities for the as2ts transpiler.
//!
//! This crate provides foundational types used across all as2ts crates:
//! - Line/column positions as reported by the syntax-tree producer
//! - The diagnostic taxonomy (codes, categories, message templates)

// Position/Range types for line/column source locations
pub mod position;
pub use position::{Position, SourceLocation};

// Diagnostic taxonomy shared by the emitter and the orchestrator
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticKind, format_message};

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
