//! Syntax tree model for normalized AS3 source.
//!
//! The tree is produced by an external TypeScript parser and arrives as
//! ESTree / typescript-estree JSON. This crate turns that JSON into an
//! exhaustive [`NodeKind`] enum so the emitter can dispatch with a plain
//! `match`, and writes it back out for the Analyse to Make hand-off.
//!
//! Node categories that are not modelled still deserialize: they become
//! [`NodeKind::Unknown`] carrying their tag and raw JSON, and it is up to the
//! consumer to report them.

pub mod error;
pub mod node;
pub mod visit;

pub use error::SyntaxError;
pub use node::*;

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod node_tests;
