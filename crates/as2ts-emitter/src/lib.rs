//! TypeScript code generation from normalized AS3 syntax trees.
//!
//! [`CodeEmitter::emit`] walks one file's tree and produces its TypeScript
//! text. Along the way it
//! - parenthesizes operands by operator precedence ([`precedence`]),
//! - qualifies bare references to class members ([`scope`]), and
//! - collects the type names the file uses so it can prepend imports for
//!   them ([`type_imports`]).
//!
//! All per-file state lives in an [`EmitContext`] created by `emit`, so one
//! emitter can serve many files, also from several threads at once.

pub mod context;
pub mod emitter;
pub mod error;
pub mod member_index;
pub mod options;
pub mod precedence;
pub mod scope;
pub mod source_writer;
pub mod type_imports;

pub use context::{EmitContext, EmitFlags};
pub use emitter::{CodeEmitter, EmitOutput};
pub use error::{EmitError, EmitResult};
pub use member_index::{ClassEntry, MemberIndex};
pub use options::{EmitterOptions, ImportRule, default_type_mapper};
pub use precedence::PrecedenceTable;
pub use scope::{ClassInfo, FunctionInfo, ScopeResolver};
pub use source_writer::SourceWriter;
pub use type_imports::TypeImportResolver;

#[cfg(test)]
#[path = "tests/precedence_tests.rs"]
mod precedence_tests;

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;

#[cfg(test)]
#[path = "tests/type_imports_tests.rs"]
mod type_imports_tests;

#[cfg(test)]
#[path = "tests/member_index_tests.rs"]
mod member_index_tests;

#[cfg(test)]
#[path = "tests/source_writer_tests.rs"]
mod source_writer_tests;
