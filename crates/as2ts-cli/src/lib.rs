//! The `as2ts` batch driver.
//!
//! Translation runs in two phases over a source tree:
//! - **Analyse** normalizes every `.as` file, hands it to an external ESTree
//!   parser, persists the tree under the temp root and collects the
//!   cross-file member index.
//! - **Make** reloads each persisted tree and emits its TypeScript file.
//!
//! Make can be re-run on its own once Analyse has finished.

pub mod args;
pub mod checkpoint;
pub mod config;
pub mod driver;
pub mod fs;
pub mod parser;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/checkpoint_tests.rs"]
mod checkpoint_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/fs_tests.rs"]
mod fs_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
