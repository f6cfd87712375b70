//! Lexical normalization of AS3 source text.
//!
//! AS3 is close enough to TypeScript that a generic TypeScript parser accepts
//! it once a handful of AS3-only spellings are rewritten: package and import
//! forms, field and method modifiers, `is`, `Vector.<T>`, `for each`, and a
//! couple of `new` shorthands. This crate performs those rewrites as an
//! ordered list of pure text transformations. It never fails: a rule that
//! finds nothing to rewrite leaves the text untouched.

pub mod rules;
pub use rules::{RULES, RewriteRule};

use std::borrow::Cow;
use tracing::{debug, trace};

/// Placeholder module name given to an anonymous `package { … }`.
pub const ANONYMOUS_PACKAGE_NAME: &str = "__package";

/// Run every rewrite rule, in order, over `source`.
pub fn normalize(source: &str) -> String {
    let mut text = Cow::Borrowed(source);
    let mut applied = 0usize;
    for rule in RULES.iter() {
        let rewritten = match (rule.apply)(text.as_ref()) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        if rewritten != *text {
            trace!(rule = rule.name, "rewrite rule applied");
            applied += 1;
        }
        text = Cow::Owned(rewritten);
    }
    debug!(applied, "normalized source text");
    text.into_owned()
}

/// Convenience wrapper carrying no state; mirrors the other pipeline stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxNormalizer;

impl SyntaxNormalizer {
    pub fn new() -> Self {
        SyntaxNormalizer
    }

    pub fn normalize(&self, source: &str) -> String {
        normalize(source)
    }
}

#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod rules_tests;
