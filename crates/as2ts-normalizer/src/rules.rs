//! The ordered rewrite rules.
//!
//! Later rules rely on earlier ones having run: the constructor rename must
//! see `function <Class>(` before `function` keywords are stripped, and the
//! `for each` rewrite expects `Vector.<T>` to already read `Array<T>`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

use crate::ANONYMOUS_PACKAGE_NAME;

/// One named text rewrite.
#[derive(Clone, Copy)]
pub struct RewriteRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Cow<'_, str>,
}

impl std::fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteRule").field("name", &self.name).finish()
    }
}

/// All rules in the order they must run.
pub static RULES: [RewriteRule; 12] = [
    RewriteRule { name: "constructor-rename", apply: rename_constructor },
    RewriteRule { name: "strip-final", apply: strip_final },
    RewriteRule { name: "export-public-types", apply: export_public_types },
    RewriteRule { name: "package-to-module", apply: package_to_module },
    RewriteRule { name: "destructure-imports", apply: destructure_imports },
    RewriteRule { name: "strip-field-var", apply: strip_field_var },
    RewriteRule { name: "strip-override", apply: strip_override },
    RewriteRule { name: "strip-function-keyword", apply: strip_function_keyword },
    RewriteRule { name: "is-to-instanceof", apply: is_to_instanceof },
    RewriteRule { name: "vector-to-array", apply: vector_to_array },
    RewriteRule { name: "for-each-to-for-of", apply: for_each_to_for_of },
    RewriteRule { name: "new-shorthands", apply: new_shorthands },
];

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("rewrite rule pattern is a valid regex")
}

/// Apply several `(pattern, replacement)` pairs one after another, only
/// allocating once something actually changed.
fn replace_in_sequence<'a>(text: &'a str, steps: &[(&Regex, &str)]) -> Cow<'a, str> {
    let mut current = Cow::Borrowed(text);
    for (pattern, replacement) in steps {
        let next = match pattern.replace_all(current.as_ref(), *replacement) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(next) => next,
        };
        current = Cow::Owned(next);
    }
    current
}

// =============================================================================
// 1. Constructor rename
// =============================================================================

static CLASS_NAME: Lazy<Regex> = Lazy::new(|| regex(r"\bclass\s+(\w+)"));

/// `function <ClassName>(` becomes `function constructor(`.
pub fn rename_constructor(text: &str) -> Cow<'_, str> {
    let Some(caps) = CLASS_NAME.captures(text) else {
        return Cow::Borrowed(text);
    };
    let pattern = format!(r"\bfunction\s+{}\s*\(", regex::escape(&caps[1]));
    let Ok(ctor) = Regex::new(&pattern) else {
        return Cow::Borrowed(text);
    };
    ctor.replacen(text, 1, "function constructor(")
}

// =============================================================================
// 2-4. Declaration keywords
// =============================================================================

static FINAL: Lazy<Regex> = Lazy::new(|| regex(r"\bfinal\b\s+"));

pub fn strip_final(text: &str) -> Cow<'_, str> {
    FINAL.replace_all(text, "")
}

static PUBLIC_TYPE: Lazy<Regex> = Lazy::new(|| regex(r"\bpublic\s+(class|interface)\b"));

pub fn export_public_types(text: &str) -> Cow<'_, str> {
    PUBLIC_TYPE.replace_all(text, "export ${1}")
}

static PACKAGE: Lazy<Regex> = Lazy::new(|| regex(r"\bpackage\b(\s*\{|\s)"));

/// Only the first `package` keyword is rewritten. An anonymous package gets a
/// placeholder name so the result is a valid module declaration.
pub fn package_to_module(text: &str) -> Cow<'_, str> {
    PACKAGE.replacen(text, 1, |caps: &Captures<'_>| {
        if caps[1].trim() == "{" {
            format!("module {ANONYMOUS_PACKAGE_NAME} {{")
        } else {
            format!("module{}", &caps[1])
        }
    })
}

// =============================================================================
// 5. Imports
// =============================================================================

static IMPORT_LINE: Lazy<Regex> =
    Lazy::new(|| regex(r"(?m)^([ \t]*)import[ \t]+((?:\w+\.)*\w+)[ \t]*(?:;[^\r\n]*)?\r?$"));

/// `import a.b.C;` becomes `import {C} from "a/b/C";`. Wildcard imports are
/// left alone.
pub fn destructure_imports(text: &str) -> Cow<'_, str> {
    IMPORT_LINE.replace_all(text, |caps: &Captures<'_>| {
        let qualified = &caps[2];
        let name = qualified.rsplit('.').next().unwrap_or(qualified);
        format!(
            "{}import {{{}}} from \"{}\";",
            &caps[1],
            name,
            qualified.replace('.', "/")
        )
    })
}

// =============================================================================
// 6-8. Member modifiers
// =============================================================================

static FIELD_VAR: Lazy<Regex> =
    Lazy::new(|| regex(r"\b(public|protected|private|static)\s+var\b"));
static FIELD_CONST: Lazy<Regex> =
    Lazy::new(|| regex(r"\b(public|protected|private|static)\s+const\b"));

/// Field declarations keep their modifiers and lose `var`; `const` fields
/// become `readonly`.
pub fn strip_field_var(text: &str) -> Cow<'_, str> {
    replace_in_sequence(
        text,
        &[(&*FIELD_VAR, "${1}"), (&*FIELD_CONST, "${1} readonly")],
    )
}

static OVERRIDE_AFTER: Lazy<Regex> =
    Lazy::new(|| regex(r"\b(public|protected|private)\s+override\b"));
static OVERRIDE_BEFORE: Lazy<Regex> =
    Lazy::new(|| regex(r"\boverride\s+(public|protected|private)\b"));

pub fn strip_override(text: &str) -> Cow<'_, str> {
    replace_in_sequence(text, &[(&*OVERRIDE_AFTER, "${1}"), (&*OVERRIDE_BEFORE, "${1}")])
}

static MODIFIER_FUNCTION: Lazy<Regex> =
    Lazy::new(|| regex(r"\b(public|protected|private|static)\s+function\b"));
static BARE_FUNCTION: Lazy<Regex> =
    Lazy::new(|| regex(r"(^|\s)function\s+((?:(?:get|set)\s+)?\w+\s*\()"));

/// Methods and named free functions lose the `function` keyword. Anonymous
/// function expressions (`function(`) keep it.
pub fn strip_function_keyword(text: &str) -> Cow<'_, str> {
    replace_in_sequence(
        text,
        &[(&*MODIFIER_FUNCTION, "${1}"), (&*BARE_FUNCTION, "${1}${2}")],
    )
}

// =============================================================================
// 9-12. Expressions and statements
// =============================================================================

static IS_IN_IF: Lazy<Regex> = Lazy::new(|| regex(r"\bif\s?\((.+)\s+is\s+(\S+)\)"));
static IS_IN_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| regex(r"([^=!<>]=)\s*([^=;\r\n]+?)\s+is\s+([\w.]+)"));

pub fn is_to_instanceof(text: &str) -> Cow<'_, str> {
    replace_in_sequence(
        text,
        &[
            (&*IS_IN_IF, "if(${1} instanceof ${2})"),
            (&*IS_IN_ASSIGNMENT, "${1} ${2} instanceof ${3}"),
        ],
    )
}

static VECTOR_GENERIC: Lazy<Regex> = Lazy::new(|| regex(r"\bVector\.<"));
static VECTOR_PREFIX: Lazy<Regex> = Lazy::new(|| regex(r"\bVector\."));

pub fn vector_to_array(text: &str) -> Cow<'_, str> {
    replace_in_sequence(text, &[(&*VECTOR_GENERIC, "Array<"), (&*VECTOR_PREFIX, "Array.")])
}

static FOR_EACH_DECLARED: Lazy<Regex> = Lazy::new(|| {
    regex(r"\bfor\s+each\s*\(\s*(?:var|let)\s+(\w+)(?:\s*:\s*[\w.<>*]+)?\s+in\s+")
});
static FOR_EACH_BARE: Lazy<Regex> = Lazy::new(|| regex(r"\bfor\s+each\s*\(\s*(\w+)\s+in\s+"));

pub fn for_each_to_for_of(text: &str) -> Cow<'_, str> {
    replace_in_sequence(
        text,
        &[
            (&*FOR_EACH_DECLARED, "for (let ${1} of "),
            (&*FOR_EACH_BARE, "for (${1} of "),
        ],
    )
}

static NEW_ARRAY_NO_PARENS: Lazy<Regex> = Lazy::new(|| regex(r"\bnew\s+Array<([\w.<>]+)>\s*;"));
static NEW_TYPED_LITERAL: Lazy<Regex> = Lazy::new(|| regex(r"\bnew\s*<[\w.]+>\s*\["));

pub fn new_shorthands(text: &str) -> Cow<'_, str> {
    replace_in_sequence(
        text,
        &[
            (&*NEW_ARRAY_NO_PARENS, "new Array<${1}>();"),
            (&*NEW_TYPED_LITERAL, "["),
        ],
    )
}
