use crate::type_imports::*;

#[test]
fn test_builtins_are_never_recorded() {
    let mut resolver = TypeImportResolver::new();
    for name in ["number", "string", "boolean", "any", "Array", "Object", "void"] {
        resolver.record(name);
    }
    assert_eq!(resolver.referenced().count(), 0);
}

#[test]
fn test_record_keeps_first_seen_order_without_duplicates() {
    let mut resolver = TypeImportResolver::new();
    resolver.record("A");
    resolver.record("B");
    resolver.record("A");
    assert_eq!(resolver.referenced().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_imported_names_are_not_pending() {
    let mut resolver = TypeImportResolver::new();
    resolver.record("Sprite");
    resolver.record("Point");
    resolver.mark_imported("Sprite");
    assert_eq!(resolver.pending(), vec!["Point"]);
}

#[test]
fn test_module_dir() {
    assert_eq!(TypeImportResolver::module_dir("game/ui/Button.as"), "game/ui/");
    assert_eq!(TypeImportResolver::module_dir("game\\ui\\Button.as"), "game/ui/");
    assert_eq!(TypeImportResolver::module_dir("Main.as"), "./");
}

#[test]
fn test_imports_are_prepended_in_reverse_discovery_order() {
    let mut resolver = TypeImportResolver::new();
    resolver.record("A");
    resolver.record("B");
    let text = resolver.prepend_imports("class C {}".to_string(), "pkg/C.as");
    assert_eq!(
        text,
        "import {B} from \"pkg/B\";\nimport {A} from \"pkg/A\";\nclass C {}"
    );
}

#[test]
fn test_nothing_pending_leaves_body_alone() {
    let resolver = TypeImportResolver::new();
    assert_eq!(resolver.prepend_imports("x".to_string(), "a/b.as"), "x");
}

#[test]
fn test_reset_clears_everything() {
    let mut resolver = TypeImportResolver::new();
    resolver.record("A");
    resolver.mark_imported("B");
    resolver.reset();
    assert!(resolver.pending().is_empty());
    assert!(!resolver.is_imported("B"));
}
