use crate::member_index::*;
use as2ts_syntax::Node;
use serde_json::json;

fn program() -> Node {
    let tree = json!({
        "type": "Program",
        "body": [{
            "type": "TSModuleDeclaration",
            "id": { "type": "Identifier", "name": "game" },
            "body": {
                "type": "TSModuleBlock",
                "body": [{
                    "type": "ExportNamedDeclaration",
                    "declaration": {
                        "type": "ClassDeclaration",
                        "id": { "type": "Identifier", "name": "Hero" },
                        "superClass": {
                            "type": "MemberExpression",
                            "object": { "type": "Identifier", "name": "base" },
                            "property": { "type": "Identifier", "name": "Unit" },
                            "computed": false
                        },
                        "body": {
                            "type": "ClassBody",
                            "body": [
                                {
                                    "type": "ClassProperty",
                                    "key": { "type": "Identifier", "name": "hp" }
                                },
                                {
                                    "type": "MethodDefinition",
                                    "kind": "constructor",
                                    "key": { "type": "Identifier", "name": "constructor" },
                                    "value": { "type": "FunctionExpression", "params": [] }
                                },
                                {
                                    "type": "MethodDefinition",
                                    "kind": "get",
                                    "key": { "type": "Identifier", "name": "alive" },
                                    "value": { "type": "FunctionExpression", "params": [] }
                                },
                                {
                                    "type": "MethodDefinition",
                                    "kind": "set",
                                    "key": { "type": "Identifier", "name": "alive" },
                                    "value": { "type": "FunctionExpression", "params": [] }
                                }
                            ]
                        }
                    }
                }]
            }
        }]
    });
    serde_json::from_value(tree).unwrap()
}

fn entry(name: &str, super_class: Option<&str>, properties: &[&str]) -> ClassEntry {
    ClassEntry {
        name: name.to_string(),
        file: format!("{name}.as"),
        super_class: super_class.map(str::to_string),
        properties: properties.iter().map(|p| p.to_string()).collect(),
        methods: Vec::new(),
    }
}

#[test]
fn test_collect_finds_nested_exported_class() {
    let mut index = MemberIndex::new();
    assert_eq!(index.collect(&program(), "game/Hero.as"), 1);

    let hero = index.get("Hero").unwrap();
    assert_eq!(hero.file, "game/Hero.as");
    assert_eq!(hero.super_class.as_deref(), Some("Unit"));
    assert_eq!(hero.properties, vec!["hp".to_string()]);
    // Accessor pairs count once; constructors never.
    assert_eq!(hero.methods, vec!["alive".to_string()]);
}

#[test]
fn test_inherited_member_follows_extends_chain() {
    let mut index = MemberIndex::new();
    index.insert(entry("A", None, &["root"]));
    index.insert(entry("B", Some("A"), &[]));
    index.insert(entry("C", Some("B"), &["own"]));
    assert!(index.has_inherited_member("C", "root"));
    assert!(index.has_inherited_member("C", "own"));
    assert!(!index.has_inherited_member("C", "missing"));
    assert!(!index.has_inherited_member("Unknown", "root"));
}

#[test]
fn test_inheritance_cycle_terminates() {
    let mut index = MemberIndex::new();
    index.insert(entry("A", Some("B"), &[]));
    index.insert(entry("B", Some("A"), &[]));
    assert!(!index.has_inherited_member("A", "x"));
}

#[test]
fn test_later_declaration_wins() {
    let mut index = MemberIndex::new();
    index.insert(entry("A", None, &["old"]));
    index.insert(entry("A", None, &["new"]));
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("A").unwrap().properties, vec!["new".to_string()]);
}

#[test]
fn test_json_persistence() {
    let mut index = MemberIndex::new();
    index.collect(&program(), "game/Hero.as");
    let json = index.to_json_string_pretty().unwrap();
    assert!(json.contains("\"superClass\": \"Unit\""));
    let restored = MemberIndex::from_json_str(&json).unwrap();
    assert_eq!(restored, index);
}

#[test]
fn test_display_dump() {
    let mut index = MemberIndex::new();
    index.insert(entry("B", Some("A"), &["x", "y"]));
    assert_eq!(
        index.to_string(),
        "B (B.as) extends A\n    properties: x, y\n    methods: \n"
    );
}
