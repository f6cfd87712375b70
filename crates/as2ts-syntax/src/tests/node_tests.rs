use super::*;
use serde_json::json;

fn parse(value: serde_json::Value) -> Node {
    serde_json::from_value(value).expect("valid node")
}

#[test]
fn test_identifier_with_loc() {
    let node = parse(json!({
        "type": "Identifier",
        "name": "foo",
        "loc": { "start": { "line": 3, "column": 4 }, "end": { "line": 3, "column": 7 } }
    }));
    assert_eq!(node.as_identifier(), Some("foo"));
    assert_eq!(node.line(), 3);
    assert_eq!(node.column(), 4);
}

#[test]
fn test_missing_loc_defaults_to_zero() {
    let node = parse(json!({ "type": "ThisExpression" }));
    assert_eq!(node.kind, NodeKind::ThisExpression);
    assert_eq!(node.line(), 0);
}

#[test]
fn test_unknown_tag_keeps_name() {
    let node = parse(json!({ "type": "ChainExpression", "expression": null }));
    assert_eq!(node.category(), "ChainExpression");
    assert!(matches!(node.kind, NodeKind::Unknown(_)));
}

#[test]
fn test_property_definition_alias() {
    let node = parse(json!({
        "type": "PropertyDefinition",
        "key": { "type": "Identifier", "name": "x" },
        "value": null,
        "accessibility": "private"
    }));
    let NodeKind::ClassProperty(prop) = &node.kind else {
        panic!("expected ClassProperty, got {}", node.category());
    };
    assert_eq!(prop.accessibility.as_deref(), Some("private"));
    assert!(!prop.is_static);
    assert_eq!(node.category(), "ClassProperty");
}

#[test]
fn test_method_kind_defaults_to_method() {
    let node = parse(json!({
        "type": "MethodDefinition",
        "key": { "type": "Identifier", "name": "f" },
        "value": { "type": "FunctionExpression", "params": [], "body": { "type": "BlockStatement", "body": [] } }
    }));
    let NodeKind::MethodDefinition(method) = &node.kind else {
        panic!("expected MethodDefinition");
    };
    assert_eq!(method.kind, MethodKind::Method);
}

#[test]
fn test_unary_prefix_defaults_to_true() {
    let node = parse(json!({
        "type": "UnaryExpression",
        "operator": "!",
        "argument": { "type": "Identifier", "name": "a" }
    }));
    let NodeKind::UnaryExpression(unary) = &node.kind else {
        panic!("expected UnaryExpression");
    };
    assert!(unary.prefix);
}

#[test]
fn test_for_each_child_order() {
    let node = parse(json!({
        "type": "BinaryExpression",
        "operator": "-",
        "left": { "type": "Identifier", "name": "a" },
        "right": { "type": "Identifier", "name": "b" }
    }));
    let mut names = Vec::new();
    node.for_each_child(&mut |child| names.extend(child.as_identifier()));
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_descendants_pre_order() {
    let node = parse(json!({
        "type": "ExpressionStatement",
        "expression": {
            "type": "CallExpression",
            "callee": { "type": "Super" },
            "arguments": [{ "type": "Identifier", "name": "x" }]
        }
    }));
    let categories: Vec<&str> = node.descendants().iter().map(|n| n.category()).collect();
    assert_eq!(
        categories,
        vec!["ExpressionStatement", "CallExpression", "Super", "Identifier"]
    );
}

#[test]
fn test_find_descendant_respects_descend() {
    let node = parse(json!({
        "type": "BlockStatement",
        "body": [{
            "type": "ExpressionStatement",
            "expression": { "type": "Super" }
        }]
    }));
    fn is_super(n: &Node) -> bool {
        matches!(n.kind, NodeKind::Super)
    }
    assert!(node.find_descendant(&mut is_super, &mut |_| true).is_some());
    assert!(node.find_descendant(&mut is_super, &mut |_| false).is_none());
}

#[test]
fn test_program_root_is_required() {
    let err = Node::program_from_json_str(r#"{"type":"Identifier","name":"a"}"#).unwrap_err();
    assert!(matches!(err, SyntaxError::NotAProgram(ref tag) if tag == "Identifier"));
}
