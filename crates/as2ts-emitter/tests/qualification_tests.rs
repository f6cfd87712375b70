//! Receiver prefixes for bare references to class members.

mod support;

use as2ts_emitter::{ClassEntry, MemberIndex};
use serde_json::json;
use support::*;

/// The body of the only method of the only class in `out`.
fn method_body(out: &str) -> &str {
    let start = out.rfind(") {").expect("method header") + 3;
    let end = out[start..].find("\n    }").expect("method end") + start;
    out[start..end].trim()
}

#[test]
fn test_property_gets_this_prefix() {
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            property("speed", "Number", false),
            method(
                "run",
                "method",
                vec![],
                vec![expr(assign(id("speed"), binary("*", id("speed"), num(2))))],
            ),
        ],
    )]));
    assert_eq!(method_body(&out), "this.speed = this.speed * 2;");
}

#[test]
fn test_parameter_shadows_property() {
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            property("x", "int", false),
            method(
                "setX",
                "method",
                vec![id("x")],
                vec![expr(assign(member(json!({ "type": "ThisExpression" }), "x"), id("x")))],
            ),
        ],
    )]));
    assert_eq!(method_body(&out), "this.x = x;");
}

#[test]
fn test_local_shadows_property() {
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            property("count", "int", false),
            method(
                "tick",
                "method",
                vec![],
                vec![
                    let_decl(id("count"), Some(num(0))),
                    expr(call(id("use"), vec![id("count")])),
                ],
            ),
        ],
    )]));
    assert_eq!(method_body(&out), "let count = 0;\n        use(count);");
}

#[test]
fn test_member_declared_later_is_not_qualified() {
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            method("reset", "method", vec![], vec![expr(assign(id("hp"), num(0)))]),
            property("hp", "int", false),
        ],
    )]));
    assert!(out.contains("public reset() {\n        hp = 0;\n    }"));
}

#[test]
fn test_earlier_method_is_qualified() {
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            method("update", "method", vec![], vec![]),
            method("tick", "method", vec![], vec![expr(call(id("update"), vec![]))]),
        ],
    )]));
    assert_eq!(method_body(&out), "this.update();");
}

#[test]
fn test_static_member_gets_class_prefix() {
    let out = emit(program(vec![class(
        "Config",
        None,
        vec![
            property("DEBUG", "Boolean", true),
            static_method("toggle", vec![], vec![expr(assign(
                id("DEBUG"),
                json!({ "type": "UnaryExpression", "operator": "!", "prefix": true, "argument": id("DEBUG") }),
            ))]),
        ],
    )]));
    assert_eq!(method_body(&out), "Config.DEBUG = !Config.DEBUG;");
}

#[test]
fn test_member_property_and_object_key_are_never_qualified() {
    let object = json!({
        "type": "ObjectExpression",
        "properties": [{ "type": "Property", "key": id("name"), "value": id("name") }]
    });
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            property("name", "String", false),
            method(
                "describe",
                "method",
                vec![id("other")],
                vec![ret(call(id("pack"), vec![member(id("other"), "name"), object]))],
            ),
        ],
    )]));
    assert_eq!(method_body(&out), "return pack(other.name, {name: this.name});");
}

#[test]
fn test_computed_member_key_is_qualified() {
    let lookup = json!({
        "type": "MemberExpression",
        "object": id("table"),
        "property": id("key"),
        "computed": true
    });
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            property("key", "String", false),
            method("get", "method", vec![id("table")], vec![ret(lookup)]),
        ],
    )]));
    assert_eq!(method_body(&out), "return table[this.key];");
}

#[test]
fn test_closure_parameter_shadows_member() {
    let arrow = json!({
        "type": "ArrowFunctionExpression",
        "params": [id("value")],
        "expression": true,
        "body": binary("+", id("value"), id("offset"))
    });
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![
            property("value", "int", false),
            property("offset", "int", false),
            method("mapper", "method", vec![], vec![ret(arrow)]),
        ],
    )]));
    assert_eq!(method_body(&out), "return (value) => value + this.offset;");
}

#[test]
fn test_property_initializer_is_not_qualified() {
    let mut second = property("b", "int", false);
    second["value"] = id("a");
    let out = emit(program(vec![class(
        "Foo",
        None,
        vec![property("a", "int", false), second],
    )]));
    assert!(out.contains("private b: number = a;"));
}

#[test]
fn test_inherited_member_through_index() {
    let mut index = MemberIndex::new();
    index.insert(ClassEntry {
        name: "Base".to_string(),
        file: "pkg/Base.as".to_string(),
        properties: vec!["hp".to_string()],
        methods: vec!["heal".to_string()],
        ..Default::default()
    });
    let body = vec![
        expr(call(id("heal"), vec![])),
        expr(assign(id("hp"), num(1))),
        expr(call(id("unknown"), vec![])),
    ];
    let source = program(vec![class(
        "Hero",
        Some("Base"),
        vec![method("revive", "method", vec![], body)],
    )]);

    let indexed = emit_indexed(index, source.clone());
    assert_eq!(
        method_body(&indexed),
        "this.heal();\n        this.hp = 1;\n        unknown();"
    );

    let plain = emit(source);
    assert_eq!(method_body(&plain), "heal();\n        hp = 1;\n        unknown();");
}

#[test]
fn test_grandparent_member_through_index() {
    let mut index = MemberIndex::new();
    index.insert(ClassEntry {
        name: "Entity".to_string(),
        file: "pkg/Entity.as".to_string(),
        properties: vec!["id".to_string()],
        ..Default::default()
    });
    index.insert(ClassEntry {
        name: "Unit".to_string(),
        file: "pkg/Unit.as".to_string(),
        super_class: Some("Entity".to_string()),
        ..Default::default()
    });
    let out = emit_indexed(
        index,
        program(vec![class(
            "Hero",
            Some("Unit"),
            vec![method("key", "method", vec![], vec![ret(id("id"))])],
        )]),
    );
    assert_eq!(method_body(&out), "return this.id;");
}

#[test]
fn test_top_level_function_is_never_qualified() {
    let func = json!({
        "type": "FunctionDeclaration",
        "id": id("helper"),
        "params": [],
        "body": block(vec![ret(id("speed"))])
    });
    assert_eq!(
        emit(program(vec![func])),
        "function helper() {\n    return speed;\n}"
    );
}
