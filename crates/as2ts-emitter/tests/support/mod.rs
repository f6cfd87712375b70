//! `serde_json::json!` builders for ESTree fragments.

#![allow(dead_code)]

use as2ts_emitter::{CodeEmitter, EmitOutput, EmitResult, EmitterOptions, MemberIndex};
use as2ts_syntax::Node;
use serde_json::{Value, json};

pub const FILE: &str = "pkg/Test.as";

pub fn tree(value: Value) -> Node {
    serde_json::from_value(value).expect("valid test tree")
}

pub fn emit_with(options: EmitterOptions, program: Value) -> EmitResult<EmitOutput> {
    CodeEmitter::new(options).emit(&tree(program), FILE)
}

pub fn emit_indexed(index: MemberIndex, program: Value) -> String {
    CodeEmitter::new(EmitterOptions::default())
        .with_member_index(index)
        .emit(&tree(program), FILE)
        .expect("emission succeeds")
        .text
}

/// Emit with default options and return the text.
pub fn emit(program: Value) -> String {
    emit_with(EmitterOptions::default(), program)
        .expect("emission succeeds")
        .text
}

pub fn program(body: Vec<Value>) -> Value {
    json!({ "type": "Program", "sourceType": "module", "body": body })
}

pub fn id(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

pub fn typed_id(name: &str, type_name: &str) -> Value {
    json!({ "type": "Identifier", "name": name, "typeAnnotation": annotation(type_name) })
}

pub fn annotation(type_name: &str) -> Value {
    json!({
        "type": "TSTypeAnnotation",
        "typeAnnotation": { "type": "TSTypeReference", "typeName": id(type_name) }
    })
}

pub fn num(n: i64) -> Value {
    json!({ "type": "Literal", "raw": n.to_string(), "value": n })
}

pub fn string(s: &str) -> Value {
    json!({ "type": "Literal", "raw": format!("\"{s}\""), "value": s })
}

pub fn binary(operator: &str, left: Value, right: Value) -> Value {
    json!({ "type": "BinaryExpression", "operator": operator, "left": left, "right": right })
}

pub fn assign(left: Value, right: Value) -> Value {
    json!({ "type": "AssignmentExpression", "operator": "=", "left": left, "right": right })
}

pub fn call(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "type": "CallExpression", "callee": callee, "arguments": arguments })
}

pub fn new_expr(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "type": "NewExpression", "callee": callee, "arguments": arguments })
}

pub fn member(object: Value, property: &str) -> Value {
    json!({ "type": "MemberExpression", "object": object, "property": id(property), "computed": false })
}

pub fn expr(expression: Value) -> Value {
    json!({ "type": "ExpressionStatement", "expression": expression })
}

pub fn block(body: Vec<Value>) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

pub fn ret(argument: Value) -> Value {
    json!({ "type": "ReturnStatement", "argument": argument })
}

pub fn let_decl(id: Value, init: Option<Value>) -> Value {
    json!({
        "type": "VariableDeclaration",
        "kind": "var",
        "declarations": [{ "type": "VariableDeclarator", "id": id, "init": init }]
    })
}

pub fn class(name: &str, super_class: Option<&str>, members: Vec<Value>) -> Value {
    json!({
        "type": "ClassDeclaration",
        "id": id(name),
        "superClass": super_class.map(id),
        "implements": [],
        "body": { "type": "ClassBody", "body": members }
    })
}

pub fn export(declaration: Value) -> Value {
    json!({ "type": "ExportNamedDeclaration", "declaration": declaration, "specifiers": [] })
}

pub fn property(name: &str, type_name: &str, is_static: bool) -> Value {
    json!({
        "type": "ClassProperty",
        "key": id(name),
        "accessibility": "private",
        "static": is_static,
        "typeAnnotation": annotation(type_name)
    })
}

pub fn method(name: &str, kind: &str, params: Vec<Value>, body: Vec<Value>) -> Value {
    json!({
        "type": "MethodDefinition",
        "kind": kind,
        "key": id(name),
        "accessibility": "public",
        "static": false,
        "value": {
            "type": "FunctionExpression",
            "params": params,
            "body": block(body)
        }
    })
}

pub fn static_method(name: &str, params: Vec<Value>, body: Vec<Value>) -> Value {
    let mut value = method(name, "method", params, body);
    value["static"] = json!(true);
    value
}
