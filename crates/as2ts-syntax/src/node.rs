//! Node types.
//!
//! Every ESTree category the emitter understands is one variant of
//! [`NodeKind`]. Categories with an identical shape share one payload struct
//! (`BinaryExpression`, `LogicalExpression` and `AssignmentExpression` all
//! carry a [`Binary`], for example). Categories the emitter only ever rejects
//! are unit variants: their attributes are never read.

use as2ts_common::SourceLocation;
use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SyntaxError;

/// Stack reserved for one top-level parse. Trees nest one frame group per
/// level, and generated code can chain hundreds of operators.
const PARSE_STACK_SIZE: usize = 64 * 1024 * 1024;
/// Remaining stack below which nested node parsing grows a new segment.
const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

// =============================================================================
// Node
// =============================================================================

/// One syntax tree node: its category-specific payload plus where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub loc: SourceLocation,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            loc: SourceLocation::default(),
        }
    }

    pub fn with_loc(kind: NodeKind, loc: SourceLocation) -> Self {
        Node { kind, loc }
    }

    /// The ESTree tag of this node, e.g. `"BinaryExpression"`.
    pub fn category(&self) -> &str {
        self.kind.category()
    }

    pub fn line(&self) -> u32 {
        self.loc.start.line
    }

    pub fn column(&self) -> u32 {
        self.loc.start.column
    }

    /// Parse any node (not necessarily a `Program`) from JSON text.
    ///
    /// Nesting depth is unbounded; deep trees grow the stack instead of
    /// failing.
    pub fn from_json_str(json: &str) -> Result<Node, SyntaxError> {
        stacker::grow(PARSE_STACK_SIZE, || -> Result<Node, SyntaxError> {
            let mut deserializer = serde_json::Deserializer::from_str(json);
            deserializer.disable_recursion_limit();
            let node = Node::deserialize(&mut deserializer)?;
            deserializer.end()?;
            Ok(node)
        })
    }

    /// Parse a whole file's tree, rejecting anything but a `Program` root.
    pub fn program_from_json_str(json: &str) -> Result<Node, SyntaxError> {
        let node = Node::from_json_str(json)?;
        match node.kind {
            NodeKind::Program(_) => Ok(node),
            _ => Err(SyntaxError::NotAProgram(node.category().to_string())),
        }
    }

    pub fn to_json_string(&self) -> Result<String, SyntaxError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, SyntaxError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The identifier name, if this node is an `Identifier`.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    /// The string value of a string literal.
    pub fn as_string_literal(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Literal(lit) => lit.value.as_str(),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || node_from_value(deserializer))
    }
}

fn node_from_value<'de, D>(deserializer: D) -> Result<Node, D::Error>
where
    D: Deserializer<'de>,
{
    let mut value = Value::deserialize(deserializer)?;
    let loc = match value.get_mut("loc") {
        Some(loc) if !loc.is_null() => {
            SourceLocation::deserialize(loc.take()).map_err(de::Error::custom)?
        }
        _ => SourceLocation::default(),
    };
    let node_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| de::Error::missing_field("type"))?
        .to_string();

    let kind = if NodeKind::is_known_tag(&node_type) {
        NodeKind::deserialize(value).map_err(de::Error::custom)?
    } else {
        tracing::trace!(tag = %node_type, "unrecognized node tag");
        NodeKind::Unknown(UnknownNode {
            node_type,
            raw: value,
        })
    };
    Ok(Node { kind, loc })
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut value = match &self.kind {
            NodeKind::Unknown(unknown) => unknown.raw.clone(),
            kind => serde_json::to_value(kind).map_err(ser::Error::custom)?,
        };
        if let Value::Object(map) = &mut value {
            let loc = serde_json::to_value(self.loc).map_err(ser::Error::custom)?;
            map.insert("loc".to_string(), loc);
        }
        value.serialize(serializer)
    }
}

// =============================================================================
// NodeKind
// =============================================================================

macro_rules! node_kinds {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident $( ( $payload:ty ) )?
        ),* $(,)?
    ) => {
        /// The category of a node together with its attributes and children.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type")]
        pub enum NodeKind {
            $(
                $(#[$meta])*
                $variant $( ($payload) )?,
            )*
            /// A category this model does not know. Never produced by serde
            /// directly; see `Node`'s `Deserialize` impl.
            #[serde(skip)]
            Unknown(UnknownNode),
        }

        impl NodeKind {
            /// Tags handled by the derived deserializer.
            const KNOWN_TAGS: &'static [&'static str] = &[
                $( stringify!($variant), )*
                "PropertyDefinition",
            ];

            pub fn category(&self) -> &str {
                match self {
                    $( NodeKind::$variant { .. } => stringify!($variant), )*
                    NodeKind::Unknown(unknown) => &unknown.node_type,
                }
            }

            pub fn is_known_tag(tag: &str) -> bool {
                Self::KNOWN_TAGS.contains(&tag)
            }
        }
    };
}

node_kinds! {
    // Program and blocks
    Program(Body),
    BlockStatement(Body),

    // Expressions
    Identifier(Identifier),
    Literal(Literal),
    ThisExpression,
    Super,
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    FunctionExpression(Function),
    ArrowFunctionExpression(Function),
    ClassExpression(Class),
    UnaryExpression(Unary),
    UpdateExpression(Unary),
    BinaryExpression(Binary),
    LogicalExpression(Binary),
    AssignmentExpression(Binary),
    ConditionalExpression(Conditional),
    CallExpression(Call),
    NewExpression(Call),
    MemberExpression(Member),
    SequenceExpression(Sequence),
    SpreadElement(Spread),
    RestElement(Spread),
    AssignmentPattern(AssignmentPattern),
    TSAsExpression(AsExpression),

    // Statements
    EmptyStatement,
    DebuggerStatement,
    ExpressionStatement(ExpressionStatement),
    IfStatement(If),
    SwitchStatement(Switch),
    SwitchCase(SwitchCase),
    ForStatement(For),
    ForInStatement(ForIn),
    ForOfStatement(ForIn),
    WhileStatement(Loop),
    DoWhileStatement(Loop),
    BreakStatement(Jump),
    ContinueStatement(Jump),
    ReturnStatement(Argument),
    ThrowStatement(Argument),
    TryStatement(Try),
    CatchClause(CatchClause),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),

    // Declarations
    FunctionDeclaration(Function),
    TSDeclareFunction(Function),
    TSEmptyBodyFunctionExpression(Function),
    ClassDeclaration(Class),
    ClassBody(Body),
    #[serde(alias = "PropertyDefinition")]
    ClassProperty(ClassProperty),
    MethodDefinition(MethodDefinition),
    TSAbstractMethodDefinition(MethodDefinition),
    ImportDeclaration(ImportDeclaration),
    ImportSpecifier(ImportSpecifier),
    ImportDefaultSpecifier(ImportBinding),
    ImportNamespaceSpecifier(ImportBinding),
    ExportNamedDeclaration(ExportNamed),
    ExportDefaultDeclaration(ExportDefault),
    TSModuleDeclaration(ModuleDeclaration),
    TSModuleBlock(Body),
    TSInterfaceDeclaration(InterfaceDeclaration),
    TSInterfaceBody(Body),
    TSInterfaceHeritage(Heritage),
    TSClassImplements(Heritage),
    TSMethodSignature(MethodSignature),
    TSPropertySignature(PropertySignature),

    // Types
    TSTypeAnnotation(TypeAnnotation),
    TSTypeReference(TypeReference),
    TSTypeParameterInstantiation(TypeParameterInstantiation),
    TSQualifiedName(QualifiedName),
    TSArrayType(ArrayType),
    TSVoidKeyword,
    TSAnyKeyword,
    TSNumberKeyword,
    TSStringKeyword,
    TSBooleanKeyword,
    TSNullKeyword,
    TSUndefinedKeyword,
    TSJSDocAllType,

    // Recognized but never translated
    AwaitExpression,
    YieldExpression,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    MetaProperty,
    ArrayPattern,
    ObjectPattern,
    Decorator,
    LabeledStatement,
    WithStatement,
    ExportAllDeclaration,
    ExportSpecifier,
    TSEnumDeclaration,
    TSTypeAssertion,
}

/// Payload of a node category this model does not know.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNode {
    pub node_type: String,
    pub raw: Value,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Shared payloads
// =============================================================================

/// A bare statement list: `Program`, `BlockStatement`, `ClassBody`,
/// `TSModuleBlock` and `TSInterfaceBody`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// Source text of the literal, quotes and all.
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpression {
    /// `None` for an elided element (`[a, , b]`).
    #[serde(default)]
    pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpression {
    #[serde(default)]
    pub properties: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: Box<Node>,
    pub value: Box<Node>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub shorthand: bool,
}

/// Every function-shaped category: declarations, expressions, arrows, and
/// the body-less TypeScript forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    #[serde(default)]
    pub id: Option<Box<Node>>,
    #[serde(default)]
    pub params: Vec<Node>,
    #[serde(default)]
    pub body: Option<Box<Node>>,
    #[serde(default)]
    pub return_type: Option<Box<Node>>,
    #[serde(default)]
    pub generator: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    /// Arrow function with an expression body.
    #[serde(default)]
    pub expression: bool,
    #[serde(default)]
    pub declare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default)]
    pub id: Option<Box<Node>>,
    #[serde(default)]
    pub super_class: Option<Box<Node>>,
    #[serde(default)]
    pub implements: Vec<Node>,
    pub body: Box<Node>,
    #[serde(default)]
    pub decorators: Vec<Node>,
    #[serde(default)]
    pub declare: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProperty {
    pub key: Box<Node>,
    #[serde(default)]
    pub value: Option<Box<Node>>,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
    #[serde(default)]
    pub accessibility: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub declare: bool,
    #[serde(default)]
    pub definite: bool,
    #[serde(default)]
    pub decorators: Vec<Node>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    #[default]
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub key: Box<Node>,
    /// A `FunctionExpression` (or `TSEmptyBodyFunctionExpression`).
    pub value: Box<Node>,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub accessibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unary {
    pub operator: String,
    #[serde(default = "default_true")]
    pub prefix: bool,
    pub argument: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
}

/// `CallExpression` and `NewExpression`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub callee: Box<Node>,
    #[serde(default)]
    pub arguments: Vec<Node>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub type_parameters: Option<Box<Node>>,
    #[serde(default)]
    pub type_arguments: Option<Box<Node>>,
}

impl Call {
    /// `<T>` in `f<T>(x)` or `new C<T>(x)`, under either field name.
    pub fn type_args(&self) -> Option<&Node> {
        self.type_arguments
            .as_deref()
            .or(self.type_parameters.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub object: Box<Node>,
    pub property: Box<Node>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub expressions: Vec<Node>,
}

/// `SpreadElement` and `RestElement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spread {
    pub argument: Box<Node>,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPattern {
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsExpression {
    pub expression: Box<Node>,
    pub type_annotation: Box<Node>,
}

// =============================================================================
// Statement payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct If {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    #[serde(default)]
    pub alternate: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub discriminant: Box<Node>,
    #[serde(default)]
    pub cases: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// `None` for `default:`.
    #[serde(default)]
    pub test: Option<Box<Node>>,
    #[serde(default)]
    pub consequent: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct For {
    #[serde(default)]
    pub init: Option<Box<Node>>,
    #[serde(default)]
    pub test: Option<Box<Node>>,
    #[serde(default)]
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
}

/// `for…in` and `for…of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForIn {
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub body: Box<Node>,
}

/// `while` and `do…while`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    pub test: Box<Node>,
    pub body: Box<Node>,
}

/// `break` and `continue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jump {
    #[serde(default)]
    pub label: Option<Box<Node>>,
}

/// `return` and `throw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub argument: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Try {
    pub block: Box<Node>,
    #[serde(default)]
    pub handler: Option<Box<Node>>,
    #[serde(default)]
    pub finalizer: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(default)]
    pub param: Option<Box<Node>>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    #[serde(default)]
    pub declarations: Vec<Node>,
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub id: Box<Node>,
    #[serde(default)]
    pub init: Option<Box<Node>>,
}

// =============================================================================
// Module and declaration payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    #[serde(default)]
    pub specifiers: Vec<Node>,
    pub source: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub imported: Box<Node>,
    #[serde(default)]
    pub local: Option<Box<Node>>,
}

/// `import D from …` and `import * as N from …`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBinding {
    pub local: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNamed {
    #[serde(default)]
    pub declaration: Option<Box<Node>>,
    #[serde(default)]
    pub specifiers: Vec<Node>,
    #[serde(default)]
    pub source: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDefault {
    pub declaration: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDeclaration {
    pub id: Box<Node>,
    #[serde(default)]
    pub body: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub id: Box<Node>,
    pub body: Box<Node>,
    #[serde(default, rename = "extends")]
    pub heritage: Vec<Node>,
    #[serde(default)]
    pub implements: Vec<Node>,
}

/// `TSInterfaceHeritage` and `TSClassImplements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heritage {
    pub expression: Box<Node>,
    #[serde(default)]
    pub type_parameters: Option<Box<Node>>,
    #[serde(default)]
    pub type_arguments: Option<Box<Node>>,
}

impl Heritage {
    pub fn type_args(&self) -> Option<&Node> {
        self.type_arguments
            .as_deref()
            .or(self.type_parameters.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub key: Box<Node>,
    #[serde(default)]
    pub params: Vec<Node>,
    #[serde(default)]
    pub return_type: Option<Box<Node>>,
    #[serde(default)]
    pub accessibility: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySignature {
    pub key: Box<Node>,
    #[serde(default)]
    pub type_annotation: Option<Box<Node>>,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
}

// =============================================================================
// Type payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAnnotation {
    pub type_annotation: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    pub type_name: Box<Node>,
    #[serde(default)]
    pub type_parameters: Option<Box<Node>>,
    #[serde(default)]
    pub type_arguments: Option<Box<Node>>,
}

impl TypeReference {
    pub fn type_args(&self) -> Option<&Node> {
        self.type_arguments
            .as_deref()
            .or(self.type_parameters.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParameterInstantiation {
    #[serde(default)]
    pub params: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedName {
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayType {
    pub element_type: Box<Node>,
}
