//! Closed classification of input syntax nodes.
//!
//! tree-sitter reports node kinds as strings, and a few TypeScript constructs
//! share one grammar node (e.g. `export_statement` covers `export default x`,
//! `export = x` and `export { a }`). [`SyntaxKind`] folds those back into one
//! variant per construct so the converters can match exhaustively.

use std::fmt;

/// Kind of an input node, named after the TypeScript construct it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Statements
    ImportDeclaration,
    ImportEqualsDeclaration,
    ExportAssignment,
    ExportDeclaration,
    NamespaceExportDeclaration,
    VariableStatement,
    TypeAliasDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    Block,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,

    // Keyword types
    AnyKeyword,
    UnknownKeyword,
    NeverKeyword,
    UndefinedKeyword,
    VoidKeyword,
    BooleanKeyword,
    NumberKeyword,
    StringKeyword,
    SymbolKeyword,
    ObjectKeyword,

    // Types
    LiteralType,
    TypeReference,
    UnionType,
    IntersectionType,
    ArrayType,
    TupleType,
    FunctionType,
    ConstructorType,
    TypeLiteral,
    MappedType,
    TypePredicate,
    TypeQuery,
    TypeOperator,
    IndexedAccessType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    ThisType,
    OptionalType,
    RestType,
    NamedTupleMember,
    TemplateLiteralType,
    ImportType,

    // Literals inside literal types
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    PrefixUnaryExpression,

    // Type members
    PropertySignature,
    CallSignature,
    ConstructSignature,
    MethodSignature,
    GetAccessor,
    SetAccessor,
    IndexSignature,

    // Names and expressions
    Identifier,
    QualifiedName,

    /// Parser error recovery node.
    Error,
    /// Anything this table does not know about.
    Unknown,
}

impl SyntaxKind {
    /// Classify a node. Needs the node itself (not just its kind string)
    /// because some grammar nodes stand for several constructs.
    pub(crate) fn classify(node: tree_sitter::Node<'_>, source: &str) -> Self {
        match node.kind() {
            "import_statement" => {
                if find_named(node, "import_require_clause").is_some() {
                    SyntaxKind::ImportEqualsDeclaration
                } else {
                    SyntaxKind::ImportDeclaration
                }
            }
            "import_alias" => SyntaxKind::ImportEqualsDeclaration,
            "export_statement" => classify_export(node),
            "lexical_declaration" | "variable_declaration" => SyntaxKind::VariableStatement,
            "type_alias_declaration" => SyntaxKind::TypeAliasDeclaration,
            "function_declaration"
            | "function_signature"
            | "generator_function_declaration" => SyntaxKind::FunctionDeclaration,
            "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDeclaration,
            "interface_declaration" => SyntaxKind::InterfaceDeclaration,
            "enum_declaration" => SyntaxKind::EnumDeclaration,
            "module" | "internal_module" => SyntaxKind::ModuleDeclaration,
            // `declare global { … }` and `declare module.exports: T` are the only
            // ambient forms that survive unwrapping.
            "ambient_declaration" => SyntaxKind::ModuleDeclaration,
            "statement_block" => SyntaxKind::Block,
            "empty_statement" => SyntaxKind::EmptyStatement,
            "expression_statement" => SyntaxKind::ExpressionStatement,
            "if_statement" => SyntaxKind::IfStatement,
            "do_statement" => SyntaxKind::DoStatement,
            "while_statement" => SyntaxKind::WhileStatement,
            "for_statement" => SyntaxKind::ForStatement,
            "for_in_statement" => SyntaxKind::ForInStatement,
            "continue_statement" => SyntaxKind::ContinueStatement,
            "break_statement" => SyntaxKind::BreakStatement,
            "return_statement" => SyntaxKind::ReturnStatement,
            "with_statement" => SyntaxKind::WithStatement,
            "switch_statement" => SyntaxKind::SwitchStatement,
            "labeled_statement" => SyntaxKind::LabeledStatement,
            "throw_statement" => SyntaxKind::ThrowStatement,
            "try_statement" => SyntaxKind::TryStatement,
            "debugger_statement" => SyntaxKind::DebuggerStatement,

            "predefined_type" => classify_predefined(node, source),
            "literal_type" => {
                if find_named(node, "undefined").is_some() {
                    SyntaxKind::UndefinedKeyword
                } else {
                    SyntaxKind::LiteralType
                }
            }
            "type_identifier" if node.utf8_text(source.as_bytes()) == Ok("undefined") => {
                SyntaxKind::UndefinedKeyword
            }
            "type_identifier" | "nested_type_identifier" | "generic_type" => {
                SyntaxKind::TypeReference
            }
            "union_type" => SyntaxKind::UnionType,
            "intersection_type" => SyntaxKind::IntersectionType,
            "array_type" => SyntaxKind::ArrayType,
            "tuple_type" => SyntaxKind::TupleType,
            "function_type" => SyntaxKind::FunctionType,
            "constructor_type" => SyntaxKind::ConstructorType,
            "object_type" => {
                if is_mapped_type(node) {
                    SyntaxKind::MappedType
                } else {
                    SyntaxKind::TypeLiteral
                }
            }
            "type_predicate" | "asserts" => SyntaxKind::TypePredicate,
            "type_query" => SyntaxKind::TypeQuery,
            "index_type_query" | "readonly_type" => SyntaxKind::TypeOperator,
            "lookup_type" => SyntaxKind::IndexedAccessType,
            "conditional_type" => SyntaxKind::ConditionalType,
            "infer_type" => SyntaxKind::InferType,
            "parenthesized_type" => SyntaxKind::ParenthesizedType,
            "this_type" | "this" => SyntaxKind::ThisType,
            "optional_type" => SyntaxKind::OptionalType,
            "rest_type" => SyntaxKind::RestType,
            "tuple_parameter" | "optional_tuple_parameter" => SyntaxKind::NamedTupleMember,
            // `[a: T]`, `[b?: U]` and `[...rest: V]` reuse the parameter nodes.
            "required_parameter" | "optional_parameter"
                if node.parent().is_some_and(|parent| parent.kind() == "tuple_type") =>
            {
                SyntaxKind::NamedTupleMember
            }
            "template_literal_type" => SyntaxKind::TemplateLiteralType,
            "import_type" => SyntaxKind::ImportType,

            "null" => SyntaxKind::NullKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "number" => {
                let text = node.utf8_text(source.as_bytes()).unwrap_or("");
                if text.ends_with('n') {
                    SyntaxKind::BigIntLiteral
                } else {
                    SyntaxKind::NumericLiteral
                }
            }
            "string" => SyntaxKind::StringLiteral,
            "unary_expression" => SyntaxKind::PrefixUnaryExpression,

            "property_signature" => SyntaxKind::PropertySignature,
            "call_signature" => SyntaxKind::CallSignature,
            "construct_signature" => SyntaxKind::ConstructSignature,
            "method_signature" => {
                if has_token(node, "get") {
                    SyntaxKind::GetAccessor
                } else if has_token(node, "set") {
                    SyntaxKind::SetAccessor
                } else {
                    SyntaxKind::MethodSignature
                }
            }
            "index_signature" => SyntaxKind::IndexSignature,

            "identifier" | "property_identifier" => SyntaxKind::Identifier,
            "nested_identifier" => SyntaxKind::QualifiedName,

            "ERROR" => SyntaxKind::Error,
            _ => SyntaxKind::Unknown,
        }
    }

    /// The construct name used in diagnostics, e.g. `InterfaceDeclaration`.
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::ImportDeclaration => "ImportDeclaration",
            SyntaxKind::ImportEqualsDeclaration => "ImportEqualsDeclaration",
            SyntaxKind::ExportAssignment => "ExportAssignment",
            SyntaxKind::ExportDeclaration => "ExportDeclaration",
            SyntaxKind::NamespaceExportDeclaration => "NamespaceExportDeclaration",
            SyntaxKind::VariableStatement => "VariableStatement",
            SyntaxKind::TypeAliasDeclaration => "TypeAliasDeclaration",
            SyntaxKind::FunctionDeclaration => "FunctionDeclaration",
            SyntaxKind::ClassDeclaration => "ClassDeclaration",
            SyntaxKind::InterfaceDeclaration => "InterfaceDeclaration",
            SyntaxKind::EnumDeclaration => "EnumDeclaration",
            SyntaxKind::ModuleDeclaration => "ModuleDeclaration",
            SyntaxKind::Block => "Block",
            SyntaxKind::EmptyStatement => "EmptyStatement",
            SyntaxKind::ExpressionStatement => "ExpressionStatement",
            SyntaxKind::IfStatement => "IfStatement",
            SyntaxKind::DoStatement => "DoStatement",
            SyntaxKind::WhileStatement => "WhileStatement",
            SyntaxKind::ForStatement => "ForStatement",
            SyntaxKind::ForInStatement => "ForInStatement",
            SyntaxKind::ContinueStatement => "ContinueStatement",
            SyntaxKind::BreakStatement => "BreakStatement",
            SyntaxKind::ReturnStatement => "ReturnStatement",
            SyntaxKind::WithStatement => "WithStatement",
            SyntaxKind::SwitchStatement => "SwitchStatement",
            SyntaxKind::LabeledStatement => "LabeledStatement",
            SyntaxKind::ThrowStatement => "ThrowStatement",
            SyntaxKind::TryStatement => "TryStatement",
            SyntaxKind::DebuggerStatement => "DebuggerStatement",
            SyntaxKind::AnyKeyword => "AnyKeyword",
            SyntaxKind::UnknownKeyword => "UnknownKeyword",
            SyntaxKind::NeverKeyword => "NeverKeyword",
            SyntaxKind::UndefinedKeyword => "UndefinedKeyword",
            SyntaxKind::VoidKeyword => "VoidKeyword",
            SyntaxKind::BooleanKeyword => "BooleanKeyword",
            SyntaxKind::NumberKeyword => "NumberKeyword",
            SyntaxKind::StringKeyword => "StringKeyword",
            SyntaxKind::SymbolKeyword => "SymbolKeyword",
            SyntaxKind::ObjectKeyword => "ObjectKeyword",
            SyntaxKind::LiteralType => "LiteralType",
            SyntaxKind::TypeReference => "TypeReference",
            SyntaxKind::UnionType => "UnionType",
            SyntaxKind::IntersectionType => "IntersectionType",
            SyntaxKind::ArrayType => "ArrayType",
            SyntaxKind::TupleType => "TupleType",
            SyntaxKind::FunctionType => "FunctionType",
            SyntaxKind::ConstructorType => "ConstructorType",
            SyntaxKind::TypeLiteral => "TypeLiteral",
            SyntaxKind::MappedType => "MappedType",
            SyntaxKind::TypePredicate => "TypePredicate",
            SyntaxKind::TypeQuery => "TypeQuery",
            SyntaxKind::TypeOperator => "TypeOperator",
            SyntaxKind::IndexedAccessType => "IndexedAccessType",
            SyntaxKind::ConditionalType => "ConditionalType",
            SyntaxKind::InferType => "InferType",
            SyntaxKind::ParenthesizedType => "ParenthesizedType",
            SyntaxKind::ThisType => "ThisType",
            SyntaxKind::OptionalType => "OptionalType",
            SyntaxKind::RestType => "RestType",
            SyntaxKind::NamedTupleMember => "NamedTupleMember",
            SyntaxKind::TemplateLiteralType => "TemplateLiteralType",
            SyntaxKind::ImportType => "ImportType",
            SyntaxKind::NullKeyword => "NullKeyword",
            SyntaxKind::TrueKeyword => "TrueKeyword",
            SyntaxKind::FalseKeyword => "FalseKeyword",
            SyntaxKind::NumericLiteral => "NumericLiteral",
            SyntaxKind::BigIntLiteral => "BigIntLiteral",
            SyntaxKind::StringLiteral => "StringLiteral",
            SyntaxKind::PrefixUnaryExpression => "PrefixUnaryExpression",
            SyntaxKind::PropertySignature => "PropertySignature",
            SyntaxKind::CallSignature => "CallSignature",
            SyntaxKind::ConstructSignature => "ConstructSignature",
            SyntaxKind::MethodSignature => "MethodSignature",
            SyntaxKind::GetAccessor => "GetAccessor",
            SyntaxKind::SetAccessor => "SetAccessor",
            SyntaxKind::IndexSignature => "IndexSignature",
            SyntaxKind::Identifier => "Identifier",
            SyntaxKind::QualifiedName => "QualifiedName",
            SyntaxKind::Error => "Error",
            SyntaxKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn classify_export(node: tree_sitter::Node<'_>) -> SyntaxKind {
    if has_token(node, "import") {
        // `export import A = B.C;`
        SyntaxKind::ImportEqualsDeclaration
    } else if node.child_by_field_name("value").is_some() || has_token(node, "=") {
        SyntaxKind::ExportAssignment
    } else if has_token(node, "namespace") {
        SyntaxKind::NamespaceExportDeclaration
    } else {
        // `export { a }`, `export * from 'm'`. Exported declarations never get
        // here: the reader strips the `export` wrapper off them first.
        SyntaxKind::ExportDeclaration
    }
}

fn classify_predefined(node: tree_sitter::Node<'_>, source: &str) -> SyntaxKind {
    match node.utf8_text(source.as_bytes()).unwrap_or("") {
        "any" => SyntaxKind::AnyKeyword,
        "unknown" => SyntaxKind::UnknownKeyword,
        "never" => SyntaxKind::NeverKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "undefined" => SyntaxKind::UndefinedKeyword,
        "boolean" => SyntaxKind::BooleanKeyword,
        "number" => SyntaxKind::NumberKeyword,
        "string" => SyntaxKind::StringKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "symbol" | "unique symbol" => SyntaxKind::SymbolKeyword,
        _ => SyntaxKind::Unknown,
    }
}

/// `{ [K in T]: U }` parses as an object type whose only member is an index
/// signature holding a `mapped_type_clause`.
fn is_mapped_type(node: tree_sitter::Node<'_>) -> bool {
    let mut cursor = node.walk();
    let members: Vec<_> = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    matches!(members.as_slice(), [only]
        if only.kind() == "index_signature" && find_named(*only, "mapped_type_clause").is_some())
}

pub(crate) fn find_named<'t>(node: tree_sitter::Node<'t>, kind: &str) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() == kind)
}

pub(crate) fn has_token(node: tree_sitter::Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}
