//! Flow declaration IR.
//!
//! The converters build these nodes; writers in [`crate::output`] serialize
//! them. Every node is either a complete Flow construct or a placeholder
//! (an empty statement, or a `$FlowFixMe` reference) whose comments say
//! what could not be translated.

use serde::Serialize;
use std::fmt;

/// Identifier of Flow's "unchecked" escape-hatch type, used for type placeholders.
pub const FIXME_TYPE: &str = "$FlowFixMe";

/// A converted file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    /// Source file name, as given to the reader.
    pub name: String,
    /// Lines of the header block comment.
    pub header: Vec<String>,
    /// Imports needed by rewritten type references, one per substituted name.
    pub imports: Vec<ImportDeclaration>,
    /// One statement per input statement, in input order.
    pub body: Vec<Statement>,
}

/// Block comment attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub placement: CommentPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentPlacement {
    Leading,
    Trailing,
}

impl Comment {
    pub fn leading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placement: CommentPlacement::Leading,
        }
    }

    pub fn trailing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placement: CommentPlacement::Trailing,
        }
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// `;` carrying comments. Only produced as a placeholder.
    Empty { comments: Vec<Comment> },
    Import(ImportDeclaration),
    ExportDefault(ExportDefault),
    ExportNamed(Declaration),
    Declaration(Declaration),
}

impl Statement {
    pub fn is_declaration(&self) -> bool {
        matches!(self, Statement::Declaration(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Statement::Empty { .. })
    }

    /// Comments carried by a placeholder statement.
    pub fn comments(&self) -> &[Comment] {
        match self {
            Statement::Empty { comments } => comments,
            _ => &[],
        }
    }

    /// Placeholders in this statement, itself included.
    pub fn placeholder_count(&self) -> usize {
        match self {
            Statement::Empty { .. } => 1,
            Statement::Import(_) | Statement::ExportDefault(ExportDefault::Identifier(_)) => 0,
            Statement::ExportDefault(ExportDefault::Declaration(decl))
            | Statement::ExportNamed(decl)
            | Statement::Declaration(decl) => decl.placeholder_count(),
        }
    }
}

/// Target of `export default`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportDefault {
    Identifier(String),
    Declaration(Declaration),
}

/// Declaration-shaped statements: the ones an export can wrap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    Variable(VariableDeclaration),
    TypeAlias(TypeAlias),
    Function(DeclareFunction),
}

impl Declaration {
    fn placeholder_count(&self) -> usize {
        match self {
            Declaration::Variable(var) => var
                .declarations
                .iter()
                .filter_map(|id| id.type_annotation.as_ref())
                .map(FlowType::placeholder_count)
                .sum(),
            Declaration::TypeAlias(alias) => {
                type_params_placeholders(alias.type_params.as_deref()) + alias.right.placeholder_count()
            }
            Declaration::Function(func) => func.signature.placeholder_count(),
        }
    }
}

fn type_params_placeholders(params: Option<&[TypeParameter]>) -> usize {
    params
        .unwrap_or_default()
        .iter()
        .flat_map(|param| param.bound.iter().chain(param.default.iter()))
        .map(FlowType::placeholder_count)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Value,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportDeclaration {
    pub kind: ImportKind,
    pub specifiers: Vec<ImportSpecifier>,
    /// Module specifier, unquoted.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportSpecifier {
    /// `import local from …`
    Default { local: String },
    /// `import * as local from …`
    Namespace { local: String },
    /// `import { imported as local } from …`, optionally `type`-qualified.
    Named {
        imported: String,
        local: String,
        kind: Option<ImportKind>,
    },
}

/// `var a: T, b: U;` (declaration files only ever declare with `var`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub declarations: Vec<Identifier>,
}

/// Identifier with an optional type annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub type_annotation: Option<FlowType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAlias {
    pub id: String,
    pub type_params: Option<Vec<TypeParameter>>,
    pub right: FlowType,
}

/// `T: Bound = Default`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParameter {
    pub name: String,
    pub bound: Option<FlowType>,
    pub default: Option<FlowType>,
}

/// `declare function id<…>(…): R;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclareFunction {
    pub id: String,
    pub signature: FunctionType,
}

/// A Flow type expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowType {
    Any,
    Mixed,
    Empty,
    Void,
    Null,
    Boolean,
    Number,
    String,
    BooleanLiteral { value: bool, raw: String },
    NumberLiteral { value: f64, raw: String },
    StringLiteral { value: String, raw: String },
    Generic(GenericType),
    Union(Vec<FlowType>),
    Array(Box<FlowType>),
    Tuple(Vec<FlowType>),
    Function(FunctionType),
    Object(ObjectType),
}

impl FlowType {
    /// Reference to a named type, with optional type arguments.
    pub fn reference(id: QualifiedName, type_args: Option<Vec<FlowType>>) -> Self {
        FlowType::Generic(GenericType {
            id,
            type_args,
            comments: Vec::new(),
        })
    }

    /// Reference to a bare identifier without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        FlowType::reference(QualifiedName::bare(name), None)
    }

    pub fn array(element: FlowType) -> Self {
        FlowType::Array(Box::new(element))
    }

    /// Whether this is a `$FlowFixMe` placeholder built for an untranslated type.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, FlowType::Generic(generic)
            if generic.id.is_bare(FIXME_TYPE) && !generic.comments.is_empty())
    }

    /// Comments carried by a placeholder type.
    pub fn comments(&self) -> &[Comment] {
        match self {
            FlowType::Generic(generic) => &generic.comments,
            _ => &[],
        }
    }

    /// Placeholders in this type, itself included.
    pub fn placeholder_count(&self) -> usize {
        match self {
            FlowType::Generic(generic) => {
                usize::from(self.is_placeholder())
                    + generic
                        .type_args
                        .iter()
                        .flatten()
                        .map(FlowType::placeholder_count)
                        .sum::<usize>()
            }
            FlowType::Union(members) | FlowType::Tuple(members) => {
                members.iter().map(FlowType::placeholder_count).sum()
            }
            FlowType::Array(element) => element.placeholder_count(),
            FlowType::Function(func) => func.placeholder_count(),
            FlowType::Object(object) => object
                .properties
                .iter()
                .map(|prop| prop.value.placeholder_count())
                .sum(),
            _ => 0,
        }
    }
}

/// `Id<Args>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericType {
    pub id: QualifiedName,
    /// `None` when written without `<…>`; never `Some(vec![])` from the converters.
    pub type_args: Option<Vec<FlowType>>,
    pub comments: Vec<Comment>,
}

/// Dotted name, e.g. `React.Component`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedName(pub Vec<String>);

impl QualifiedName {
    pub fn bare(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_bare(&self, name: &str) -> bool {
        matches!(self.0.as_slice(), [only] if only == name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionType {
    pub type_params: Option<Vec<TypeParameter>>,
    pub params: Vec<FunctionParam>,
    /// Trailing `...rest` parameter.
    pub rest: Option<Box<FunctionParam>>,
    pub return_type: Box<FlowType>,
}

impl FunctionType {
    fn placeholder_count(&self) -> usize {
        type_params_placeholders(self.type_params.as_deref())
            + self
                .params
                .iter()
                .chain(self.rest.as_deref())
                .map(|param| param.type_annotation.placeholder_count())
                .sum::<usize>()
            + self.return_type.placeholder_count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionParam {
    /// `None` for parameters bound by a destructuring pattern.
    pub name: Option<String>,
    pub type_annotation: FlowType,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectType {
    pub properties: Vec<ObjectProperty>,
    /// `{| … |}`: no properties beyond those listed.
    pub exact: bool,
    /// `{ …, ... }`: explicitly open to extra properties.
    pub inexact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub value: FlowType,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKey {
    Identifier(String),
    String { value: String, raw: String },
}
