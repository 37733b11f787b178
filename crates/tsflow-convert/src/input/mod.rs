//! Input boundary: TypeScript declaration source parsed with tree-sitter.
//!
//! The converters only see [`InputNode`] views. Each view borrows the
//! tree-sitter node and the original text, so placeholders can quote the
//! exact span a node came from.

mod kind;
pub mod literal;

pub use kind::SyntaxKind;

use serde::Serialize;
use std::fmt;
use tree_sitter::{Node, Parser, Tree};

/// Error that can occur while parsing source text into an input tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("tree-sitter init: {0}")]
    Language(String),

    #[error("failed to parse {0}")]
    Failed(String),
}

/// Byte range of a node in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A parsed TypeScript file. Owns both the text and its syntax tree.
pub struct SourceFile {
    name: String,
    text: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse TypeScript (declaration) source.
    ///
    /// Syntax errors do not fail the parse: tree-sitter recovers and leaves
    /// `ERROR` nodes, which the converters turn into error placeholders.
    pub fn parse(name: impl Into<String>, text: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        let text = text.into();

        let mut parser = Parser::new();
        parser
            .set_language(&arborium_typescript::language().into())
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| ParseError::Failed(name.clone()))?;

        Ok(Self { name, text, tree })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root `program` node.
    pub fn root(&self) -> InputNode<'_> {
        InputNode::new(self.tree.root_node(), &self.text)
    }

    /// Top-level statements in source order, comments skipped.
    pub fn statements(&self) -> Vec<InputStatement<'_>> {
        self.root()
            .named_children()
            .into_iter()
            .map(InputStatement::new)
            .collect()
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish()
    }
}

/// Read-only view of one node of the input tree.
#[derive(Clone, Copy)]
pub struct InputNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> InputNode<'a> {
    fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn kind(&self) -> SyntaxKind {
        SyntaxKind::classify(self.node, self.source)
    }

    /// tree-sitter's own kind string, e.g. `type_alias_declaration`.
    pub fn raw_kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.node.start_byte(),
            end: self.node.end_byte(),
        }
    }

    /// Exact source text of the node.
    pub fn text(&self) -> &'a str {
        self.source
            .get(self.node.start_byte()..self.node.end_byte())
            .unwrap_or("")
    }

    pub fn field(&self, name: &str) -> Option<InputNode<'a>> {
        self.node
            .child_by_field_name(name)
            .map(|child| InputNode::new(child, self.source))
    }

    /// Named children, comments excluded.
    pub fn named_children(&self) -> Vec<InputNode<'a>> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| InputNode::new(child, self.source))
            .collect()
    }

    /// First named child, comments excluded.
    pub fn first_named_child(&self) -> Option<InputNode<'a>> {
        self.named_children().into_iter().next()
    }

    /// First named child with the given tree-sitter kind.
    pub fn child_of_kind(&self, raw_kind: &str) -> Option<InputNode<'a>> {
        kind::find_named(self.node, raw_kind).map(|child| InputNode::new(child, self.source))
    }

    /// Whether an anonymous token (keyword or punctuation) is a direct child.
    pub fn has_token(&self, token: &str) -> bool {
        kind::has_token(self.node, token)
    }
}

impl fmt::Debug for InputNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{}@{}..{}", self.node.kind(), span.start, span.end)
    }
}

/// How a statement was exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportModifier {
    /// `export <declaration>`
    Named,
    /// `export default <declaration>`
    Default,
}

/// A top-level statement with its `export`/`declare` wrappers resolved.
#[derive(Debug, Clone, Copy)]
pub struct InputStatement<'a> {
    /// The statement as written, modifiers included.
    pub node: InputNode<'a>,
    /// The statement with the export and ambient wrappers removed.
    pub body: InputNode<'a>,
    pub export: Option<ExportModifier>,
}

impl<'a> InputStatement<'a> {
    pub fn new(node: InputNode<'a>) -> Self {
        let mut body = node;
        let mut export = None;

        if node.raw_kind() == "export_statement" {
            if let Some(declaration) = node.field("declaration") {
                export = Some(if node.has_token("default") {
                    ExportModifier::Default
                } else {
                    ExportModifier::Named
                });
                body = declaration;
            }
        }

        // `declare <declaration>`: the keyword carries no meaning in a
        // declaration file. `declare global { … }` and `declare module.exports`
        // keep the wrapper.
        if body.raw_kind() == "ambient_declaration" {
            if let Some(inner) = body.first_named_child() {
                if !matches!(inner.raw_kind(), "statement_block" | "property_identifier") {
                    body = inner;
                }
            }
        }

        Self { node, body, export }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SourceFile {
        SourceFile::parse("test.d.ts", text).expect("parse failed")
    }

    #[test]
    fn test_statements_skip_comments() {
        let file = parse("// leading\ntype A = string;\n/* between */\ndeclare var x: A;\n");
        let statements = file.statements();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].body.kind(), SyntaxKind::TypeAliasDeclaration);
        assert_eq!(statements[1].body.kind(), SyntaxKind::VariableStatement);
    }

    #[test]
    fn test_export_and_declare_unwrapped() {
        let file = parse("export declare function f(x: number): string;");
        let statements = file.statements();
        assert_eq!(statements.len(), 1);
        let stmt = statements[0];
        assert_eq!(stmt.export, Some(ExportModifier::Named));
        assert_eq!(stmt.body.kind(), SyntaxKind::FunctionDeclaration);
        assert_eq!(stmt.node.text(), "export declare function f(x: number): string;");
    }

    #[test]
    fn test_export_forms_classified() {
        let file = parse("export default Foo;\nexport = Bar;\nexport { a, b };\nexport as namespace NS;\n");
        let kinds: Vec<_> = file.statements().iter().map(|s| s.body.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ExportAssignment,
                SyntaxKind::ExportAssignment,
                SyntaxKind::ExportDeclaration,
                SyntaxKind::NamespaceExportDeclaration,
            ]
        );
        assert!(file.statements().iter().all(|s| s.export.is_none()));
    }

    #[test]
    fn test_node_text_is_exact_span() {
        let source = "type  A =\n  string ;";
        let file = parse(source);
        let stmt = file.statements()[0];
        let span = stmt.node.span();
        assert_eq!(stmt.node.text(), &source[span.start..span.end]);
    }

    #[test]
    fn test_keyword_types_classified() {
        let file = parse("type T = [any, unknown, never, void, undefined, boolean, number, string, null];");
        let value = file.statements()[0].body.field("value").unwrap();
        let kinds: Vec<_> = value.named_children().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::AnyKeyword,
                SyntaxKind::UnknownKeyword,
                SyntaxKind::NeverKeyword,
                SyntaxKind::VoidKeyword,
                SyntaxKind::UndefinedKeyword,
                SyntaxKind::BooleanKeyword,
                SyntaxKind::NumberKeyword,
                SyntaxKind::StringKeyword,
                SyntaxKind::LiteralType,
            ]
        );
    }
}
