//! Placeholders for input that could not be translated.
//!
//! A statement placeholder is an empty statement; a type placeholder is a
//! reference to `$FlowFixMe`. Both carry two comments: a tag saying why
//! (`tsflow-unimplemented: <Kind>` or `tsflow-error: <description>`) and the
//! original source text of the node, verbatim.

use crate::input::{InputNode, SyntaxKind};
use crate::ir::{Comment, FIXME_TYPE, FlowType, GenericType, QualifiedName, Statement};

/// Tag for recognized constructs without a translation.
pub const UNIMPLEMENTED_TAG: &str = "tsflow-unimplemented";
/// Tag for input the converter rejected.
pub const ERROR_TAG: &str = "tsflow-error";

/// Statement placeholder for a construct of `kind` with no translation.
pub fn unimplemented_statement(quoted: InputNode<'_>, kind: SyntaxKind) -> Statement {
    statement(quoted, format!("{UNIMPLEMENTED_TAG}: {kind}"))
}

/// Statement placeholder for rejected input.
pub fn error_statement(quoted: InputNode<'_>, description: &str) -> Statement {
    statement(quoted, format!("{ERROR_TAG}: {description}"))
}

/// Type placeholder for a type with no translation; the tag names its kind.
pub fn unimplemented_type(node: InputNode<'_>) -> FlowType {
    fixme(node, format!("{UNIMPLEMENTED_TAG}: {}", node.kind()))
}

/// Type placeholder for rejected input.
pub fn error_type(node: InputNode<'_>, description: &str) -> FlowType {
    fixme(node, format!("{ERROR_TAG}: {description}"))
}

fn statement(quoted: InputNode<'_>, tag: String) -> Statement {
    Statement::Empty {
        comments: vec![Comment::leading(tag), Comment::trailing(quoted.text())],
    }
}

fn fixme(node: InputNode<'_>, tag: String) -> FlowType {
    FlowType::Generic(GenericType {
        id: QualifiedName::bare(FIXME_TYPE),
        type_args: None,
        comments: vec![Comment::trailing(node.text()), Comment::trailing(tag)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SourceFile;
    use crate::ir::CommentPlacement;

    #[test]
    fn test_statement_placeholder_quotes_source() {
        let source = "interface I {\n  x: string;\n}";
        let file = SourceFile::parse("a.d.ts", source).unwrap();
        let stmt = file.statements()[0];
        let placeholder = unimplemented_statement(stmt.node, stmt.body.kind());

        assert!(placeholder.is_placeholder());
        let comments = placeholder.comments();
        assert_eq!(comments[0].text, "tsflow-unimplemented: InterfaceDeclaration");
        assert_eq!(comments[0].placement, CommentPlacement::Leading);
        assert_eq!(comments[1].text, source);
        assert_eq!(comments[1].placement, CommentPlacement::Trailing);
    }

    #[test]
    fn test_type_placeholder_is_fixme() {
        let file = SourceFile::parse("a.d.ts", "type T = keyof U;").unwrap();
        let value = file.statements()[0].body.field("value").unwrap();
        let placeholder = unimplemented_type(value);

        assert!(placeholder.is_placeholder());
        let texts: Vec<_> = placeholder.comments().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["keyof U", "tsflow-unimplemented: TypeOperator"]);

        let error = error_type(value, "bad thing");
        assert_eq!(error.comments()[1].text, "tsflow-error: bad thing");
    }
}
