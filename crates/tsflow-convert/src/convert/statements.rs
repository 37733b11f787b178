use super::{ConversionResult, ConvertError, Converter, describe, placeholder};
use crate::input::literal::decode_string;
use crate::input::{ExportModifier, InputNode, InputStatement, Span, SyntaxKind};
use crate::ir::{
    Declaration, DeclareFunction, ExportDefault, Identifier, ImportDeclaration, ImportKind,
    ImportSpecifier, Statement, TypeAlias, VariableDeclaration,
};

impl Converter<'_> {
    /// Translate one top-level statement. Always yields exactly one statement.
    pub fn convert_statement(&mut self, stmt: InputStatement<'_>) -> Statement {
        match self.convert_statement_except_export(stmt) {
            Ok(inner) => match stmt.export {
                Some(export) => self.apply_export(inner, export, stmt.node.span()),
                None => inner,
            },
            Err(err) => {
                let description = format!("internal error: {err}");
                self.warn(description.clone(), Some(stmt.node.span()));
                placeholder::error_statement(stmt.node, &description)
            }
        }
    }

    fn apply_export(&mut self, inner: Statement, export: ExportModifier, span: Span) -> Statement {
        match (inner, export) {
            (Statement::Declaration(decl), ExportModifier::Named) => Statement::ExportNamed(decl),
            (Statement::Declaration(decl), ExportModifier::Default) => {
                Statement::ExportDefault(ExportDefault::Declaration(decl))
            }
            // Placeholders already say what went wrong.
            (placeholder @ Statement::Empty { .. }, _) => placeholder,
            (other, _) => {
                // TODO: mark the dropped `export` in the output too, not only the log.
                self.warn(
                    "statement has \"export\", but conversion not a declaration".into(),
                    Some(span),
                );
                other
            }
        }
    }

    fn convert_statement_except_export(&mut self, stmt: InputStatement<'_>) -> ConversionResult<Statement> {
        let node = stmt.body;
        let kind = node.kind();
        match kind {
            SyntaxKind::ImportDeclaration => self.convert_import_declaration(node),
            SyntaxKind::ExportAssignment => Ok(convert_export_assignment(stmt)),
            SyntaxKind::VariableStatement => self.convert_variable_statement(node),
            SyntaxKind::TypeAliasDeclaration => self.convert_type_alias(node),
            SyntaxKind::FunctionDeclaration => self.convert_function_declaration(node),

            SyntaxKind::Block
            | SyntaxKind::EmptyStatement
            | SyntaxKind::ExpressionStatement
            | SyntaxKind::IfStatement
            | SyntaxKind::DoStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::ForStatement
            | SyntaxKind::ForInStatement
            | SyntaxKind::ContinueStatement
            | SyntaxKind::BreakStatement
            | SyntaxKind::ReturnStatement
            | SyntaxKind::WithStatement
            | SyntaxKind::SwitchStatement
            | SyntaxKind::LabeledStatement
            | SyntaxKind::ThrowStatement
            | SyntaxKind::TryStatement
            | SyntaxKind::DebuggerStatement
            | SyntaxKind::ClassDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::ModuleDeclaration
            | SyntaxKind::ImportEqualsDeclaration
            | SyntaxKind::ExportDeclaration
            | SyntaxKind::NamespaceExportDeclaration => {
                Ok(placeholder::unimplemented_statement(stmt.node, kind))
            }

            _ => Ok(placeholder::error_statement(
                stmt.node,
                &format!("unexpected statement kind: {}", describe(node)),
            )),
        }
    }

    fn convert_import_declaration(&mut self, node: InputNode<'_>) -> ConversionResult<Statement> {
        let clause = node
            .child_of_kind("import_clause")
            .ok_or_else(|| ConvertError::Unimplemented("no import clause".into()))?;
        let source_node = node
            .field("source")
            .ok_or_else(|| ConvertError::Invalid("import without module specifier".into()))?;
        let source = decode_string(source_node.text())
            .ok_or_else(|| ConvertError::Invalid("malformed module specifier".into()))?;

        let kind = if node.has_token("type") {
            ImportKind::Type
        } else {
            ImportKind::Value
        };

        let mut specifiers = Vec::new();
        for part in clause.named_children() {
            match part.raw_kind() {
                "identifier" => {
                    let local = part.text().to_string();
                    self.bindings.bind_module(local.clone(), source.clone());
                    specifiers.push(ImportSpecifier::Default { local });
                }
                "namespace_import" => {
                    let local = part
                        .first_named_child()
                        .ok_or_else(|| ConvertError::Invalid("namespace import without name".into()))?
                        .text()
                        .to_string();
                    self.bindings.bind_module(local.clone(), source.clone());
                    specifiers.push(ImportSpecifier::Namespace { local });
                }
                "named_imports" => {
                    for spec in part.named_children() {
                        let name = spec
                            .field("name")
                            .ok_or_else(|| ConvertError::Invalid("import specifier without name".into()))?;
                        let imported = name.text().to_string();
                        let local = spec
                            .field("alias")
                            .map(|alias| alias.text().to_string())
                            .unwrap_or_else(|| imported.clone());
                        self.bindings.bind_named(local.clone(), imported.clone(), source.clone());
                        specifiers.push(ImportSpecifier::Named {
                            imported,
                            local,
                            kind: spec.has_token("type").then_some(ImportKind::Type),
                        });
                    }
                }
                other => {
                    return Err(ConvertError::Invalid(format!("unexpected import clause part: {other}")));
                }
            }
        }

        Ok(Statement::Import(ImportDeclaration {
            kind,
            specifiers,
            source,
        }))
    }

    fn convert_variable_statement(&mut self, node: InputNode<'_>) -> ConversionResult<Statement> {
        let mut declarations = Vec::new();
        for declarator in node
            .named_children()
            .into_iter()
            .filter(|child| child.raw_kind() == "variable_declarator")
        {
            let name = declarator
                .field("name")
                .ok_or_else(|| ConvertError::Invalid("variable declarator without name".into()))?;
            if name.kind() != SyntaxKind::Identifier {
                return Err(ConvertError::Unimplemented(format!(
                    "variable binding pattern: {}",
                    name.raw_kind()
                )));
            }
            let type_annotation = declarator
                .field("type")
                .map(|annotation| self.convert_annotation(annotation));
            declarations.push(Identifier {
                name: name.text().to_string(),
                type_annotation,
            });
        }

        Ok(Statement::Declaration(Declaration::Variable(VariableDeclaration {
            declarations,
        })))
    }

    fn convert_type_alias(&mut self, node: InputNode<'_>) -> ConversionResult<Statement> {
        let name = node
            .field("name")
            .ok_or_else(|| ConvertError::Invalid("type alias without name".into()))?;
        let value = node
            .field("value")
            .ok_or_else(|| ConvertError::Invalid("type alias without type".into()))?;

        let type_params = node
            .field("type_parameters")
            .map(|params| self.convert_type_parameters(params));
        let right = self.convert_type(value);

        Ok(Statement::Declaration(Declaration::TypeAlias(TypeAlias {
            id: name.text().to_string(),
            type_params,
            right,
        })))
    }

    fn convert_function_declaration(&mut self, node: InputNode<'_>) -> ConversionResult<Statement> {
        let name = node
            .field("name")
            .ok_or_else(|| ConvertError::Invalid("function declaration without name".into()))?;

        Ok(Statement::Declaration(Declaration::Function(DeclareFunction {
            id: name.text().to_string(),
            signature: self.convert_function_type(node),
        })))
    }
}

/// `export default x;` translates; `export = x;` and defaults of anything
/// but a bare identifier become error placeholders.
fn convert_export_assignment(stmt: InputStatement<'_>) -> Statement {
    let node = stmt.body;
    if node.has_token("=") {
        return placeholder::error_statement(stmt.node, "unimplemented: \"export =\"");
    }
    match node.field("value") {
        Some(value) if value.kind() == SyntaxKind::Identifier => {
            Statement::ExportDefault(ExportDefault::Identifier(value.text().to_string()))
        }
        _ => placeholder::error_statement(stmt.node, "\"export default\" with non-identifier"),
    }
}
