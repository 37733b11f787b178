//! Flow writer for converted declaration files.
//!
//! Emits `.js.flow` source: the header comment, substitution imports, then
//! one statement per converted statement. Object types and signatures are
//! printed on one line.

use crate::convert::ConvertedFile;
use crate::ir::*;
use crate::traits::Writer;
use std::fmt::Write;

/// Static instance of the Flow writer for registry.
pub static FLOW_WRITER: FlowWriterImpl = FlowWriterImpl;

/// Flow writer implementing the Writer trait.
pub struct FlowWriterImpl;

impl Writer for FlowWriterImpl {
    fn format(&self) -> &'static str {
        "flow"
    }

    fn extension(&self) -> &'static str {
        "js.flow"
    }

    fn write(&self, file: &ConvertedFile) -> String {
        FlowWriter::emit(&file.file)
    }
}

/// Where a declaration sits relative to `export`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ExportPosition {
    None,
    Named,
    Default,
}

/// Emits IR as Flow source.
pub struct FlowWriter {
    output: String,
}

impl Default for FlowWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Emit a whole file.
    pub fn emit(file: &File) -> String {
        let mut writer = Self::new();
        writer.write_file(file);
        writer.output
    }

    /// Emit a single statement, without trailing newline.
    pub fn emit_statement(stmt: &Statement) -> String {
        let mut writer = Self::new();
        writer.write_stmt(stmt);
        writer.output
    }

    /// Emit a single type.
    pub fn emit_type(ty: &FlowType) -> String {
        let mut writer = Self::new();
        writer.write_type(ty);
        writer.output
    }

    fn write_file(&mut self, file: &File) {
        self.write_header(&file.header);
        self.output.push('\n');

        for import in &file.imports {
            self.write_import(import);
            self.output.push('\n');
        }
        if !file.imports.is_empty() {
            self.output.push('\n');
        }

        for stmt in &file.body {
            self.write_stmt(stmt);
            self.output.push('\n');
        }
    }

    fn write_header(&mut self, lines: &[String]) {
        let Some((first, rest)) = lines.split_first() else {
            return;
        };
        write!(self.output, "/* {}\n", escape_comment(first)).unwrap();
        for line in rest {
            write!(self.output, " * {}\n", escape_comment(line)).unwrap();
        }
        self.output.push_str(" */\n");
    }

    fn write_comment(&mut self, comment: &Comment) {
        write!(self.output, "/* {} */", escape_comment(&comment.text)).unwrap();
    }

    fn write_stmt(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Empty { comments } => {
                for comment in comments.iter().filter(|c| c.placement == CommentPlacement::Leading) {
                    self.write_comment(comment);
                    self.output.push('\n');
                }
                self.output.push(';');
                for comment in comments.iter().filter(|c| c.placement == CommentPlacement::Trailing) {
                    self.output.push(' ');
                    self.write_comment(comment);
                }
            }
            Statement::Import(import) => self.write_import(import),
            Statement::ExportDefault(ExportDefault::Identifier(name)) => {
                write!(self.output, "export default {};", name).unwrap();
            }
            Statement::ExportDefault(ExportDefault::Declaration(decl)) => {
                self.write_declaration(decl, ExportPosition::Default)
            }
            Statement::ExportNamed(decl) => self.write_declaration(decl, ExportPosition::Named),
            Statement::Declaration(decl) => self.write_declaration(decl, ExportPosition::None),
        }
    }

    fn write_import(&mut self, import: &ImportDeclaration) {
        self.output.push_str("import ");
        if import.kind == ImportKind::Type {
            self.output.push_str("type ");
        }

        let mut groups = Vec::new();
        let mut named = Vec::new();
        for spec in &import.specifiers {
            match spec {
                ImportSpecifier::Default { local } => groups.push(local.clone()),
                ImportSpecifier::Namespace { local } => groups.push(format!("* as {local}")),
                ImportSpecifier::Named {
                    imported,
                    local,
                    kind,
                } => {
                    let mut text = String::new();
                    if *kind == Some(ImportKind::Type) {
                        text.push_str("type ");
                    }
                    text.push_str(imported);
                    if local != imported {
                        write!(text, " as {local}").unwrap();
                    }
                    named.push(text);
                }
            }
        }
        if !named.is_empty() {
            groups.push(format!("{{ {} }}", named.join(", ")));
        }

        if groups.is_empty() {
            write!(self.output, "{};", quote_module(&import.source)).unwrap();
        } else {
            write!(
                self.output,
                "{} from {};",
                groups.join(", "),
                quote_module(&import.source)
            )
            .unwrap();
        }
    }

    fn write_declaration(&mut self, decl: &Declaration, position: ExportPosition) {
        match decl {
            Declaration::Variable(var) => {
                // Flow declares one variable per statement.
                let keyword = match position {
                    ExportPosition::None => "declare var",
                    ExportPosition::Named | ExportPosition::Default => "declare export var",
                };
                for (i, id) in var.declarations.iter().enumerate() {
                    if i > 0 {
                        self.output.push('\n');
                    }
                    write!(self.output, "{} {}", keyword, id.name).unwrap();
                    if let Some(ty) = &id.type_annotation {
                        self.output.push_str(": ");
                        self.write_type(ty);
                    }
                    self.output.push(';');
                }
            }
            Declaration::TypeAlias(alias) => {
                if position != ExportPosition::None {
                    self.output.push_str("export ");
                }
                write!(self.output, "type {}", alias.id).unwrap();
                if let Some(params) = &alias.type_params {
                    self.write_type_params(params);
                }
                self.output.push_str(" = ");
                self.write_type(&alias.right);
                self.output.push(';');
            }
            Declaration::Function(func) => {
                let keyword = match position {
                    ExportPosition::None => "declare function",
                    ExportPosition::Named => "declare export function",
                    ExportPosition::Default => "declare export default function",
                };
                write!(self.output, "{} {}", keyword, func.id).unwrap();
                self.write_signature(&func.signature, ": ");
                self.output.push(';');
            }
        }
    }

    fn write_type_params(&mut self, params: &[TypeParameter]) {
        self.output.push('<');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(&param.name);
            if let Some(bound) = &param.bound {
                self.output.push_str(": ");
                self.write_type(bound);
            }
            if let Some(default) = &param.default {
                self.output.push_str(" = ");
                self.write_type(default);
            }
        }
        self.output.push('>');
    }

    /// `<T>(a: A, ...rest: R)` then `arrow` then the return type.
    fn write_signature(&mut self, func: &FunctionType, arrow: &str) {
        if let Some(params) = &func.type_params {
            self.write_type_params(params);
        }
        self.output.push('(');
        let mut first = true;
        for param in &func.params {
            if !first {
                self.output.push_str(", ");
            }
            first = false;
            self.write_param(param, "");
        }
        if let Some(rest) = &func.rest {
            if !first {
                self.output.push_str(", ");
            }
            self.write_param(rest, "...");
        }
        self.output.push(')');
        self.output.push_str(arrow);
        self.write_type(&func.return_type);
    }

    fn write_param(&mut self, param: &FunctionParam, prefix: &str) {
        self.output.push_str(prefix);
        if let Some(name) = &param.name {
            self.output.push_str(name);
            if param.optional {
                self.output.push('?');
            }
            self.output.push_str(": ");
        }
        self.write_type(&param.type_annotation);
    }

    fn write_type(&mut self, ty: &FlowType) {
        match ty {
            FlowType::Any => self.output.push_str("any"),
            FlowType::Mixed => self.output.push_str("mixed"),
            FlowType::Empty => self.output.push_str("empty"),
            FlowType::Void => self.output.push_str("void"),
            FlowType::Null => self.output.push_str("null"),
            FlowType::Boolean => self.output.push_str("boolean"),
            FlowType::Number => self.output.push_str("number"),
            FlowType::String => self.output.push_str("string"),
            FlowType::BooleanLiteral { raw, .. }
            | FlowType::NumberLiteral { raw, .. }
            | FlowType::StringLiteral { raw, .. } => self.output.push_str(raw),

            FlowType::Generic(generic) => {
                for comment in generic.comments.iter().filter(|c| c.placement == CommentPlacement::Leading) {
                    self.write_comment(comment);
                    self.output.push(' ');
                }
                write!(self.output, "{}", generic.id).unwrap();
                if let Some(args) = &generic.type_args {
                    self.output.push('<');
                    self.write_type_list(args);
                    self.output.push('>');
                }
                for comment in generic.comments.iter().filter(|c| c.placement == CommentPlacement::Trailing) {
                    self.output.push(' ');
                    self.write_comment(comment);
                }
            }

            FlowType::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(" | ");
                    }
                    // `() => A | B` would swallow the rest of the union.
                    if matches!(member, FlowType::Function(_)) {
                        self.output.push('(');
                        self.write_type(member);
                        self.output.push(')');
                    } else {
                        self.write_type(member);
                    }
                }
            }

            FlowType::Array(element) => {
                self.output.push_str("Array<");
                self.write_type(element);
                self.output.push('>');
            }

            FlowType::Tuple(elements) => {
                self.output.push('[');
                self.write_type_list(elements);
                self.output.push(']');
            }

            FlowType::Function(func) => self.write_signature(func, " => "),

            FlowType::Object(object) => self.write_object(object),
        }
    }

    fn write_type_list(&mut self, types: &[FlowType]) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_type(ty);
        }
    }

    fn write_object(&mut self, object: &ObjectType) {
        let (open, close) = if object.exact { ("{|", "|}") } else { ("{", "}") };
        self.output.push_str(open);

        if object.properties.is_empty() {
            if object.inexact {
                self.output.push_str("...");
            }
            self.output.push_str(close);
            return;
        }

        self.output.push(' ');
        for (i, prop) in object.properties.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            match &prop.key {
                PropertyKey::Identifier(name) => self.output.push_str(name),
                PropertyKey::String { raw, .. } => self.output.push_str(raw),
            }
            if prop.optional {
                self.output.push('?');
            }
            self.output.push_str(": ");
            self.write_type(&prop.value);
        }
        if object.inexact {
            self.output.push_str(", ...");
        }
        self.output.push(' ');
        self.output.push_str(close);
    }
}

/// Comment text can't contain the terminator.
fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}

fn quote_module(source: &str) -> String {
    format!("'{}'", source.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(properties: Vec<ObjectProperty>, exact: bool, inexact: bool) -> FlowType {
        FlowType::Object(ObjectType {
            properties,
            exact,
            inexact,
        })
    }

    fn prop(name: &str, value: FlowType, optional: bool) -> ObjectProperty {
        ObjectProperty {
            key: PropertyKey::Identifier(name.into()),
            value,
            optional,
        }
    }

    #[test]
    fn test_object_forms() {
        assert_eq!(FlowWriter::emit_type(&object(vec![], true, false)), "{||}");
        assert_eq!(FlowWriter::emit_type(&object(vec![], false, true)), "{...}");
        assert_eq!(
            FlowWriter::emit_type(&object(
                vec![prop("a", FlowType::String, false), prop("b", FlowType::Number, true)],
                true,
                false
            )),
            "{| a: string, b?: number |}"
        );
        assert_eq!(
            FlowWriter::emit_type(&object(vec![prop("a", FlowType::String, false)], false, true)),
            "{ a: string, ... }"
        );
    }

    #[test]
    fn test_function_in_union_is_parenthesized() {
        let func = FlowType::Function(FunctionType {
            type_params: None,
            params: vec![],
            rest: None,
            return_type: Box::new(FlowType::Void),
        });
        assert_eq!(
            FlowWriter::emit_type(&FlowType::Union(vec![func, FlowType::Null])),
            "(() => void) | null"
        );
    }

    #[test]
    fn test_placeholder_comments_escaped() {
        let ty = FlowType::Generic(GenericType {
            id: QualifiedName::bare(FIXME_TYPE),
            type_args: None,
            comments: vec![Comment::trailing("A /* x */"), Comment::trailing("tsflow-error: e")],
        });
        assert_eq!(
            FlowWriter::emit_type(&ty),
            "$FlowFixMe /* A /* x *\\/ */ /* tsflow-error: e */"
        );
    }

    #[test]
    fn test_statement_placeholder() {
        let stmt = Statement::Empty {
            comments: vec![
                Comment::leading("tsflow-unimplemented: EnumDeclaration"),
                Comment::trailing("enum E { A }"),
            ],
        };
        assert_eq!(
            FlowWriter::emit_statement(&stmt),
            "/* tsflow-unimplemented: EnumDeclaration */\n; /* enum E { A } */"
        );
    }

    #[test]
    fn test_import_forms() {
        let import = ImportDeclaration {
            kind: ImportKind::Value,
            specifiers: vec![
                ImportSpecifier::Default { local: "React".into() },
                ImportSpecifier::Named {
                    imported: "Node".into(),
                    local: "N".into(),
                    kind: Some(ImportKind::Type),
                },
                ImportSpecifier::Named {
                    imported: "x".into(),
                    local: "x".into(),
                    kind: None,
                },
            ],
            source: "react".into(),
        };
        assert_eq!(
            FlowWriter::emit_statement(&Statement::Import(import)),
            "import React, { type Node as N, x } from 'react';"
        );
    }

    #[test]
    fn test_declarations_by_export_position() {
        let func = Declaration::Function(DeclareFunction {
            id: "f".into(),
            signature: FunctionType {
                type_params: Some(vec![TypeParameter {
                    name: "T".into(),
                    bound: Some(FlowType::String),
                    default: None,
                }]),
                params: vec![FunctionParam {
                    name: Some("x".into()),
                    type_annotation: FlowType::named("T"),
                    optional: true,
                }],
                rest: Some(Box::new(FunctionParam {
                    name: Some("rest".into()),
                    type_annotation: FlowType::array(FlowType::Any),
                    optional: false,
                })),
                return_type: Box::new(FlowType::named("T")),
            },
        });
        assert_eq!(
            FlowWriter::emit_statement(&Statement::Declaration(func.clone())),
            "declare function f<T: string>(x?: T, ...rest: Array<any>): T;"
        );
        assert_eq!(
            FlowWriter::emit_statement(&Statement::ExportNamed(func.clone())),
            "declare export function f<T: string>(x?: T, ...rest: Array<any>): T;"
        );
        assert_eq!(
            FlowWriter::emit_statement(&Statement::ExportDefault(ExportDefault::Declaration(func))),
            "declare export default function f<T: string>(x?: T, ...rest: Array<any>): T;"
        );
    }

    #[test]
    fn test_variable_declares_one_per_line() {
        let var = Declaration::Variable(VariableDeclaration {
            declarations: vec![
                Identifier {
                    name: "a".into(),
                    type_annotation: Some(FlowType::String),
                },
                Identifier {
                    name: "b".into(),
                    type_annotation: None,
                },
            ],
        });
        assert_eq!(
            FlowWriter::emit_statement(&Statement::ExportNamed(var)),
            "declare export var a: string;\ndeclare export var b;"
        );
    }

    #[test]
    fn test_file_layout() {
        let file = File {
            name: "a.d.ts".into(),
            header: vec!["@flow".into(), "@generated by TsFlow".into()],
            imports: vec![ImportDeclaration {
                kind: ImportKind::Type,
                specifiers: vec![ImportSpecifier::Named {
                    imported: "ReactNode".into(),
                    local: "$tsflower_subst$React$ReactNode".into(),
                    kind: None,
                }],
                source: "tsflower/subst/react".into(),
            }],
            body: vec![Statement::ExportDefault(ExportDefault::Identifier("A".into()))],
        };
        assert_eq!(
            FlowWriter::emit(&file),
            "/* @flow\n * @generated by TsFlow\n */\n\n\
             import type { ReactNode as $tsflower_subst$React$ReactNode } from 'tsflower/subst/react';\n\n\
             export default A;\n"
        );
    }
}
