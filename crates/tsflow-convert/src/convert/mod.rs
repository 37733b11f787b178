//! TypeScript declarations → Flow IR.
//!
//! Conversion never fails as a whole. Each statement and each type either
//! translates, or becomes a placeholder quoting the original text (see
//! [`placeholder`]). Failures are contained to the smallest enclosing unit:
//! a bad type argument yields one `$FlowFixMe`, not a lost declaration.

pub mod placeholder;
mod statements;
mod types;

use crate::input::{InputNode, SourceFile, Span, SyntaxKind};
use crate::ir::{File, Statement};
use crate::rewrite::{ImportBindings, PendingImport, RewriteConfig};
use serde::Serialize;

/// Lines of the block comment at the top of every output file.
pub const HEADER: [&str; 2] = ["@flow", "@generated by TsFlow"];

/// A construct that could not be translated.
///
/// Never escapes the converter: statement conversion turns it into an error
/// placeholder, type conversion into a `$FlowFixMe`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Valid input using a construct with no translation yet.
    #[error("unimplemented: {0}")]
    Unimplemented(String),

    /// Object type member other than a property signature.
    #[error("unimplemented TypeElement kind: {0}")]
    UnimplementedMember(SyntaxKind),

    /// Input outside what the translation accepts.
    #[error("{0}")]
    Invalid(String),
}

pub type ConversionResult<T> = Result<T, ConvertError>;

/// A warning raised while converting a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub span: Option<Span>,
}

/// Output of converting one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedFile {
    pub file: File,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConvertedFile {
    /// Number of placeholders (statement and type) anywhere in the output.
    pub fn placeholder_count(&self) -> usize {
        self.file.body.iter().map(Statement::placeholder_count).sum()
    }
}

/// Per-file conversion state.
///
/// Holds the rewrite tables (shared, read-only), the local names bound by the
/// file's imports, the imports that fired substitutions need, and the
/// warnings raised so far. Create one per file.
pub struct Converter<'r> {
    rewrites: &'r RewriteConfig,
    file_name: String,
    bindings: ImportBindings,
    pending_imports: Vec<PendingImport>,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> Converter<'r> {
    pub fn new(rewrites: &'r RewriteConfig) -> Self {
        Self {
            rewrites,
            file_name: String::new(),
            bindings: ImportBindings::default(),
            pending_imports: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Convert a whole file: header, substitution imports, then one output
    /// statement per input statement.
    pub fn convert_file(mut self, source: &SourceFile) -> ConvertedFile {
        self.file_name = source.name().to_string();
        tracing::debug!(file = %self.file_name, "converting");

        let body: Vec<Statement> = source
            .statements()
            .into_iter()
            .map(|stmt| self.convert_statement(stmt))
            .collect();

        let imports = self
            .pending_imports
            .iter()
            .map(PendingImport::to_declaration)
            .collect();

        let file = File {
            name: self.file_name,
            header: HEADER.iter().map(|line| line.to_string()).collect(),
            imports,
            body,
        };
        ConvertedFile {
            file,
            diagnostics: self.diagnostics,
        }
    }

    /// Imports recorded so far, in first-use order.
    pub fn pending_imports(&self) -> &[PendingImport] {
        &self.pending_imports
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn record_import(&mut self, import: PendingImport) {
        if !self.pending_imports.contains(&import) {
            self.pending_imports.push(import);
        }
    }

    pub(crate) fn warn(&mut self, message: String, span: Option<Span>) {
        tracing::warn!(file = %self.file_name, "{message}");
        self.diagnostics.push(Diagnostic { message, span });
    }
}

/// Convert one parsed file with the given rewrites.
pub fn convert_source_file(source: &SourceFile, rewrites: &RewriteConfig) -> ConvertedFile {
    Converter::new(rewrites).convert_file(source)
}

/// Kind name for diagnostics: the construct name, or tree-sitter's kind for
/// nodes outside the classification.
pub(crate) fn describe(node: InputNode<'_>) -> String {
    match node.kind() {
        SyntaxKind::Unknown | SyntaxKind::Error => node.raw_kind().to_string(),
        kind => kind.name().to_string(),
    }
}
