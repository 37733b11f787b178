//! TypeScript declaration files (`.d.ts`) to Flow library definitions.
//!
//! `tsflow-convert` reads TypeScript declarations with tree-sitter and builds
//! the equivalent Flow declarations. Constructs it cannot translate are kept
//! as placeholders that quote the original source, so a converted file always
//! has one statement per input statement and nothing is silently lost.
//!
//! # Architecture
//!
//! ```text
//! .d.ts text ─> SourceFile ─> Converter ─> ConvertedFile ─┬─> Flow (.js.flow)
//!   (input/)    (tree-sitter)  (convert/)    (ir.rs)       └─> JSON
//!                                 │
//!                            RewriteConfig
//!                             (rewrite/)
//! ```
//!
//! References to well-known library types (`React.Component`,
//! `ReactNative.ViewStyle`, ...) go through [`rewrite`] first: a macro
//! computes a custom Flow type, or an import substitution swaps in a type from
//! a compatibility module and records the import the output file needs.
//!
//! # Example
//!
//! ```ignore
//! use tsflow_convert::{RewriteConfig, SourceFile, convert_source_file, output::FlowWriter};
//!
//! let source = SourceFile::parse("index.d.ts", "export type Id = string | number;")?;
//! let converted = convert_source_file(&source, RewriteConfig::builtin());
//! let flow = FlowWriter::emit(&converted.file);
//! // => "/* @flow ... */\n\nexport type Id = string | number;\n"
//! ```

pub mod convert;
pub mod input;
pub mod ir;
pub mod output;
pub mod registry;
pub mod rewrite;
pub mod traits;

// Re-exports: conversion
pub use convert::{
    ConversionResult, ConvertError, ConvertedFile, Converter, Diagnostic, HEADER,
    convert_source_file,
};

// Re-exports: input
pub use input::{ParseError, SourceFile, Span, SyntaxKind};

// Re-exports: rewrites
pub use rewrite::{
    ImportSubstitution, PendingImport, RewriteConfig, RewriteLibrary, RewriteRule, RewriteTable,
};

// Re-exports: traits and registry
pub use registry::{register_writer, writer_for_format, writers};
pub use traits::Writer;

/// Parse and convert TypeScript declaration source in one step.
pub fn convert_str(
    name: &str,
    text: &str,
    rewrites: &RewriteConfig,
) -> Result<ConvertedFile, ParseError> {
    let source = SourceFile::parse(name, text)?;
    Ok(convert_source_file(&source, rewrites))
}
