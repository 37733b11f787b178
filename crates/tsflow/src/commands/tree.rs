//! Tree command - convert a directory of declaration files in parallel.

use crate::config::TsflowConfig;
use anyhow::{Context, bail};
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tsflow_convert::{RewriteConfig, Writer};
use walkdir::WalkDir;

/// Tree command arguments
#[derive(Args)]
pub struct TreeArgs {
    /// Directory to search for .d.ts files
    pub src: PathBuf,

    /// Directory to write converted files to, mirroring the source layout
    pub dest: PathBuf,

    /// Output format: flow or json (default from config, else flow)
    #[arg(short, long)]
    pub format: Option<String>,
}

struct FileSummary {
    placeholders: usize,
    warnings: usize,
}

pub fn run(args: TreeArgs, config: &TsflowConfig) -> anyhow::Result<()> {
    let writer = super::resolve_writer(args.format.as_deref(), config)?;
    let rewrites = config.rewrite_config();

    let inputs: Vec<PathBuf> = WalkDir::new(&args.src)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_declaration_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    if inputs.is_empty() {
        bail!("no .d.ts files under {}", args.src.display());
    }

    let results: Vec<(&PathBuf, anyhow::Result<FileSummary>)> = inputs
        .par_iter()
        .map(|input| (input, convert_one(input, &args.src, &args.dest, &rewrites, writer)))
        .collect();

    let mut converted = 0;
    let mut placeholders = 0;
    let mut warnings = 0;
    let mut failed = 0;
    for (input, result) in results {
        match result {
            Ok(summary) => {
                converted += 1;
                placeholders += summary.placeholders;
                warnings += summary.warnings;
            }
            Err(e) => {
                failed += 1;
                eprintln!("error: {}: {e:#}", input.display());
            }
        }
    }

    println!(
        "Converted {converted} files ({placeholders} placeholders, {warnings} warnings)"
    );
    if failed > 0 {
        bail!("{failed} files failed");
    }
    Ok(())
}

fn convert_one(
    input: &Path,
    src: &Path,
    dest: &Path,
    rewrites: &RewriteConfig,
    writer: &dyn Writer,
) -> anyhow::Result<FileSummary> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let relative = input.strip_prefix(src).unwrap_or(input);
    let converted = tsflow_convert::convert_str(&relative.display().to_string(), &text, rewrites)?;

    let output = output_path(dest, relative, writer.extension());
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, writer.write(&converted))
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::debug!("{} -> {}", input.display(), output.display());

    Ok(FileSummary {
        placeholders: converted.placeholder_count(),
        warnings: converted.diagnostics.len(),
    })
}

fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".d.ts"))
}

/// `dest/a/index.d.ts` with extension `js.flow` → `dest/a/index.js.flow`.
fn output_path(dest: &Path, relative: &Path, extension: &str) -> PathBuf {
    let file_name = relative
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".d.ts").unwrap_or(file_name);
    dest.join(relative).with_file_name(format!("{stem}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("out"), Path::new("a/index.d.ts"), "js.flow"),
            PathBuf::from("out/a/index.js.flow")
        );
        assert_eq!(
            output_path(Path::new("out"), Path::new("types.d.ts"), "json"),
            PathBuf::from("out/types.json")
        );
    }

    #[test]
    fn test_is_declaration_file() {
        assert!(is_declaration_file(Path::new("src/index.d.ts")));
        assert!(!is_declaration_file(Path::new("src/index.ts")));
        assert!(!is_declaration_file(Path::new("src/index.js.flow")));
    }
}
