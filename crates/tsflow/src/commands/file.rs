//! File command - convert one declaration file.

use crate::config::TsflowConfig;
use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;
use tsflow_convert::Writer;

/// File command arguments
#[derive(Args)]
pub struct FileArgs {
    /// Input declaration file, use - for stdin
    pub input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: flow or json (default from config, else flow)
    #[arg(short, long)]
    pub format: Option<String>,
}

pub fn run(args: FileArgs, config: &TsflowConfig) -> anyhow::Result<()> {
    let writer = super::resolve_writer(args.format.as_deref(), config)?;

    let (name, text) = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        ("<stdin>".to_string(), buf)
    } else {
        let text = std::fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read {}", args.input.display()))?;
        (args.input.display().to_string(), text)
    };

    let rewrites = config.rewrite_config();
    let converted = tsflow_convert::convert_str(&name, &text, &rewrites)?;
    let code = writer.write(&converted);

    match args.output {
        Some(path) => {
            std::fs::write(&path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Converted {} -> {} ({} placeholders)",
                name,
                path.display(),
                converted.placeholder_count()
            );
        }
        None => print!("{code}"),
    }
    Ok(())
}
