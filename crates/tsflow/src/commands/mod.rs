//! Subcommand implementations.

pub mod file;
pub mod rewrites;
pub mod tree;

use crate::config::TsflowConfig;
use anyhow::anyhow;
use tsflow_convert::{Writer, writer_for_format, writers};

/// Writer for `--format`, falling back to the configured format.
fn resolve_writer(format: Option<&str>, config: &TsflowConfig) -> anyhow::Result<&'static dyn Writer> {
    let format = format.unwrap_or_else(|| config.format());
    writer_for_format(format).ok_or_else(|| {
        let available: Vec<_> = writers().iter().map(|w| w.format()).collect();
        anyhow!("unknown output format: {format} (available: {})", available.join(", "))
    })
}
