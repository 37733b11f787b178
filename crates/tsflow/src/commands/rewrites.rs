//! Rewrites command - show which library types get rewritten.

use crate::config::TsflowConfig;
use clap::Args;
use serde::Serialize;

/// Rewrites command arguments
#[derive(Args)]
pub struct RewritesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct LibrarySummary<'a> {
    name: &'a str,
    modules: &'a [String],
    namespaces: &'a [String],
    rules: Vec<String>,
    globals: Vec<String>,
}

pub fn run(args: RewritesArgs, config: &TsflowConfig) -> anyhow::Result<()> {
    let rewrites = config.rewrite_config();
    let summaries: Vec<LibrarySummary> = rewrites
        .libraries()
        .iter()
        .map(|lib| LibrarySummary {
            name: &lib.name,
            modules: &lib.modules,
            namespaces: &lib.namespaces,
            rules: lib.table.rule_names(),
            globals: lib.globals.rule_names(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No rewrite libraries enabled");
        return Ok(());
    }
    for lib in &summaries {
        println!("{} (modules: {})", lib.name, lib.modules.join(", "));
        if !lib.namespaces.is_empty() {
            println!("  global namespaces: {}", lib.namespaces.join(", "));
        }
        for rule in &lib.rules {
            println!("  {rule}");
        }
        for rule in &lib.globals {
            println!("  {rule} (global)");
        }
    }
    Ok(())
}
