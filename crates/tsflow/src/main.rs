//! `tsflow`: translate TypeScript declaration files into Flow.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::TsflowConfig;

#[derive(Parser)]
#[command(name = "tsflow", version, about = "Translate TypeScript declaration files into Flow")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root used to find .tsflow/config.toml (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a single declaration file
    File(commands::file::FileArgs),

    /// Convert every .d.ts file under a directory
    Tree(commands::tree::TreeArgs),

    /// List the enabled rewrite libraries and their rules
    Rewrites(commands::rewrites::RewritesArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = cli.root.unwrap_or_else(|| PathBuf::from("."));
    let config = TsflowConfig::load(&root);

    let result = match cli.command {
        Command::File(args) => commands::file::run(args, &config),
        Command::Tree(args) => commands::tree::run(args, &config),
        Command::Rewrites(args) => commands::rewrites::run(args, &config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` picks the level unless `--verbose` is given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
