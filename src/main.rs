//! Renaissance CLI entry point

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "renaissance")]
#[command(about = "Rewrite a C++ fact graph into a canonical architecture graph", long_about = None)]
struct Cli {
    /// Input fact graph (.graphml or interchange .json)
    #[arg(short, long)]
    input: PathBuf,

    /// Output architecture graph (interchange JSON)
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the schema summary of the output graph here
    #[arg(short = 't', long)]
    ontology: Option<PathBuf>,

    /// Also render the output graph as Graphviz DOT here
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Pipeline configuration file (TOML, `[pipeline]` table)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip functions, declarations and macros
    #[arg(long)]
    no_ops: bool,

    /// Skip files and their associations (also skips linking)
    #[arg(long)]
    no_files: bool,

    /// Skip folder inversion (also skips linking)
    #[arg(long)]
    no_folders: bool,

    /// Merge declarations joined by alias edges
    #[arg(long)]
    merge_aliases: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "renaissance={level},renaissance_core={level},renaissance_transform={level},renaissance_io={level}",
            level = log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Renaissance v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::pipeline_config(
        cli.config.as_deref(),
        commands::StageFlags {
            no_ops: cli.no_ops,
            no_files: cli.no_files,
            no_folders: cli.no_folders,
            merge_aliases: cli.merge_aliases,
        },
    )?;

    commands::transform(
        &cli.input,
        &cli.output,
        cli.ontology.as_deref(),
        cli.dot.as_deref(),
        config,
    )
}
