//! kgviz: batch converter from entity/relationship JSON to interactive graph pages
//!
//! # Subcommands
//! - `run` (default): convert every source file not yet in the processed log
//! - `pending`: list the files a run would convert
//! - `render <file>`: convert a single file, ignoring the log

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kgviz_core::RunConfig;
use kgviz_ingest::{render_file, BatchDriver, BatchPaths, FileLog};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "kgviz", version, about = "Render entity/relationship JSON as interactive HTML graphs")]
struct Cli {
    /// Optional TOML file with path overrides (KGVIZ_* env vars win)
    #[arg(short, long, env = "KGVIZ_CONFIG", default_value = "kgviz.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert all unprocessed source files
    Run,

    /// List source files that have not been processed yet
    Pending,

    /// Convert one source file without touching the processed log
    Render {
        /// Source JSON document
        source: PathBuf,

        /// Output page (defaults to the source path with an .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match RunConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    tracing::debug!(?config, "Loaded run config");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let log = FileLog::open(&config.processed_log).await?;
            let mut driver = BatchDriver::new(BatchPaths::from(&config), log);
            let report = driver.run().await?;
            for name in &report.processed {
                println!("Processed: {}", name);
            }
        }
        Commands::Pending => {
            let log = FileLog::open(&config.processed_log).await?;
            let driver = BatchDriver::new(BatchPaths::from(&config), log);
            for name in driver.pending().await? {
                println!("{}", name);
            }
        }
        Commands::Render { source, output } => {
            let output = output.unwrap_or_else(|| source.with_extension("html"));
            let summary = render_file(&source, &output, &config.graph_config).await?;
            println!(
                "Rendered {} ({} nodes, {} edges)",
                output.display(),
                summary.nodes,
                summary.edges
            );
        }
    }

    Ok(())
}
