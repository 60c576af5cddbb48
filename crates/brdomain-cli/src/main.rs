mod enrich;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brdomain")]
#[command(about = "Enrich .br domains with RDAP ownership and ReceitaWS company data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up every domain not yet in the output file and save the results
    Enrich {
        /// Input CSV (header row, domain in the first column)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output CSV, created on the first saved domain
        #[arg(long)]
        output: Option<PathBuf>,
        /// List the domains that would be looked up, without any network call
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the normalized domain list, one per line
    Normalize {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parsed before the environment so `--help` never depends on config.
    let cli = Cli::parse();

    let config = brdomain_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    match cli.command {
        Commands::Enrich {
            input,
            output,
            dry_run,
        } => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let output = output.unwrap_or_else(|| config.output_path.clone());
            let plan = enrich::plan_run(&input, &output)?;
            if dry_run {
                for domain in &plan.pending {
                    println!("{domain}");
                }
                tracing::info!(
                    pending = plan.pending.len(),
                    already_present = plan.already_present,
                    "dry run, no lookups performed"
                );
                return Ok(());
            }
            enrich::execute_plan(&config, plan).await?;
        }
        Commands::Normalize { input } => {
            let input = input.unwrap_or_else(|| config.input_path.clone());
            let raw = input::read_domain_column(&input)?;
            for domain in brdomain_core::normalize_domains(&raw) {
                println!("{domain}");
            }
        }
    }

    Ok(())
}
