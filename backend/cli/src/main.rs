mod check_config_cmd;
mod replay_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use nodehook_config::{config_dir, config_file_path};

#[derive(Parser)]
#[command(name = "nodehook")]
#[command(about = "Content-repository signals to webhooks")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $NODEHOOK_CONFIG_DIR/config.yaml or ~/.nodehook/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an NDJSON script of store operations and signals as one session
    Replay {
        /// Path to the script
        script: PathBuf,
    },
    /// Print the redacted config and its validation findings
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Replay { script } => replay_cmd::run(&config_path, &script).await,
        Commands::CheckConfig => {
            let valid = check_config_cmd::run(&config_path).await?;
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
