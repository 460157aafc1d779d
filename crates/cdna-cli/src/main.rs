mod profiles;
mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::profiles::ProfilesCommands;

#[derive(Debug, Parser)]
#[command(name = "cdna-cli")]
#[command(about = "Creator DNA command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan a creator's posts and print the resulting profile as JSON
    Scan {
        /// Path to a JSON file with `creator_id` and `posts`
        #[arg(long, short)]
        input: PathBuf,
        /// Also store the profile and a history snapshot
        #[arg(long)]
        save: bool,
    },
    /// Inspect and manage stored profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("cdna-cli: run with --help to list commands");
        return Ok(());
    };

    let config = cdna_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries command output (profile JSON); logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Scan { input, save } => scan::run_scan(&config, &input, save).await,
        Commands::Profiles { command } => {
            let pool = cdna_db::connect_pool_from_config(&config).await?;
            profiles::run_profiles(&pool, command).await
        }
        Commands::Db { command } => {
            let pool = cdna_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    cdna_db::ping(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = cdna_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
            Ok(())
        }
    }
}
