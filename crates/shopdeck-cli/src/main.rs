use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopdeck")]
#[command(about = "Shopdeck - admin dashboard for a remote product catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// View and edit the user profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Products { action } => commands::products::run(action).await,
        Commands::Profile { action } => commands::profile::run(action).await,
    }
}
