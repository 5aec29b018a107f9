use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "studybuddy", version, about = "StudyBuddy chat relay and terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the relay server
    Serve {
        /// Path to the config file
        #[arg(short, long, default_value = studybuddy::config::Config::DEFAULT_PATH)]
        config: PathBuf,

        /// Override the listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with a running relay from the terminal
    Chat {
        /// Relay base URL
        #[arg(long, default_value = studybuddy_client::RelayClient::DEFAULT_URL)]
        url: String,

        /// Starting category
        #[arg(long)]
        category: Option<String>,

        /// Starting subject within the category
        #[arg(long)]
        subject: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => cli::serve::run(&config, host, port).await,
        Command::Chat {
            url,
            category,
            subject,
        } => cli::chat::run(url, category.as_deref(), subject.as_deref()).await,
    }
}
