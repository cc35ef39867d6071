//! Chat Mockup - terminal mockup of a messaging app
//!
//! A chat list and a conversation view over hard-coded sample data.

mod commands;
mod config;
mod error;
mod models;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use tui::log_capture::LogBuffer;

#[derive(Parser)]
#[command(name = "chat-mockup")]
#[command(about = "Terminal mockup of a messaging app", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui,

    /// List the sample chats
    Chats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the sample conversation of a chat
    Read {
        /// Chat ID (from `chats` output)
        chat_id: u32,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    match command {
        Commands::Tui => {
            // Log lines go to the debug pane, never to the alternate screen.
            let logs = LogBuffer::default();
            tracing_subscriber::registry()
                .with(env_filter(cli.verbose))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(logs.clone())
                        .with_ansi(false)
                        .with_target(false),
                )
                .init();

            let config = Config::load(cli.config.as_deref())?;
            tui::run(&config, logs).await?;
        }
        Commands::Chats { json } => {
            init_stderr_logging(cli.verbose);
            commands::list_chats(json)?;
        }
        Commands::Read { chat_id, json } => {
            init_stderr_logging(cli.verbose);
            let config = Config::load(cli.config.as_deref())?;
            commands::read_chat(chat_id, json, &config.display_name)?;
        }
    }

    Ok(())
}

fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
