//! Wayfarer CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive chat or single-message mode
//! - `serve`   — Start the HTTP API server
//! - `demo`    — Run the canned demo queries through the agent
//! - `tools`   — List the travel tools
//! - `init`    — Write a default config file
//! - `doctor`  — Diagnose configuration and provider health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "Wayfarer — a tool-calling travel planning agent",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the travel agent
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the demo queries with the offline provider
    Demo {
        /// Seconds to pause between queries
        #[arg(long, default_value_t = 0)]
        pause: u64,
    },

    /// List the available tools
    Tools,

    /// Write a default config file to ~/.wayfarer/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Diagnose configuration and provider health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    // The server logs requests; interactive commands keep stderr quiet.
    let filter = match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        (Commands::Serve { .. }, false) => "info",
        _ => "warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Demo { pause } => commands::demo::run(pause).await?,
        Commands::Tools => commands::tools::run()?,
        Commands::Init { force } => commands::init::run(force)?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
