//! lldb-mi adapter CLI
//!
//! Inspects what the adapter would do with a launch/attach configuration:
//! - `normalize`: canonical configuration, connection path and session flags
//! - `capabilities`: the `initialize` capability set
//! - `settings`: effective adapter settings

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lmi_cli::commands;
use lmi_core::RequestMode;

#[derive(Parser)]
#[command(name = "lmi-adapter")]
#[command(author, version, about = "Session bootstrap inspector for the lldb-mi debug adapter")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the adapter settings file
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize launch/attach arguments and show the resulting session setup
    Normalize {
        /// JSON file holding the request's `arguments` object
        args: PathBuf,
        /// Treat the arguments as an attach request
        #[arg(short, long)]
        attach: bool,
    },

    /// Print the capabilities announced on `initialize`
    Capabilities,

    /// Print the effective adapter settings
    Settings {
        /// Write the effective settings to the settings file instead
        #[arg(short, long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Normalize { args, attach } => {
            let settings = commands::load_settings(cli.settings.as_deref())?;
            let mode = if attach {
                RequestMode::Attach
            } else {
                RequestMode::Launch
            };
            let report = commands::normalize(&args, mode, &settings)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Capabilities => {
            println!("{}", commands::capabilities()?);
        }
        Commands::Settings { write: true } => {
            let path = commands::write_settings(cli.settings.as_deref())?;
            println!("{}", path.display());
        }
        Commands::Settings { write: false } => {
            let settings = commands::load_settings(cli.settings.as_deref())?;
            print!("{}", commands::settings(&settings)?);
        }
    }

    Ok(())
}
