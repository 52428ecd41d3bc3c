//! Assigner — course roster management CLI.
//!
//! # Usage
//!
//! ```text
//! assigner [--config <path>] import <file> <section> [--force]
//! assigner canvas list
//! assigner canvas import <course_id> <section> [--force]
//! assigner roster list [--section <section>]
//! assigner roster add <name> <username> <section> [--force]
//! assigner roster remove <username>
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{canvas::CanvasCommand, import::ImportArgs, roster::RosterCommand};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "assigner",
    version,
    about = "Manage a course roster from CSV exports, Canvas, or by hand",
    long_about = None,
)]
struct Cli {
    /// Config document holding the roster and service credentials.
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "ASSIGNER_CONFIG",
        default_value = "_config.yml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import users from a registrar CSV export.
    Import(ImportArgs),

    /// Get Canvas course information.
    Canvas {
        #[command(subcommand)]
        command: CanvasCommand,
    },

    /// Manage class roster.
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Import(args) => args.run(&cli.config),
        Commands::Canvas { command } => commands::canvas::run(command, &cli.config),
        Commands::Roster { command } => commands::roster::run(command, &cli.config),
    }
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
