//! Command line argument parsing for the Lorikeet CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lorikeet - intent classification trainer for conversational agents
#[derive(Parser, Debug, Clone)]
#[command(name = "lorikeet")]
#[command(about = "Train intent classification networks for conversational agents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LorikeetArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LorikeetArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a network once and save the snapshot
    Train(TrainArgs),

    /// Serve the TCP control endpoint
    Serve(ServeArgs),
}

/// Arguments for one-shot training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the data directory (holds locales/<locale>/{intents.json,stopwords.txt})
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Locale to train for
    #[arg(short, long, default_value = "en")]
    pub locale: String,

    /// Learning rate
    #[arg(short, long, default_value = "0.1")]
    pub rate: f64,

    /// Hidden layer width
    #[arg(long = "hidden-nodes", default_value = "50")]
    pub hidden_nodes: usize,

    /// Training iterations
    #[arg(short, long, default_value = "200")]
    pub iterations: usize,

    /// Snapshot output path (defaults to <DATA_DIR>/locales/<locale>/training.json)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the control server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the data directory (holds locales/<locale>/{intents.json,stopwords.txt})
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Locale to train for
    #[arg(short, long, default_value = "en")]
    pub locale: String,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0")]
    pub address: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8081")]
    pub port: u16,
}
