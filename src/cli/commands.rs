use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hearts")]
#[command(about = "Hearts.exe - a playful Valentine story for your terminal")]
#[command(version)]
pub struct Args {
    /// Log engine decisions to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play through the story
    Play {
        /// Data directory path
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Content document to load instead of the configured one
        #[arg(long)]
        content: Option<PathBuf>,
        /// Skip every pause and timer delay
        #[arg(long)]
        fast: bool,
        /// Keep previous frames on screen instead of clearing
        #[arg(long)]
        no_clear: bool,
        /// Seed for the remembered answer in the final letter
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check that a content document is valid
    Validate {
        /// Content document path
        path: PathBuf,
    },
    /// Print the active content document as JSON
    Content {
        /// Print the built-in fallback document instead
        #[arg(long)]
        fallback: bool,
        /// Data directory path
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Inspect the stored display name
    Name {
        #[command(subcommand)]
        command: NameCommands,
        /// Data directory path
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum NameCommands {
    /// Show the stored name
    Show,
    /// Forget the stored name
    Clear,
}
