//! Command-line interface for lernfunk
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Graded German news audio for language learners
#[derive(Parser, Debug)]
#[command(
    name = "lernfunk",
    version,
    about = "Graded German news audio for language learners"
)]
pub struct Cli {
    /// Subcommand to execute (default: run the pipeline)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output below warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Maximum number of stories in the digest
    #[arg(long, value_name = "N")]
    pub max_stories: Option<usize>,

    /// Chat model for generation and translation
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Narration voice
    #[arg(long, value_name = "VOICE")]
    pub voice: Option<String>,

    /// Output directory for digests and audio
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Generate five difficulty levels (A1–C1) instead of three
    #[arg(long)]
    pub extended_levels: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check external dependencies (ffmpeg, ffprobe, API key)
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
