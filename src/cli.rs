//! Command-line interface for vouch
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Voice sincerity gate for agent prompt approval
#[derive(Parser, Debug)]
#[command(
    name = "vouch",
    version,
    about = "Voice sincerity gate for agent prompt approval"
)]
pub struct Cli {
    /// Subcommand to execute; without one, vouch runs as a prompt hook
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the recording window. Examples: 10s, 30s, 1m
    #[arg(long, value_name = "DURATION", value_parser = parse_window_secs)]
    pub duration: Option<u64>,
}

/// Parse a recording window string into seconds.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`30s`, `5m`), and compound (`1m30s`).
fn parse_window_secs(s: &str) -> Result<u64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs())
        .map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an existing WAV clip and print the sincerity breakdown
    Score {
        /// WAV file to analyze
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Check a line of text against the 5-7-5 haiku structure
    Haiku {
        /// Words to validate
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Check system dependencies
    Check,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
