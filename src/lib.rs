//! vouch - Voice sincerity gate for agent prompt approval
//!
//! Records a short clip, scores its vocal sincerity from coarse acoustic
//! statistics, transcribes it via an external helper, and gates prompts on
//! the result. In haiku mode the transcript must also scan 5-7-5.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod chance;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod haiku;
pub mod lexical;
pub mod pipeline;
pub mod request;
pub mod score;
pub mod stt;
pub mod verdict;

// Capability seams (runner → transcriber → dice)
pub use chance::{Chance, DiceRoll, FixedChance};
pub use exec::{CommandOutput, CommandRunner, MockCommandRunner, SystemCommandRunner};
pub use stt::transcriber::{MockTranscriber, Transcriber};

// Pipeline
pub use pipeline::VoiceGate;
pub use request::VoiceMode;
pub use verdict::{Outcome, Rejection};

// Error handling
pub use error::{Result, VouchError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
