//! Error types for vouch.
//!
//! Only infrastructure faults live here — a missing tool, a timed-out
//! subprocess, silent audio. Judgment rejections (score out of band, bad
//! haiku, impolite transcript) are first-class [`crate::verdict::Outcome`]
//! values, never errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VouchError {
    // Audio capture errors
    #[error(
        "capture tool not found: {tool}. Install sox (provides `rec`): apt install sox / brew install sox"
    )]
    CaptureToolNotFound { tool: String },

    #[error("recording failed: {message}")]
    CaptureFailed { message: String },

    #[error("recording timed out")]
    CaptureTimeout,

    // Feature extraction errors
    #[error("audio analysis tool not found: {tool}. Install sox: apt install sox / brew install sox")]
    StatsToolNotFound { tool: String },

    #[error("audio analysis timed out")]
    StatsTimeout,

    #[error("captured sample unreadable: {message}")]
    SampleUnreadable { message: String },

    // Transcription errors
    #[error("transcriber unavailable: {message}")]
    TranscriptionUnavailable { message: String },

    #[error("transcriber build failed: {message}")]
    TranscriptionBuildFailed { message: String },

    #[error("transcription timed out")]
    TranscriptionTimeout,

    #[error("transcription failed: {message}")]
    TranscriptionFailed { message: String },

    #[error("silence detected, no speech recognized")]
    SilenceDetected,

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl VouchError {
    /// Fault code for the block response.
    ///
    /// Every infrastructure fault is reported to the caller under one of two
    /// codes: microphone-side faults (capture, analysis, the sample itself)
    /// and transcription-side faults (helper build, run, silence).
    pub fn fault_code(&self) -> &'static str {
        match self {
            VouchError::TranscriptionUnavailable { .. }
            | VouchError::TranscriptionBuildFailed { .. }
            | VouchError::TranscriptionTimeout
            | VouchError::TranscriptionFailed { .. }
            | VouchError::SilenceDetected => "E891 TRANSCRIPTION FAULT",
            _ => "E774 MICROPHONE FAULT",
        }
    }

    /// Human-readable block reason: `<fault code> — <detail>`.
    pub fn block_reason(&self) -> String {
        format!("{} — {}.", self.fault_code(), self)
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VouchError>;
