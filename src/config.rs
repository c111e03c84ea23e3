use crate::defaults;
use crate::error::{Result, VouchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub gate: GateConfig,
    pub transcriber: TranscriberConfig,
}

/// Audio capture and analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub capture_tool: String,
    pub stats_tool: String,
    pub sample_rate: u32,
    pub channels: u32,
    pub bit_depth: u32,
    pub voice_secs: u64,
    pub haiku_secs: u64,
}

/// Sincerity gate configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub score_floor: i64,
    pub score_ceiling: i64,
}

/// Transcription helper configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriberConfig {
    pub compiler: String,
    /// Helper source path; `None` resolves next to the executable, then the
    /// config directory.
    pub source: Option<PathBuf>,
    pub transcribe_timeout_secs: u64,
    pub build_timeout_secs: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            capture_tool: defaults::CAPTURE_TOOL.to_string(),
            stats_tool: defaults::STATS_TOOL.to_string(),
            sample_rate: defaults::SAMPLE_RATE,
            channels: defaults::CHANNELS,
            bit_depth: defaults::BIT_DEPTH,
            voice_secs: defaults::VOICE_RECORD_SECS,
            haiku_secs: defaults::HAIKU_RECORD_SECS,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            score_floor: defaults::SCORE_FLOOR,
            score_ceiling: defaults::SCORE_CEILING,
        }
    }
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            compiler: defaults::HELPER_COMPILER.to_string(),
            source: None,
            transcribe_timeout_secs: defaults::TRANSCRIBE_TIMEOUT_SECS,
            build_timeout_secs: defaults::HELPER_BUILD_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults if the file doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(VouchError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOUCH_CAPTURE_TOOL → audio.capture_tool
    /// - VOUCH_STATS_TOOL → audio.stats_tool
    /// - VOUCH_HELPER_SOURCE → transcriber.source
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(tool) = std::env::var("VOUCH_CAPTURE_TOOL")
            && !tool.is_empty()
        {
            self.audio.capture_tool = tool;
        }

        if let Ok(tool) = std::env::var("VOUCH_STATS_TOOL")
            && !tool.is_empty()
        {
            self.audio.stats_tool = tool;
        }

        if let Ok(source) = std::env::var("VOUCH_HELPER_SOURCE")
            && !source.is_empty()
        {
            self.transcriber.source = Some(PathBuf::from(source));
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/vouch/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vouch")
            .join("config.toml")
    }
}
