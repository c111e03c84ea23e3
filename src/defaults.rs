//! Default configuration constants for vouch.
//!
//! This module provides shared constants used across configuration types and
//! components to ensure consistency and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and file size for a gate that only needs coarse statistics.
pub const SAMPLE_RATE: u32 = 16000;

/// Recordings are mono.
pub const CHANNELS: u32 = 1;

/// Default bit depth for the captured WAV.
pub const BIT_DEPTH: u32 = 16;

/// Recording window for standard voice mode, in seconds.
pub const VOICE_RECORD_SECS: u64 = 7;

/// Recording window for haiku mode, in seconds.
///
/// Longer than standard voice mode so a full three-line verse fits.
pub const HAIKU_RECORD_SECS: u64 = 10;

/// Grace period added to the recording window before the capture subprocess
/// is considered hung, in seconds.
pub const CAPTURE_GRACE_SECS: u64 = 10;

/// Timeout for the statistics tool, in seconds.
pub const STATS_TIMEOUT_SECS: u64 = 10;

/// Timeout for a single transcription run, in seconds.
pub const TRANSCRIBE_TIMEOUT_SECS: u64 = 30;

/// Timeout for building the transcription helper from source, in seconds.
pub const HELPER_BUILD_TIMEOUT_SECS: u64 = 60;

/// Default audio capture command (sox's recording front-end).
pub const CAPTURE_TOOL: &str = "rec";

/// Default audio statistics command.
pub const STATS_TOOL: &str = "sox";

/// Default compiler for the bundled transcription helper.
pub const HELPER_COMPILER: &str = "swiftc";

/// File name of the bundled transcription helper source.
pub const HELPER_SOURCE_NAME: &str = "transcribe.swift";

/// Sincerity scores strictly below this are rejected as desperate.
pub const SCORE_FLOOR: i64 = 35;

/// Sincerity scores strictly above this are rejected as suspiciously composed.
pub const SCORE_CEILING: i64 = 65;

/// Neutral sub-score assigned when a statistic is missing or undefined.
///
/// Exactly half of the 25-point component maximum: absent data neither helps
/// nor hurts.
pub const NEUTRAL_COMPONENT_SCORE: f64 = 12.5;

/// Voice trigger prefix for standard voice mode.
pub const TRIGGER_VOICE: &str = "please listen to me";

/// Voice trigger prefix for haiku mode.
///
/// Checked before [`TRIGGER_VOICE`] — it is the longer prefix and would
/// otherwise be shadowed by it.
pub const TRIGGER_HAIKU: &str = "please listen to my haiku";

/// The courtesy token counted by the politeness gate.
pub const COURTESY_TOKEN: &str = "please";

/// Courtesy-token occurrences at or above this count are groveling.
pub const GROVEL_THRESHOLD: usize = 3;

/// One-in-N odds that an otherwise polite transcript is deemed insincere.
pub const INSINCERITY_ODDS: u32 = 10;

/// Syllable counts per haiku line, in order.
pub const HAIKU_PATTERN: [usize; 3] = [5, 7, 5];

/// Total syllables in a well-formed haiku.
pub const HAIKU_TOTAL: usize = 17;
