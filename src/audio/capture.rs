//! Microphone capture via an external recording tool.
//!
//! The recorder shells out to sox's `rec` with fixed sample-rate, channel,
//! and bit-depth arguments. There is no cancellation mid-recording: the
//! subprocess either completes within its window plus a grace period or the
//! whole pipeline fails.

use crate::audio::sample::AudioSample;
use crate::config::AudioConfig;
use crate::defaults;
use crate::error::{Result, VouchError};
use crate::exec::{CommandRunner, RunError};
use std::sync::Arc;
use std::time::Duration;

/// Records one clip into an [`AudioSample`].
pub struct Recorder {
    runner: Arc<dyn CommandRunner>,
    config: AudioConfig,
}

impl Recorder {
    pub fn new(runner: Arc<dyn CommandRunner>, config: AudioConfig) -> Self {
        Self { runner, config }
    }

    /// Record for `window` seconds into the sample file.
    ///
    /// Any failure is fatal: a missing tool, a non-zero exit, or a subprocess
    /// that outlives the window plus the grace period. No retries — a second
    /// silent attempt would break the one-clip-one-judgment contract.
    pub async fn record(&self, sample: &AudioSample, window: Duration) -> Result<()> {
        let rate = self.config.sample_rate.to_string();
        let channels = self.config.channels.to_string();
        let bits = self.config.bit_depth.to_string();
        let secs = window.as_secs().to_string();
        let path = sample.path().display().to_string();

        let args = [
            "-q", "-r", &rate, "-c", &channels, "-b", &bits, &path, "trim", "0", &secs,
        ];
        let timeout = window + Duration::from_secs(defaults::CAPTURE_GRACE_SECS);

        let output = self
            .runner
            .run(&self.config.capture_tool, &args, timeout)
            .await
            .map_err(|e| match e {
                RunError::NotFound { command } => VouchError::CaptureToolNotFound { tool: command },
                RunError::TimedOut { .. } => VouchError::CaptureTimeout,
                RunError::Spawn { message, .. } => VouchError::CaptureFailed { message },
            })?;

        if !output.success() {
            let detail = output.stderr.trim();
            let message = if detail.is_empty() {
                "unknown error".to_string()
            } else {
                detail.to_string()
            };
            return Err(VouchError::CaptureFailed { message });
        }

        Ok(())
    }
}
