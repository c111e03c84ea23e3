//! Transient audio sample artifact.
//!
//! One pipeline run owns exactly one recording. The file is created before
//! capture and deleted when the handle drops, so every exit path — approval,
//! rejection, or fault — releases it exactly once.

use crate::error::{Result, VouchError};
use std::path::Path;
use tempfile::{Builder, TempPath};

/// Handle to the WAV recording of a single pipeline run.
pub struct AudioSample {
    path: TempPath,
}

impl AudioSample {
    /// Create an empty sample file in the system temp directory.
    pub fn create() -> Result<Self> {
        let file = Builder::new()
            .prefix("vouch_voice_")
            .suffix(".wav")
            .tempfile()?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Check that a path holds a parseable WAV with at least one sample.
pub fn validate_wav(path: &Path) -> Result<()> {
    let reader = hound::WavReader::open(path).map_err(|e| VouchError::SampleUnreadable {
        message: format!("{}: {}", path.display(), e),
    })?;
    if reader.len() == 0 {
        return Err(VouchError::SampleUnreadable {
            message: format!("{}: recording contains no samples", path.display()),
        });
    }
    Ok(())
}

/// Clip length in seconds, for display.
pub fn wav_duration_secs(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| VouchError::SampleUnreadable {
        message: format!("{}: {}", path.display(), e),
    })?;
    let spec = reader.spec();
    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}
