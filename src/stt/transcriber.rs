use crate::error::{Result, VouchError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real helper binary vs mock).
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio` to text.
    ///
    /// A successful transcription is never empty; silence is an error.
    async fn transcribe(&self, audio: &Path) -> Result<String>;
}

/// Implement Transcriber for Arc<T> to allow sharing across components.
#[async_trait]
impl<T: Transcriber> Transcriber for Arc<T> {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        (**self).transcribe(audio).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MockOutcome {
    Respond,
    Fail,
    Silence,
}

/// Mock transcriber for testing.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    response: String,
    outcome: MockOutcome,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            response: "mock transcription".to_string(),
            outcome: MockOutcome::Respond,
        }
    }

    /// Configure the mock to return a specific transcript.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on transcribe.
    pub fn with_failure(mut self) -> Self {
        self.outcome = MockOutcome::Fail;
        self
    }

    /// Configure the mock to report silence.
    pub fn with_silence(mut self) -> Self {
        self.outcome = MockOutcome::Silence;
        self
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &Path) -> Result<String> {
        match self.outcome {
            MockOutcome::Respond => Ok(self.response.clone()),
            MockOutcome::Fail => Err(VouchError::TranscriptionFailed {
                message: "mock transcription failure".to_string(),
            }),
            MockOutcome::Silence => Err(VouchError::SilenceDetected),
        }
    }
}
