//! Transcription via a helper binary built on demand.
//!
//! The speech engine is an external program compiled from bundled source the
//! first time it is needed (and again whenever the source is newer than the
//! binary). It takes the sample path as its sole argument, prints the
//! transcript on stdout, and reports diagnostics on stderr with non-zero
//! exit. Build and run failures are configuration problems, not transient
//! faults — they are fatal and never retried.

use crate::config::TranscriberConfig;
use crate::defaults;
use crate::error::{Result, VouchError};
use crate::exec::{CommandRunner, RunError};
use crate::stt::transcriber::Transcriber;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub struct HelperTranscriber {
    runner: Arc<dyn CommandRunner>,
    compiler: String,
    source: PathBuf,
    transcribe_timeout: Duration,
    build_timeout: Duration,
}

impl HelperTranscriber {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &TranscriberConfig) -> Self {
        Self {
            runner,
            compiler: config.compiler.clone(),
            source: config.source.clone().unwrap_or_else(default_helper_source),
            transcribe_timeout: Duration::from_secs(config.transcribe_timeout_secs),
            build_timeout: Duration::from_secs(config.build_timeout_secs),
        }
    }

    /// The built binary lives next to its source, minus the extension.
    pub fn binary_path(&self) -> PathBuf {
        self.source.with_extension("")
    }

    fn is_stale(&self, binary: &Path) -> bool {
        let Ok(binary_meta) = fs::metadata(binary) else {
            return true;
        };
        let Ok(source_meta) = fs::metadata(&self.source) else {
            return true;
        };
        match (binary_meta.modified(), source_meta.modified()) {
            (Ok(built), Ok(edited)) => built < edited,
            _ => true,
        }
    }

    /// Build the helper if the binary is missing or older than its source.
    async fn ensure_built(&self) -> Result<PathBuf> {
        if !self.source.exists() {
            return Err(VouchError::TranscriptionUnavailable {
                message: format!("helper source not found at {}", self.source.display()),
            });
        }
        let binary = self.binary_path();
        if !self.is_stale(&binary) {
            return Ok(binary);
        }

        let binary_arg = binary.display().to_string();
        let source_arg = self.source.display().to_string();
        let output = self
            .runner
            .run(
                &self.compiler,
                &["-o", &binary_arg, &source_arg],
                self.build_timeout,
            )
            .await
            .map_err(|e| match e {
                RunError::NotFound { command } => VouchError::TranscriptionUnavailable {
                    message: format!(
                        "{} not found. Install the toolchain that provides it",
                        command
                    ),
                },
                RunError::TimedOut { .. } => VouchError::TranscriptionBuildFailed {
                    message: "helper build timed out".to_string(),
                },
                RunError::Spawn { message, .. } => VouchError::TranscriptionBuildFailed { message },
            })?;

        if !output.success() {
            let detail = output.stderr.trim();
            let message = if detail.is_empty() {
                "build failed".to_string()
            } else {
                detail.to_string()
            };
            return Err(VouchError::TranscriptionBuildFailed { message });
        }

        Ok(binary)
    }
}

#[async_trait]
impl Transcriber for HelperTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        let binary = self.ensure_built().await?;
        let binary_arg = binary.display().to_string();
        let audio_arg = audio.display().to_string();

        let output = self
            .runner
            .run(&binary_arg, &[&audio_arg], self.transcribe_timeout)
            .await
            .map_err(|e| match e {
                RunError::NotFound { command } => VouchError::TranscriptionUnavailable {
                    message: format!("helper binary missing at {}", command),
                },
                RunError::TimedOut { .. } => VouchError::TranscriptionTimeout,
                RunError::Spawn { message, .. } => VouchError::TranscriptionFailed { message },
            })?;

        if !output.success() {
            let detail = output.stderr.trim();
            let detail = detail.strip_prefix("error: ").unwrap_or(detail);
            let message = if detail.is_empty() {
                "unknown error".to_string()
            } else {
                detail.to_string()
            };
            return Err(VouchError::TranscriptionFailed { message });
        }

        let text = output.stdout.trim();
        if text.is_empty() {
            return Err(VouchError::SilenceDetected);
        }
        Ok(text.to_string())
    }
}

/// Default helper source: `transcribe.swift` beside the running executable,
/// falling back to the config directory.
pub fn default_helper_source() -> PathBuf {
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let candidate = dir.join(defaults::HELPER_SOURCE_NAME);
        if candidate.exists() {
            return candidate;
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("vouch").join(defaults::HELPER_SOURCE_NAME))
        .unwrap_or_else(|| PathBuf::from(defaults::HELPER_SOURCE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::MockCommandRunner;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: TranscriberConfig,
        audio: PathBuf,
    }

    /// A helper source in a temp dir, with no binary built yet.
    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("transcribe.swift");
        fs::write(&source, "// helper source").unwrap();
        let audio = dir.path().join("clip.wav");
        fs::write(&audio, "RIFF").unwrap();

        let config = TranscriberConfig {
            source: Some(source),
            ..Default::default()
        };
        Fixture {
            _dir: dir,
            config,
            audio,
        }
    }

    #[tokio::test]
    async fn test_builds_then_runs_when_binary_missing() {
        let fx = fixture();
        let runner = Arc::new(
            MockCommandRunner::new()
                .with_success("", "")
                .with_success("please approve this\n", ""),
        );
        let transcriber = HelperTranscriber::new(runner.clone(), &fx.config);

        let text = transcriber.transcribe(&fx.audio).await.unwrap();
        assert_eq!(text, "please approve this");

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "swiftc");
        let binary = transcriber.binary_path().display().to_string();
        assert_eq!(
            calls[0].1,
            vec![
                "-o".to_string(),
                binary.clone(),
                fx.config.source.as_ref().unwrap().display().to_string()
            ]
        );
        assert_eq!(calls[1].0, binary);
        assert_eq!(calls[1].1, vec![fx.audio.display().to_string()]);
    }

    #[tokio::test]
    async fn test_skips_build_when_binary_is_fresh() {
        let fx = fixture();
        // Binary created after the source, so it is at least as new
        let transcriber =
            HelperTranscriber::new(Arc::new(MockCommandRunner::new()), &fx.config);
        fs::write(transcriber.binary_path(), "elf").unwrap();

        let runner = Arc::new(MockCommandRunner::new().with_success("hello there\n", ""));
        let transcriber = HelperTranscriber::new(runner.clone(), &fx.config);

        let text = transcriber.transcribe(&fx.audio).await.unwrap();
        assert_eq!(text, "hello there");
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_source_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = TranscriberConfig {
            source: Some(dir.path().join("gone.swift")),
            ..Default::default()
        };
        let runner = Arc::new(MockCommandRunner::new());
        let transcriber = HelperTranscriber::new(runner.clone(), &config);

        let result = transcriber.transcribe(Path::new("clip.wav")).await;
        assert!(matches!(
            result,
            Err(VouchError::TranscriptionUnavailable { .. })
        ));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_compiler_is_unavailable() {
        let fx = fixture();
        let runner = Arc::new(MockCommandRunner::new().with_error(RunError::NotFound {
            command: "swiftc".to_string(),
        }));
        let transcriber = HelperTranscriber::new(runner, &fx.config);

        let result = transcriber.transcribe(&fx.audio).await;
        assert!(matches!(
            result,
            Err(VouchError::TranscriptionUnavailable { message }) if message.contains("swiftc")
        ));
    }

    #[tokio::test]
    async fn test_build_failure_carries_compiler_diagnostic() {
        let fx = fixture();
        let runner =
            Arc::new(MockCommandRunner::new().with_exit(1, "undefined symbol: recognizer\n"));
        let transcriber = HelperTranscriber::new(runner, &fx.config);

        let result = transcriber.transcribe(&fx.audio).await;
        assert!(matches!(
            result,
            Err(VouchError::TranscriptionBuildFailed { message })
                if message == "undefined symbol: recognizer"
        ));
    }

    #[tokio::test]
    async fn test_build_timeout_is_fatal() {
        let fx = fixture();
        let runner = Arc::new(MockCommandRunner::new().with_error(RunError::TimedOut {
            command: "swiftc".to_string(),
            seconds: 60,
        }));
        let transcriber = HelperTranscriber::new(runner, &fx.config);

        let result = transcriber.transcribe(&fx.audio).await;
        assert!(matches!(
            result,
            Err(VouchError::TranscriptionBuildFailed { message })
                if message == "helper build timed out"
        ));
    }

    #[tokio::test]
    async fn test_run_failure_strips_error_prefix() {
        let fx = fixture();
        let runner = Arc::new(
            MockCommandRunner::new()
                .with_success("", "")
                .with_exit(4, "error: speech recognizer not available\n"),
        );
        let transcriber = HelperTranscriber::new(runner, &fx.config);

        let result = transcriber.transcribe(&fx.audio).await;
        assert!(matches!(
            result,
            Err(VouchError::TranscriptionFailed { message })
                if message == "speech recognizer not available"
        ));
    }

    #[tokio::test]
    async fn test_run_timeout_maps_to_transcription_timeout() {
        let fx = fixture();
        let runner = Arc::new(
            MockCommandRunner::new()
                .with_success("", "")
                .with_error(RunError::TimedOut {
                    command: "transcribe".to_string(),
                    seconds: 30,
                }),
        );
        let transcriber = HelperTranscriber::new(runner, &fx.config);

        let result = transcriber.transcribe(&fx.audio).await;
        assert!(matches!(result, Err(VouchError::TranscriptionTimeout)));
    }

    #[tokio::test]
    async fn test_empty_output_is_silence() {
        let fx = fixture();
        let runner = Arc::new(
            MockCommandRunner::new()
                .with_success("", "")
                .with_success("  \n", ""),
        );
        let transcriber = HelperTranscriber::new(runner, &fx.config);

        let result = transcriber.transcribe(&fx.audio).await;
        assert!(matches!(result, Err(VouchError::SilenceDetected)));
    }

    #[test]
    fn test_binary_path_drops_extension() {
        let config = TranscriberConfig {
            source: Some(PathBuf::from("/opt/vouch/transcribe.swift")),
            ..Default::default()
        };
        let transcriber = HelperTranscriber::new(Arc::new(MockCommandRunner::new()), &config);
        assert_eq!(
            transcriber.binary_path(),
            PathBuf::from("/opt/vouch/transcribe")
        );
    }
}
