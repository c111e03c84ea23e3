//! Acoustic feature extraction via an external statistics tool.
//!
//! `sox <file> -n stat` prints a `key: value` report; we parse it into a
//! [`FeatureSet`]. Parsing is total and best-effort: unparsable lines are
//! skipped, and a missing statistic is never an error — consumers fall back
//! to a neutral default.

use crate::audio::sample::validate_wav;
use crate::defaults;
use crate::error::{Result, VouchError};
use crate::exec::{CommandRunner, RunError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Named numeric statistics of one clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    values: HashMap<String, f64>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `key: value` report, one statistic per line.
    ///
    /// Keys are lowercased and internal whitespace runs are collapsed, so
    /// sox's aligned labels ("RMS     amplitude") resolve to their plain
    /// names. Lines without a colon or with a non-numeric value are skipped.
    pub fn parse(report: &str) -> Self {
        let mut values = HashMap::new();
        for line in report.lines() {
            let Some((raw_key, raw_value)) = line.split_once(':') else {
                continue;
            };
            let key = normalize_key(raw_key);
            if key.is_empty() {
                continue;
            }
            if let Ok(value) = raw_value.trim().parse::<f64>() {
                values.insert(key, value);
            }
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(normalize_key(name), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the statistics tool against a captured sample.
pub struct FeatureExtractor {
    runner: Arc<dyn CommandRunner>,
    stats_tool: String,
}

impl FeatureExtractor {
    pub fn new(runner: Arc<dyn CommandRunner>, stats_tool: impl Into<String>) -> Self {
        Self {
            runner,
            stats_tool: stats_tool.into(),
        }
    }

    /// Extract a [`FeatureSet`] from the WAV at `path`.
    ///
    /// The sample must exist and contain audio. Tool-not-found and timeout
    /// are fatal — a retry would not install sox or un-hang it.
    pub async fn extract(&self, path: &Path) -> Result<FeatureSet> {
        validate_wav(path)?;

        let path_arg = path.display().to_string();
        let output = self
            .runner
            .run(
                &self.stats_tool,
                &[&path_arg, "-n", "stat"],
                Duration::from_secs(defaults::STATS_TIMEOUT_SECS),
            )
            .await
            .map_err(|e| match e {
                RunError::NotFound { command } => VouchError::StatsToolNotFound { tool: command },
                RunError::TimedOut { .. } => VouchError::StatsTimeout,
                RunError::Spawn { message, .. } => VouchError::Other(message),
            })?;

        // The stat report goes to stderr. The exit status is deliberately
        // ignored: a partial report degrades scoring through the neutral
        // defaults rather than aborting.
        Ok(FeatureSet::parse(&output.stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::sample::AudioSample;
    use crate::exec::MockCommandRunner;

    /// A representative `sox <file> -n stat` report.
    const SOX_STAT_REPORT: &str = "\
Samples read:            112000
Length (seconds):      7.000000
Scaled by:         2147483647.0
Maximum amplitude:     0.187958
Minimum amplitude:    -0.211273
Midline amplitude:    -0.011658
Mean    norm:          0.013987
Mean    amplitude:    -0.000062
RMS     amplitude:     0.022612
Maximum delta:         0.115127
Minimum delta:         0.000000
Mean    delta:         0.006094
RMS     delta:         0.009034
Rough   frequency:          164
Volume adjustment:        4.743
";

    fn write_wav(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..1600 {
            writer.write_sample(((i % 80) as i16 - 40) * 300).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_parse_normalizes_aligned_keys() {
        let features = FeatureSet::parse(SOX_STAT_REPORT);
        assert_eq!(features.get("rms amplitude"), Some(0.022612));
        assert_eq!(features.get("rms delta"), Some(0.009034));
        assert_eq!(features.get("mean norm"), Some(0.013987));
        assert_eq!(features.get("maximum amplitude"), Some(0.187958));
        assert_eq!(features.get("rough frequency"), Some(164.0));
    }

    #[test]
    fn test_parse_skips_lines_without_colon() {
        let features = FeatureSet::parse("no separator here\nRMS amplitude: 0.5\n");
        assert_eq!(features.len(), 1);
        assert_eq!(features.get("rms amplitude"), Some(0.5));
    }

    #[test]
    fn test_parse_skips_non_numeric_values() {
        let report = "Try: -t raw -r 16000\nRMS amplitude: not-a-number\nMean norm: 0.1\n";
        let features = FeatureSet::parse(report);
        assert_eq!(features.get("rms amplitude"), None);
        assert_eq!(features.get("mean norm"), Some(0.1));
    }

    #[test]
    fn test_parse_empty_report() {
        let features = FeatureSet::parse("");
        assert!(features.is_empty());
    }

    #[test]
    fn test_missing_key_is_none_not_error() {
        let features = FeatureSet::parse(SOX_STAT_REPORT);
        assert_eq!(features.get("spectral tilt"), None);
    }

    #[test]
    fn test_insert_normalizes_key() {
        let mut features = FeatureSet::new();
        features.insert("RMS   Amplitude", 0.05);
        assert_eq!(features.get("rms amplitude"), Some(0.05));
    }

    #[tokio::test]
    async fn test_extract_parses_stderr_report() {
        let sample = AudioSample::create().unwrap();
        write_wav(sample.path());

        let runner = Arc::new(MockCommandRunner::new().with_success("", SOX_STAT_REPORT));
        let extractor = FeatureExtractor::new(runner.clone(), "sox");

        let features = extractor.extract(sample.path()).await.unwrap();
        assert_eq!(features.get("rough frequency"), Some(164.0));

        let calls = runner.calls();
        assert_eq!(calls[0].0, "sox");
        assert_eq!(
            calls[0].1,
            vec![sample.path().display().to_string(), "-n".into(), "stat".into()]
        );
    }

    #[tokio::test]
    async fn test_extract_requires_nonempty_sample() {
        let sample = AudioSample::create().unwrap();
        // File left empty — the recorder never produced audio
        let runner = Arc::new(MockCommandRunner::new());
        let extractor = FeatureExtractor::new(runner.clone(), "sox");

        let result = extractor.extract(sample.path()).await;
        assert!(matches!(result, Err(VouchError::SampleUnreadable { .. })));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_maps_tool_not_found() {
        let sample = AudioSample::create().unwrap();
        write_wav(sample.path());

        let runner = Arc::new(MockCommandRunner::new().with_error(RunError::NotFound {
            command: "sox".to_string(),
        }));
        let extractor = FeatureExtractor::new(runner, "sox");

        let result = extractor.extract(sample.path()).await;
        assert!(matches!(
            result,
            Err(VouchError::StatsToolNotFound { tool }) if tool == "sox"
        ));
    }

    #[tokio::test]
    async fn test_extract_maps_timeout() {
        let sample = AudioSample::create().unwrap();
        write_wav(sample.path());

        let runner = Arc::new(MockCommandRunner::new().with_error(RunError::TimedOut {
            command: "sox".to_string(),
            seconds: 10,
        }));
        let extractor = FeatureExtractor::new(runner, "sox");

        let result = extractor.extract(sample.path()).await;
        assert!(matches!(result, Err(VouchError::StatsTimeout)));
    }

    #[tokio::test]
    async fn test_extract_ignores_exit_status() {
        let sample = AudioSample::create().unwrap();
        write_wav(sample.path());

        // sox exiting non-zero with a usable report still yields features
        let runner = Arc::new(MockCommandRunner::new().with_exit(2, SOX_STAT_REPORT));
        let extractor = FeatureExtractor::new(runner, "sox");

        let features = extractor.extract(sample.path()).await.unwrap();
        assert_eq!(features.get("mean norm"), Some(0.013987));
    }
}
