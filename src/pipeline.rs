//! The voice acceptance pipeline.
//!
//! One linear pass with early exits:
//! capture → extract features → score → gate → transcribe → (haiku check in
//! haiku mode) → lexical checks → approve. Judgment rejections short-circuit
//! the remaining stages as ordinary outcomes; infrastructure faults abort
//! with an error. Either way the transient recording is released exactly
//! once, by scope.

use crate::audio::capture::Recorder;
use crate::audio::sample::AudioSample;
use crate::audio::stats::FeatureExtractor;
use crate::chance::{Chance, DiceRoll};
use crate::config::Config;
use crate::error::Result;
use crate::exec::{CommandRunner, SystemCommandRunner};
use crate::haiku;
use crate::lexical;
use crate::request::VoiceMode;
use crate::score;
use crate::stt::helper::HelperTranscriber;
use crate::stt::transcriber::Transcriber;
use crate::verdict::{Outcome, Rejection};
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::time::Duration;

/// Runs the full voice gate for one request.
pub struct VoiceGate {
    config: Config,
    runner: Arc<dyn CommandRunner>,
    transcriber: Arc<dyn Transcriber>,
    chance: Arc<dyn Chance>,
    quiet: bool,
}

impl VoiceGate {
    /// Gate with the production runner, helper transcriber and dice.
    pub fn new(config: Config) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner::new());
        let transcriber: Arc<dyn Transcriber> =
            Arc::new(HelperTranscriber::new(runner.clone(), &config.transcriber));
        Self {
            config,
            runner,
            transcriber,
            chance: Arc::new(DiceRoll::new()),
            quiet: false,
        }
    }

    /// Replace the command runner (and the helper transcriber built on it).
    ///
    /// Call [`Self::with_transcriber`] after this to override the
    /// transcriber separately.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.transcriber = Arc::new(HelperTranscriber::new(
            runner.clone(),
            &self.config.transcriber,
        ));
        self.runner = runner;
        self
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = transcriber;
        self
    }

    pub fn with_chance(mut self, chance: Arc<dyn Chance>) -> Self {
        self.chance = chance;
        self
    }

    /// Suppress status lines on stderr.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn record_window(&self, mode: VoiceMode) -> Duration {
        Duration::from_secs(match mode {
            VoiceMode::Standard => self.config.audio.voice_secs,
            VoiceMode::Haiku => self.config.audio.haiku_secs,
        })
    }

    /// Run the pipeline to its single terminal outcome.
    ///
    /// `Err` is an infrastructure fault; every judgment is an `Ok` outcome.
    pub async fn run(&self, mode: VoiceMode) -> Result<Outcome> {
        // The sample is scoped to this call: dropped (and deleted) on every
        // return path below, including the `?` ones.
        let sample = AudioSample::create()?;

        let window = self.record_window(mode);
        if !self.quiet {
            eprintln!(
                "{}",
                format!(
                    "SPEAK NOW ({} MODE) — you have {} seconds...",
                    mode.label(),
                    window.as_secs()
                )
                .bold()
            );
        }
        let recorder = Recorder::new(self.runner.clone(), self.config.audio.clone());
        recorder.record(&sample, window).await?;

        if !self.quiet {
            eprintln!("{}", "Analyzing vocal sincerity...".dimmed());
        }
        let extractor =
            FeatureExtractor::new(self.runner.clone(), self.config.audio.stats_tool.clone());
        let features = extractor.extract(sample.path()).await?;

        let total = score::analyze(&features).total();
        if total < self.config.gate.score_floor {
            return Ok(Outcome::Rejected(Rejection::desperation(total)));
        }
        if total > self.config.gate.score_ceiling {
            return Ok(Outcome::Rejected(Rejection::composure(total)));
        }
        if !self.quiet {
            eprintln!(
                "{}",
                format!("VOCAL SINCERITY SCORE {}/100 — ACCEPTED.", total).green()
            );
        }

        let text = self.transcriber.transcribe(sample.path()).await?;

        if mode == VoiceMode::Haiku {
            let check = haiku::check(&text);
            if !check.valid {
                return Ok(Outcome::Rejected(Rejection::haiku_structure(&check)));
            }
            if !self.quiet {
                eprintln!("{}", "HAIKU STRUCTURE VALID (5-7-5).".green());
            }
        }

        if let Some(rejection) = lexical::check(&text, self.chance.as_ref()) {
            return Ok(Outcome::Rejected(rejection));
        }

        Ok(Outcome::Approved {
            transcript: Some(text),
        })
    }
}
