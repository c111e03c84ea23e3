use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use vouch::audio::sample::wav_duration_secs;
use vouch::audio::stats::FeatureExtractor;
use vouch::cli::{Cli, Commands};
use vouch::config::Config;
use vouch::diagnostics::check_dependencies;
use vouch::exec::SystemCommandRunner;
use vouch::pipeline::VoiceGate;
use vouch::request::{self, ApproveResponse, BlockResponse, VoiceMode};
use vouch::verdict::Outcome;
use vouch::{haiku, score};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => run_gate(&cli).await?,
        Some(Commands::Score { file }) => run_score(&cli, file).await?,
        Some(Commands::Haiku { text }) => run_haiku(&text.join(" ")),
        Some(Commands::Check) => {
            let config = load_config(&cli)?;
            check_dependencies(&config);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "vouch", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&path)?.with_env_overrides();
    if let Some(secs) = cli.duration {
        config.audio.voice_secs = secs;
        config.audio.haiku_secs = secs;
    }
    Ok(config)
}

/// Hook mode: read one request from stdin, gate it, answer on stdout.
///
/// The exit code is always zero whether the prompt is approved or rejected —
/// the decision is communicated entirely through the payload.
async fn run_gate(cli: &Cli) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let prompt = request::extract_prompt(&raw);

    // No voice trigger: approve immediately for text-mode processing
    let Some(mode) = VoiceMode::detect(&prompt) else {
        return Ok(());
    };

    let config = load_config(cli)?;
    let gate = VoiceGate::new(config).quiet(cli.quiet);

    let payload = match gate.run(mode).await {
        Ok(Outcome::Approved {
            transcript: Some(text),
        }) => Some(serde_json::to_string(&ApproveResponse::with_transcription(
            &text,
        ))?),
        Ok(Outcome::Approved { transcript: None }) => None,
        Ok(Outcome::Rejected(rejection)) => {
            Some(serde_json::to_string(&BlockResponse::new(rejection.reason))?)
        }
        Err(fault) => Some(serde_json::to_string(&BlockResponse::new(
            fault.block_reason(),
        ))?),
    };

    if let Some(json) = payload {
        println!("{}", json);
    }
    Ok(())
}

/// Offline scoring of an existing clip.
async fn run_score(cli: &Cli, file: &Path) -> Result<()> {
    let config = load_config(cli)?;
    let runner = Arc::new(SystemCommandRunner::new());
    let extractor = FeatureExtractor::new(runner, config.audio.stats_tool.clone());

    let features = extractor.extract(file).await?;
    let report = score::analyze(&features);
    let duration = wav_duration_secs(file)?;

    println!("Clip: {} ({:.1}s)", file.display(), duration);
    println!();
    println!("  Pitch Confidence:    {:>5.1} / 25", report.pitch_confidence);
    println!(
        "  Dynamic Commitment:  {:>5.1} / 25",
        report.dynamic_commitment
    );
    println!("  Tonal Stability:     {:>5.1} / 25", report.tonal_stability);
    println!(
        "  Conviction Quotient: {:>5.1} / 25",
        report.conviction_quotient
    );
    println!();

    let total = report.total();
    if total < config.gate.score_floor {
        println!(
            "  Composite: {}/100 — {} (excessive desperation)",
            total,
            "REJECTED".red()
        );
    } else if total > config.gate.score_ceiling {
        println!(
            "  Composite: {}/100 — {} (suspicious composure)",
            total,
            "REJECTED".red()
        );
    } else {
        println!("  Composite: {}/100 — {}", total, "ACCEPTED".green());
    }
    Ok(())
}

/// Offline 5-7-5 validation with the per-word breakdown.
fn run_haiku(text: &str) {
    let check = haiku::check(text);
    for (word, count) in &check.breakdown {
        println!("  {:<20} {}", word, count);
    }
    println!();
    if check.valid {
        println!(
            "{} — 5-7-5 structure holds ({} syllables)",
            "VALID".green(),
            check.total
        );
    } else {
        println!(
            "{} — expected 5-7-5 (17 syllables), got {}",
            "INVALID".red(),
            check.total
        );
    }
}
