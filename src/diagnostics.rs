//! System diagnostics and dependency checking.
//!
//! Verifies that required external tools are installed before the gate
//! stumbles over them mid-recording.

use crate::config::Config;
use crate::stt::helper::default_helper_source;
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool is installed and working
    Ok,
    /// Tool is not found
    NotFound,
    /// Tool is found but has issues
    Warning(String),
}

/// Check if a command exists and is executable.
fn check_command(command: &str) -> CheckResult {
    match Command::new(command).arg("--version").output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        // Some tools print version info but exit non-zero; presence is enough
        Ok(_) => CheckResult::Warning(format!("'{}' found but --version failed", command)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

fn report_tool(label: &str, command: &str, install_hint: &str) {
    print!("{} ({}): ", label, command);
    match check_command(command) {
        CheckResult::Ok => println!("✓ OK"),
        CheckResult::NotFound => {
            println!("✗ NOT FOUND");
            println!("  Install: {}", install_hint);
        }
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }
}

/// Run all dependency checks and print results.
pub fn check_dependencies(config: &Config) {
    println!("Checking system dependencies...\n");

    report_tool(
        "audio capture",
        &config.audio.capture_tool,
        "sudo apt install sox  (Debian/Ubuntu)  /  brew install sox  (macOS)",
    );
    report_tool(
        "audio statistics",
        &config.audio.stats_tool,
        "sudo apt install sox  (Debian/Ubuntu)  /  brew install sox  (macOS)",
    );
    report_tool(
        "helper compiler",
        &config.transcriber.compiler,
        "xcode-select --install  (macOS)  /  your platform's Swift toolchain",
    );

    let source = config
        .transcriber
        .source
        .clone()
        .unwrap_or_else(default_helper_source);
    print!("transcription helper source: ");
    if source.exists() {
        println!("✓ OK ({})", source.display());
    } else {
        println!("✗ NOT FOUND ({})", source.display());
        println!(
            "  Copy helper/transcribe.swift next to the vouch binary, \
             or set [transcriber] source in the config."
        );
    }
}
