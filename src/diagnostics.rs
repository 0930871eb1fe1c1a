//! System diagnostics and dependency checking.
//!
//! Verifies that required external tools and credentials are available
//! before a pipeline run.

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
    match Command::new(command).arg("-version").output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but -version failed", command)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Check whether the backend API key is present in the environment.
fn check_api_key() -> CheckResult {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => CheckResult::Ok,
        _ => CheckResult::NotFound,
    }
}

/// Run all dependency checks and print results.
///
/// Returns true when every required dependency is available.
pub fn check_dependencies() -> bool {
    println!("Checking dependencies...\n");
    let mut all_ok = true;

    for tool in ["ffmpeg", "ffprobe"] {
        print!("{tool}: ");
        match check_command(tool) {
            CheckResult::Ok => println!("✓ OK"),
            CheckResult::NotFound => {
                println!("✗ NOT FOUND");
                println!("  Install: sudo apt install ffmpeg  (Debian/Ubuntu)");
                println!("           brew install ffmpeg      (macOS)");
                all_ok = false;
            }
            CheckResult::Warning(msg) => {
                println!("⚠ WARNING: {}", msg);
                all_ok = false;
            }
        }
    }

    print!("OPENAI_API_KEY: ");
    match check_api_key() {
        CheckResult::Ok => println!("✓ set"),
        _ => {
            println!("✗ NOT SET");
            println!("  export OPENAI_API_KEY=sk-...");
            all_ok = false;
        }
    }

    println!();
    if all_ok {
        println!("All dependencies available.");
    } else {
        println!("Some dependencies are missing, the pipeline will not run.");
    }
    all_ok
}
