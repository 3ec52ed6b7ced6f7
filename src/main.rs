//! SQL gate command-line entry point.
//!
//! Reads candidate SQL from stdin and writes the verdict as JSON to stdout.
//! With `--completion`, stdin is a model completion `{"sql", "reason"}`
//! instead, and the accepted payload is echoed back.
//!
//! Exit status: 0 when accepted, 1 when rejected, 2 on usage or I/O errors.

use anyhow::{bail, Context, Result};
use serde_json::json;
use sql_gate::completion::{review_completion, CompletionError};
use sql_gate::{Config, QueryGate};
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging to stderr (stdout carries the verdict)
    init_logging();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let completion_mode = match std::env::args().nth(1).as_deref() {
        None => false,
        Some("--completion") => true,
        Some(other) => bail!("unknown argument '{other}' (expected --completion or none)"),
    };

    let config = Config::from_env().context("failed to load configuration")?;
    let gate = QueryGate::new(config.build_policy()?);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let (output, accepted) = if completion_mode {
        match review_completion(&gate, &input) {
            Ok(compiled) => (serde_json::to_value(&compiled)?, true),
            Err(CompletionError::Rejected(rejection)) => (
                json!({
                    "error": "Rejected SQL",
                    "reason": rejection.kind(),
                    "detail": rejection.detail(),
                    "message": rejection.to_string(),
                }),
                false,
            ),
            Err(e) => (json!({ "error": e.to_string() }), false),
        }
    } else {
        let verdict = gate.validate(&input);
        let accepted = verdict.is_accepted();
        (serde_json::to_value(&verdict)?, accepted)
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(accepted)
}

/// Initialize tracing subscriber with stderr output.
fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn,sql_gate=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
