//! deployto CLI
//!
//! Usage: deployto <TARGET> [PATHS]...

mod cli;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use deployto::config::{self, ConfigWarning, Verbosity};
use deployto::domain::ports::ScanEventSink;
use deployto::infrastructure::{write_script, ConsoleEventSink, JsonEventSink};
use deployto::{generate, parse_since, DeployConfig, GenerateOptions};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "error",
                        "command": "generate",
                        "message": format!("{:#}", e),
                    })
                );
            } else {
                eprintln!("✗ Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();
    let cwd = std::env::current_dir().context("could not determine working directory")?;

    let config_path = config::locate_config(cli.config.as_deref(), &cwd);
    let (config, warnings) = DeployConfig::load_with_warnings(&config_path)?;
    let config = config::with_env_overrides(config);
    if !cli.json {
        print_config_warnings(&warnings);
    }

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        config.output.verbosity.raised_by(cli.verbose)
    };

    let base = cli
        .base
        .clone()
        .or_else(|| config.base.clone())
        .unwrap_or_else(|| cwd.clone());

    let mut options = GenerateOptions::new(cli.target.clone(), base)
        .with_working_dir(&cwd)
        .with_paths(cli.paths.clone());
    if let Some(since) = &cli.since {
        options = options.with_since(parse_since(since)?);
    }
    if let Some(template) = &cli.template {
        options = options.with_template(template);
    }

    let sink: Box<dyn ScanEventSink> = if cli.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stderr(verbosity))
    };

    let result = generate(&config, &options, sink.as_ref())?;

    if let Some(output) = &cli.output {
        write_script(output, &result.script)
            .with_context(|| format!("could not write {}", output.display()))?;
    }

    if cli.json {
        let mut complete = serde_json::json!({
            "event": "complete",
            "command": "generate",
            "success": true,
            "server": result.server,
            "file_count": result.entries.len(),
            "files": result.entries,
            "duration_ms": started.elapsed().as_millis() as u64,
        });
        match &cli.output {
            Some(output) => complete["output"] = output.display().to_string().into(),
            None => complete["script"] = result.script.into(),
        }
        println!("{}", complete);
        return Ok(());
    }

    match &cli.output {
        Some(output) => {
            if verbosity > Verbosity::Quiet {
                eprintln!(
                    "✓ Wrote {} ({} files for {})",
                    output.display(),
                    result.entries.len(),
                    result.server
                );
            }
        }
        None => print!("{}", result.script),
    }

    if result.entries.is_empty() && verbosity > Verbosity::Quiet {
        eprintln!("⚠ No files changed since {}", options.since.to_rfc3339());
    }

    Ok(())
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, w.file.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
