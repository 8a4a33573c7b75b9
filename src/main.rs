//! floop CLI
//!
//! Usage: floop [-c FILE] [--json] <COMMAND>
//!
//! Every lifecycle command resolves the config, runs on all cores in
//! parallel and exits non-zero if any core failed.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use floop::config;
use floop::dispatch;
use floop::presentation::{create_renderer, error_json, Cli, LifecycleArgs, OutputFormat};
use floop::{Operation, OperationOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();
    floop::logging::init(cli.log_level);

    match execute(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                println!("{}", error_json(&e));
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<ExitCode> {
    match cli.command.lifecycle() {
        Some((name, args)) => cmd_lifecycle(cli, name, args),
        None => cmd_init(cli),
    }
}

fn cmd_lifecycle(cli: &Cli, name: &str, args: &LifecycleArgs) -> Result<ExitCode> {
    let operation = Operation::from_name(name)?;
    let targets = config::resolve(&cli.config_file)
        .with_context(|| format!("Failed to load {}", cli.config_file.display()))?;
    tracing::info!(operation = name, cores = targets.len(), "dispatching");

    let options = OperationOptions {
        echo: cli.echo_stream(),
        ..args.options()
    };
    let report = dispatch(operation.function(), &targets, &options)?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    print!("{}", create_renderer(format, !cli.ascii).render(operation, &report));

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_init(cli: &Cli) -> Result<ExitCode> {
    config::init(&cli.config_file)?;
    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "init",
                "path": cli.config_file.display().to_string(),
            })
        );
    } else {
        println!("Wrote {}", cli.config_file.display());
    }
    Ok(ExitCode::SUCCESS)
}
