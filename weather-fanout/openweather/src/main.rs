// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod app_config;
mod cli;
mod open_weather_fetcher;

use crate::app_config::{AppConfig, RunMode};
use crate::cli::Cli;
use crate::open_weather_fetcher::OpenWeatherFetcher;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use weather_fanout_core::{
    ConcurrentRunner, ResultMessage, RunError, Runner, SequentialRunner, WorkItem,
};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)?;
    cli.apply(&mut config);

    let api_key = app_config::api_key_from_env()?;
    let fetcher = Arc::new(OpenWeatherFetcher::new(config.base_url.clone(), api_key)?);
    let run_config = config.run_config();

    let sequential = SequentialRunner::new(fetcher.clone(), run_config.clone());
    let concurrent = ConcurrentRunner::new(fetcher, run_config);

    // Setup Ctrl+C handler
    let tokens = [
        sequential.cancellation_token(),
        concurrent.cancellation_token(),
    ];
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl+C received, cancelling outstanding fetches");
            for token in &tokens {
                token.cancel();
            }
        }
    });

    let runners: Vec<&dyn Runner> = match config.mode {
        RunMode::Sequential => vec![&sequential as &dyn Runner],
        RunMode::Concurrent => vec![&concurrent as &dyn Runner],
        RunMode::Both => vec![&sequential as &dyn Runner, &concurrent as &dyn Runner],
    };
    let with_headers = runners.len() > 1;

    for runner in runners {
        if with_headers {
            println!("=== {} ===", runner.name());
        }
        let outcome = run_and_report(runner, config.work_items()).await;
        if outcome.is_err() {
            return Ok(exit_code(&outcome));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// An aborted run is already logged; it only needs a failing status
fn exit_code(outcome: &Result<(), RunError>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Print each result as it arrives, then the elapsed time
/// An aborted run prints no summary line
async fn run_and_report(runner: &dyn Runner, items: Vec<WorkItem>) -> Result<(), RunError> {
    let start_time = Instant::now();
    let result = runner
        .run_with(items, &mut |message: &ResultMessage| println!("{}", message))
        .await;

    match result {
        Ok(report) => {
            if report.failed() > 0 {
                warn!(
                    runner = runner.name(),
                    failed = report.failed(),
                    "run finished with failures"
                );
            }
            info!(runner = runner.name(), succeeded = report.succeeded(), "run complete");
            println!("Time taken:- {:?}", start_time.elapsed());
            Ok(())
        }
        Err(e) => {
            error!(runner = runner.name(), error = %e, "run aborted");
            Err(e)
        }
    }
}
