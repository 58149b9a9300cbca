// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::app_config::{AppConfig, RunMode};
use clap::Parser;
use std::path::PathBuf;

/// Fetch current weather for a set of cities and time the run
#[derive(Parser, Debug)]
#[command(name = "weather-fanout", version)]
pub struct Cli {
    /// JSON configuration file; defaults apply when it is missing
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,

    /// Limit on fetches in flight at once
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Report failed cities and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Cities to fetch, replacing the configured list
    pub cities: Vec<String>,
}

impl Cli {
    /// Flags given on the command line win over the file
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.max_concurrency.is_some() {
            config.max_concurrency = self.max_concurrency;
        }
        if self.keep_going {
            config.keep_going = true;
        }
        if !self.cities.is_empty() {
            config.cities = self.cities.clone();
        }
    }
}
