// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;
use weather_fanout_core::{FailurePolicy, RunConfig, WorkItem};

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_CITIES: [&str; 6] = [
    "mumbai",
    "delhi",
    "hyderabad",
    "chennai",
    "ahmedabad",
    "jaipur",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Sequential,
    #[default]
    Concurrent,
    /// Sequential first, then concurrent, for comparison
    Both,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("environment variable {0} is not set")]
    MissingApiKey(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cities: Vec<String>,
    pub base_url: String,
    pub mode: RunMode,
    pub max_concurrency: Option<usize>,
    /// Report failures and carry on instead of aborting the run
    pub keep_going: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: RunMode::default(),
            max_concurrency: None,
            keep_going: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`AppConfig::load`], but a missing file means defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                eprintln!("{} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn work_items(&self) -> Vec<WorkItem> {
        self.cities.iter().map(|c| WorkItem::new(c.as_str())).collect()
    }

    pub fn run_config(&self) -> RunConfig {
        let policy = if self.keep_going {
            FailurePolicy::CollectAll
        } else {
            FailurePolicy::FailFast
        };
        RunConfig::default()
            .with_policy(policy)
            .with_max_concurrency(self.max_concurrency)
    }
}

/// Credential for the weather service, never stored in config files
pub fn api_key_from_env() -> Result<String, ConfigError> {
    match env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey(API_KEY_VAR)),
    }
}
