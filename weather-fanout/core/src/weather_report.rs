// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FetchError;
use serde::{Deserialize, Serialize};

/// Current weather record for one city
/// Fields missing from the payload fall back to their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub main: MainReadings,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cod: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Kelvin
    #[serde(default)]
    pub temp: f64,
}

impl WeatherReport {
    pub fn new(name: impl Into<String>, temp: f64, timezone: i64, cod: i32) -> Self {
        Self {
            main: MainReadings { temp },
            timezone,
            name: name.into(),
            cod,
        }
    }

    /// Decode a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
