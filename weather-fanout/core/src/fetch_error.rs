// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::WeatherReport;
use thiserror::Error;

/// Outcome of a single call to a [`WeatherFetcher`](crate::WeatherFetcher)
pub type FetchResult = Result<WeatherReport, FetchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The remote service could not be reached or the body could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// The body did not parse into a weather record
    #[error("decode error: {0}")]
    Decode(String),

    /// The run was cancelled before the fetch finished
    #[error("cancelled")]
    Cancelled,
}
