// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FetchError, FetchResult, WeatherReport, WorkItem};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(WeatherReport),
    Failure(FetchError),
}

impl From<FetchResult> for Outcome {
    fn from(result: FetchResult) -> Self {
        match result {
            Ok(report) => Outcome::Success(report),
            Err(e) => Outcome::Failure(e),
        }
    }
}

/// The reported outcome for one work item
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMessage {
    pub item: WorkItem,
    pub outcome: Outcome,
}

impl ResultMessage {
    pub fn new(item: WorkItem, result: FetchResult) -> Self {
        Self {
            item,
            outcome: result.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.outcome {
            Outcome::Success(report) => Some(report),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }
}

impl fmt::Display for ResultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Success(report) => write!(
                f,
                "weather data for {}: temp={:.2}K timezone={} name={} cod={}",
                self.item, report.main.temp, report.timezone, report.name, report.cod
            ),
            Outcome::Failure(e) => write!(f, "weather data for {}: FAILED ({})", self.item, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_success_line() {
        let msg = ResultMessage::new(
            WorkItem::from("mumbai"),
            Ok(WeatherReport::new("Mumbai", 300.0, 19800, 200)),
        );
        assert_eq!(
            msg.to_string(),
            "weather data for mumbai: temp=300.00K timezone=19800 name=Mumbai cod=200"
        );
        assert!(msg.is_success());
        assert_eq!(msg.report().map(|r| r.cod), Some(200));
    }

    #[test]
    fn formats_failure_line() {
        let msg = ResultMessage::new(
            WorkItem::from("delhi"),
            Err(FetchError::Transport("connection refused".to_string())),
        );
        assert_eq!(
            msg.to_string(),
            "weather data for delhi: FAILED (transport error: connection refused)"
        );
        assert!(!msg.is_success());
        assert!(msg.report().is_none());
    }
}
