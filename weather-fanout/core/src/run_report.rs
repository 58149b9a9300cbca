// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FetchError, ResultMessage, WorkItem};
use std::time::Duration;
use thiserror::Error;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// In emission order
    pub messages: Vec<ResultMessage>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.messages.iter().filter(|m| m.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.messages.len() - self.succeeded()
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    /// Fail-fast stop; `partial` holds the messages reported before it
    #[error("run aborted on '{item}': {source}")]
    Aborted {
        item: WorkItem,
        source: FetchError,
        partial: Vec<ResultMessage>,
    },

    #[error("worker task panicked: {0}")]
    TaskPanicked(String),
}
