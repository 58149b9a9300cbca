// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    FailurePolicy, FetchError, Outcome, ResultMessage, RunConfig, RunError, RunReport, Runner,
    WeatherFetcher, WorkItem,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Fetches items one at a time in input order
pub struct SequentialRunner<F: WeatherFetcher> {
    fetcher: Arc<F>,
    config: RunConfig,
    cancellation_token: CancellationToken,
}

impl<F: WeatherFetcher> SequentialRunner<F> {
    pub fn new(fetcher: Arc<F>, config: RunConfig) -> Self {
        Self {
            fetcher,
            config,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Returns a clone of the cancellation token for external control
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }
}

#[async_trait]
impl<F: WeatherFetcher> Runner for SequentialRunner<F> {
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn run_with(
        &self,
        items: Vec<WorkItem>,
        on_result: &mut (dyn for<'m> FnMut(&'m ResultMessage) + Send),
    ) -> Result<RunReport, RunError> {
        let start_time = Instant::now();
        info!(items = items.len(), "sequential run started");

        let mut messages = Vec::with_capacity(items.len());
        for item in items {
            let result = tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => Err(FetchError::Cancelled),
                result = self.fetcher.fetch(&item) => result,
            };
            let message = ResultMessage::new(item, result);

            if let Outcome::Failure(e) = &message.outcome {
                warn!(item = %message.item, error = %e, "fetch failed");
                if self.config.policy == FailurePolicy::FailFast {
                    return Err(RunError::Aborted {
                        item: message.item,
                        source: e.clone(),
                        partial: messages,
                    });
                }
            }

            on_result(&message);
            messages.push(message);
        }

        let elapsed = start_time.elapsed();
        info!(results = messages.len(), ?elapsed, "sequential run finished");
        Ok(RunReport { messages, elapsed })
    }
}
