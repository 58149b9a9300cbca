// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    result_channel, CompletionCounter, CompletionSummary, CompletionToken, FailurePolicy,
    FetchError, FetchResult, Outcome, ResultMessage, ResultProducer, ResultSender, RunConfig,
    RunError, RunReport, Runner, WeatherFetcher, WorkItem,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Fans every item out to its own task and fans the results back in
/// through a single channel
///
/// A watcher task closes the channel once all tasks have signalled
/// completion; the caller's flow collects until the channel is drained.
pub struct ConcurrentRunner<F: WeatherFetcher + 'static> {
    fetcher: Arc<F>,
    config: RunConfig,
    cancellation_token: CancellationToken,
}

impl<F: WeatherFetcher + 'static> ConcurrentRunner<F> {
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

    fn dispatch(
        &self,
        item: WorkItem,
        producer: ResultProducer,
        token: CompletionToken,
        cancel: CancellationToken,
        limiter: Option<Arc<Semaphore>>,
    ) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move {
            let task_id = token.task_id();
            debug!(task = task_id, item = %item, "task dispatched");

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(FetchError::Cancelled),
                result = fetch_admitted(fetcher.as_ref(), &item, limiter.as_deref()) => result,
            };
            let success = result.is_ok();

            if producer.send(ResultMessage::new(item, result)).await.is_err() {
                debug!(task = task_id, "collector gone, result dropped");
            }
            token.complete(success);
            debug!(task = task_id, success, "task completed");
        })
    }
}

/// Fetch once admitted by the limiter, if any
async fn fetch_admitted<F: WeatherFetcher + ?Sized>(
    fetcher: &F,
    item: &WorkItem,
    limiter: Option<&Semaphore>,
) -> FetchResult {
    let _permit = match limiter {
        Some(semaphore) => match semaphore.acquire().await {
            Ok(permit) => Some(permit),
            Err(_) => return Err(FetchError::Cancelled),
        },
        None => None,
    };
    fetcher.fetch(item).await
}

/// Wait for every completion signal, then close the result channel
async fn watch(counter: CompletionCounter, sender: ResultSender) -> CompletionSummary {
    let tasks = counter.target();
    let summary = counter.wait_all().await;
    debug!(tasks, failed = summary.failed.len(), "all tasks signalled, closing channel");
    sender.close();
    summary
}

#[async_trait]
impl<F: WeatherFetcher + 'static> Runner for ConcurrentRunner<F> {
    fn name(&self) -> &'static str {
        "concurrent"
    }

    async fn run_with(
        &self,
        items: Vec<WorkItem>,
        on_result: &mut (dyn for<'m> FnMut(&'m ResultMessage) + Send),
    ) -> Result<RunReport, RunError> {
        let start_time = Instant::now();
        let target = items.len();
        info!(
            items = target,
            max_concurrency = ?self.config.max_concurrency,
            "concurrent run started"
        );

        let (sender, mut receiver) = result_channel(target);
        let (counter, tokens) = CompletionCounter::new(target);
        let producers: Vec<ResultProducer> = (0..target).map(|_| sender.producer()).collect();

        // Scoped to this run so a fail-fast stop leaves the runner reusable
        let cancel = self.cancellation_token.child_token();
        // Dropping this future mid-run cancels every task it spawned
        let _cancel_on_drop = cancel.clone().drop_guard();
        let limiter = self
            .config
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        let watcher = tokio::spawn(watch(counter, sender));

        let handles: Vec<JoinHandle<()>> = items
            .into_iter()
            .zip(producers)
            .zip(tokens)
            .map(|((item, producer), token)| {
                self.dispatch(item, producer, token, cancel.clone(), limiter.clone())
            })
            .collect();

        let mut messages = Vec::with_capacity(target);
        let mut abort: Option<(WorkItem, FetchError)> = None;
        while let Some(message) = receiver.recv().await {
            if abort.is_some() {
                debug!(item = %message.item, "discarding result after abort");
                continue;
            }

            if let Outcome::Failure(e) = &message.outcome {
                warn!(item = %message.item, error = %e, "fetch failed");
                if self.config.policy == FailurePolicy::FailFast {
                    error!(item = %message.item, "aborting run, cancelling remaining tasks");
                    cancel.cancel();
                    abort = Some((message.item.clone(), e.clone()));
                    continue;
                }
            }

            on_result(&message);
            messages.push(message);
        }

        let summary = watcher
            .await
            .map_err(|e| RunError::TaskPanicked(format!("watcher: {}", e)))?;
        let mut panicked = None;
        for handle in handles {
            if let Err(e) = handle.await {
                panicked.get_or_insert_with(|| e.to_string());
            }
        }
        debug!(
            succeeded = summary.succeeded,
            failed = summary.failed.len(),
            "completion summary"
        );

        if let Some((item, source)) = abort {
            return Err(RunError::Aborted {
                item,
                source,
                partial: messages,
            });
        }
        if let Some(reason) = panicked {
            return Err(RunError::TaskPanicked(reason));
        }

        let elapsed = start_time.elapsed();
        info!(results = messages.len(), ?elapsed, "concurrent run finished");
        Ok(RunReport { messages, elapsed })
    }
}
