// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tokio::sync::mpsc;
use tracing::debug;

/// Counts completion signals from a fixed number of dispatched tasks
///
/// Tokens are only handed out by [`CompletionCounter::new`], one per task, and a
/// token signals exactly once: through [`CompletionToken::complete`] or, on any
/// other exit path, when it is dropped. The counter therefore reaches its target
/// iff every task has finished.
pub struct CompletionCounter {
    target: usize,
    received: usize,
    rx: mpsc::UnboundedReceiver<Result<usize, usize>>,
}

/// Held by one task, signals its completion
#[derive(Debug)]
pub struct CompletionToken {
    task_id: usize,
    tx: Option<mpsc::UnboundedSender<Result<usize, usize>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSummary {
    pub succeeded: usize,
    /// Ids of tasks that signalled failure, in signal order
    pub failed: Vec<usize>,
}

impl CompletionSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

impl CompletionCounter {
    /// Setup completion tracking for `target` tasks
    /// Returns the counter and one token per task id in `0..target`
    pub fn new(target: usize) -> (Self, Vec<CompletionToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let tokens = (0..target)
            .map(|task_id| CompletionToken {
                task_id,
                tx: Some(tx.clone()),
            })
            .collect();

        let counter = Self {
            target,
            received: 0,
            rx,
        };
        (counter, tokens)
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn remaining(&self) -> usize {
        self.target - self.received
    }

    /// Wait for the next task to complete or fail
    /// Returns Ok(task_id) on success, Err(task_id) on failure
    /// Returns None once all tasks have signalled
    pub async fn wait_next(&mut self) -> Option<Result<usize, usize>> {
        if self.received == self.target {
            return None;
        }

        // Every token signals before its sender goes away, so the
        // channel cannot run dry while signals are outstanding
        let signal = self.rx.recv().await?;
        self.received += 1;
        debug!(
            task = signal.unwrap_or_else(|id| id),
            remaining = self.remaining(),
            "completion signal received"
        );
        Some(signal)
    }

    /// Block until every task has signalled
    pub async fn wait_all(mut self) -> CompletionSummary {
        let mut summary = CompletionSummary::default();
        while let Some(signal) = self.wait_next().await {
            match signal {
                Ok(_) => summary.succeeded += 1,
                Err(task_id) => summary.failed.push(task_id),
            }
        }
        summary
    }
}

impl CompletionToken {
    pub fn task_id(&self) -> usize {
        self.task_id
    }

    /// Signal completion; consumes the token so it cannot signal twice
    pub fn complete(mut self, success: bool) {
        self.signal(success);
    }

    fn signal(&mut self, success: bool) {
        if let Some(tx) = self.tx.take() {
            let signal = if success {
                Ok(self.task_id)
            } else {
                Err(self.task_id)
            };
            // Counter already gone means nobody is waiting
            let _ = tx.send(signal);
        }
    }
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        self.signal(false);
    }
}
