// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ResultMessage, RunError, RunReport, WorkItem};
use async_trait::async_trait;

/// An execution strategy over a set of work items
#[async_trait]
pub trait Runner: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run every item, calling `on_result` for each message as it is produced
    async fn run_with(
        &self,
        items: Vec<WorkItem>,
        on_result: &mut (dyn for<'m> FnMut(&'m ResultMessage) + Send),
    ) -> Result<RunReport, RunError>;

    async fn run(&self, items: Vec<WorkItem>) -> Result<RunReport, RunError> {
        self.run_with(items, &mut |_: &ResultMessage| {}).await
    }
}
