// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FetchResult, WorkItem};
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches the weather record for a single work item
/// May suspend for an unbounded time; runners add no timeout
#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch(&self, item: &WorkItem) -> FetchResult;
}

#[async_trait]
impl<F: WeatherFetcher + ?Sized> WeatherFetcher for Arc<F> {
    async fn fetch(&self, item: &WorkItem) -> FetchResult {
        (**self).fetch(item).await
    }
}
