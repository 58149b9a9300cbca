// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use weather_fanout_core::{FetchError, FetchResult, WeatherFetcher, WeatherReport, WorkItem};

/// Deterministic in-memory fetcher
/// Every city reports {temp: 300.0, timezone: 19800, name: <city>, cod: 200}
pub struct StubFetcher {
    latency: Duration,
    jitter_ms: u64,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            jitter_ms: 0,
            failing: HashSet::new(),
            panicking: HashSet::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Adds a random 0..jitter_ms delay on top of the fixed latency
    pub fn with_jitter_ms(mut self, jitter_ms: u64) -> Self {
        self.jitter_ms = jitter_ms;
        self
    }

    pub fn failing_on(mut self, city: &str) -> Self {
        self.failing.insert(city.to_string());
        self
    }

    pub fn panicking_on(mut self, city: &str) -> Self {
        self.panicking.insert(city.to_string());
        self
    }

    /// Cities fetched so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Fetch futures currently alive, including ones parked in a sleep
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Counts a fetch as in flight until its future completes or is dropped
struct InFlight<'a> {
    current: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(current: &'a AtomicUsize, max: &AtomicUsize) -> Self {
        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
        max.fetch_max(now, Ordering::SeqCst);
        Self { current }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl WeatherFetcher for StubFetcher {
    async fn fetch(&self, item: &WorkItem) -> FetchResult {
        self.calls.lock().unwrap().push(item.as_str().to_string());
        let _in_flight = InFlight::enter(&self.in_flight, &self.max_in_flight);

        let mut delay = self.latency;
        if self.jitter_ms > 0 {
            delay += Duration::from_millis(fastrand::u64(0..self.jitter_ms));
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.panicking.contains(item.as_str()) {
            panic!("stub fetcher panicked on {}", item);
        }
        if self.failing.contains(item.as_str()) {
            return Err(FetchError::Transport(format!("{} unreachable", item)));
        }
        Ok(WeatherReport::new(item.as_str(), 300.0, 19800, 200))
    }
}

pub fn items(cities: &[&str]) -> Vec<WorkItem> {
    cities.iter().map(|c| WorkItem::from(*c)).collect()
}

pub fn numbered_items(n: usize) -> Vec<WorkItem> {
    (0..n).map(|i| WorkItem::new(format!("city-{}", i))).collect()
}
