// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod work_item;
pub use work_item::WorkItem;

mod weather_report;
pub use weather_report::{MainReadings, WeatherReport};

mod fetch_error;
pub use fetch_error::{FetchError, FetchResult};

mod result_message;
pub use result_message::{Outcome, ResultMessage};

mod weather_fetcher;
pub use weather_fetcher::WeatherFetcher;

pub mod completion_counter;
pub use completion_counter::{CompletionCounter, CompletionSummary, CompletionToken};

pub mod result_channel;
pub use result_channel::{result_channel, ChannelState, ResultProducer, ResultReceiver, ResultSender};

mod run_config;
pub use run_config::{FailurePolicy, RunConfig};

mod run_report;
pub use run_report::{RunError, RunReport};

mod runner;
pub use runner::Runner;

mod sequential_runner;
pub use sequential_runner::SequentialRunner;

mod concurrent_runner;
pub use concurrent_runner::ConcurrentRunner;
