// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use weather_fanout_core::{FetchError, FetchResult, WeatherFetcher, WeatherReport, WorkItem};

/// Fetches current weather from an OpenWeatherMap-compatible endpoint
pub struct OpenWeatherFetcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherFetcher {
    pub fn new(base_url: String, api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

// The request URL carries the credential; keep it out of error text
fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Transport(e.without_url().to_string())
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, item: &WorkItem) -> FetchResult {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", item.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        // Status is not inspected; error bodies fail to decode instead
        let body = response.bytes().await.map_err(transport)?;
        WeatherReport::from_slice(&body)
    }
}
