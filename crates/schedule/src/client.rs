// crates/schedule/src/client.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use prigorod_core::{PrigorodError, PrigorodResult};
use reqwest::Client;
use tracing::debug;

use crate::{ScheduleClient, ScheduleConfig, SearchReply};

/// HTTP client for the Yandex.Rasp timetable API.
pub struct RaspClient {
    config: ScheduleConfig,
    client: Client,
    api_key: String,
}

impl RaspClient {
    pub fn new(config: ScheduleConfig) -> PrigorodResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            PrigorodError::Config(format!("API key not found: {}", config.api_key_env))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()
            .map_err(|e| PrigorodError::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            api_key,
        })
    }

    /// For tests against a local stub server; skips the env lookup.
    pub fn with_api_key(config: ScheduleConfig, api_key: impl Into<String>) -> PrigorodResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()
            .map_err(|e| PrigorodError::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ScheduleClient for RaspClient {
    async fn search(&self, from: &str, to: &str, date: NaiveDate) -> PrigorodResult<SearchReply> {
        let url = format!("{}/search/", self.config.base_url);
        let date = date.format("%Y-%m-%d").to_string();

        debug!(%from, %to, %date, "querying timetable API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("from", from),
                ("to", to),
                ("transport_types", self.config.transport_type.as_str()),
                ("lang", self.config.lang.as_str()),
                ("date", date.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PrigorodError::Network(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PrigorodError::Schedule(format!("API error {status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| PrigorodError::Schedule(format!("failed to parse response: {e}")))
    }

    fn name(&self) -> &str {
        "Yandex.Rasp"
    }
}
