//! Native HTTP backend built on `reqwest`. Only compiled with the `api` feature.

use crate::endpoint::{decode_body, ApiConfig, Endpoint};
use crate::error::FetchResult;
use crate::orchestrator::Backend;
use crate::session::RecordKey;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Pedestrian backend reached over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<Value> {
        debug!("GET {} {:?}", endpoint.url, endpoint.query);
        let response = self
            .client
            .get(&endpoint.url)
            .query(&endpoint.query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_body(status, &body)
    }
}

impl Backend for HttpBackend {
    async fn fetch_locations(&self, date: NaiveDate) -> FetchResult<Value> {
        self.get_json(self.config.locations_endpoint(date)).await
    }

    async fn fetch_records(&self, key: &RecordKey) -> FetchResult<Value> {
        self.get_json(self.config.records_endpoint(key)).await
    }
}
