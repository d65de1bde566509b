//! HTTP API Client
//!
//! Browser-side [`ChartSource`] for the statistics endpoint.

use async_trait::async_trait;
use gloo_net::http::Request;

use gradeview::chart::{ChartDataset, ChartError, ChartResult, ChartSource};

/// Statistics endpoint, relative to the page origin
pub const CHART_DATA_ENDPOINT: &str = "/api/chart-data";

/// Fetches the chart dataset with the page's default `fetch` semantics
pub struct FetchChartSource {
    url: String,
}

impl FetchChartSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for FetchChartSource {
    fn default() -> Self {
        Self::new(CHART_DATA_ENDPOINT)
    }
}

#[async_trait(?Send)]
impl ChartSource for FetchChartSource {
    async fn fetch(&self) -> ChartResult<ChartDataset> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| ChartError::Network(e.to_string()))?;

        if !response.ok() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChartError::Status {
                status: response.status(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChartError::Parse(e.to_string()))?;

        ChartDataset::from_json(&body)
    }
}
