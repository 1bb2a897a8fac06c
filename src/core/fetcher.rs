use crate::config::GatewayConfig;
use crate::core::{ApiCatalog, ApiCollection};
use crate::utils::error::{Result, StepError};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::fmt::Display;

const APIS_PATH: &str = "/rest/apigateway/apis";

/// Client for the API Gateway administration REST API.
pub struct GatewayClient {
    config: GatewayConfig,
    client: Client,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn apis_endpoint(&self) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), APIS_PATH)
    }
}

// 細節只寫進日誌，呼叫端只看到 GatewayQuery
fn query_failed(detail: impl Display) -> StepError {
    tracing::error!("❌ API Gateway query failed: {}", detail);
    StepError::GatewayQuery
}

#[async_trait::async_trait]
impl ApiCatalog for GatewayClient {
    async fn fetch_all(&self) -> Result<ApiCollection> {
        let endpoint = self.apis_endpoint();
        tracing::debug!("Making API request to: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .header(ACCEPT, "application/json")
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(query_failed)?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(query_failed(format!("{} returned {}", endpoint, status)));
        }

        let collection: ApiCollection = response.json().await.map_err(query_failed)?;
        tracing::info!("📋 API Gateway returned {} APIs", collection.len());

        Ok(collection)
    }
}
