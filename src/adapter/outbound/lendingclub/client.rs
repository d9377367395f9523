//! LendingClub investor API client.
//!
//! One `POST` per order pack. There are no retries: a failed submission
//! leaves the intent rows unresolved for later reconciliation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::{SubmitOrdersBody, SubmitOrdersResponse};
use super::settings::{MarketplaceConfig, API_KEY_ENV};
use crate::domain::{Acknowledgment, InvestorId};
use crate::error::{Error, SubmissionError};
use crate::port::{MarketplaceClient, OrderRequest};

/// Longest slice of an error body kept in `SubmissionError::Rejected`.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the LendingClub order submission endpoint.
pub struct LendingClubClient {
    http: HttpClient,
    config: MarketplaceConfig,
    api_key: String,
}

impl LendingClubClient {
    /// Create a client from configuration and an explicit API key.
    #[must_use]
    pub fn from_config(config: &MarketplaceConfig, api_key: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            config: config.clone(),
            api_key: api_key.into(),
        }
    }

    /// Create a client taking the API key from `LENDING_API_KEY`.
    ///
    /// # Errors
    /// Returns `SubmissionError::MissingCredentials` if the variable is unset
    /// or blank.
    pub fn from_env(config: &MarketplaceConfig) -> Result<Self, SubmissionError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SubmissionError::MissingCredentials(API_KEY_ENV))?;
        Ok(Self::from_config(config, api_key))
    }

    async fn post_orders(
        &self,
        investor_id: InvestorId,
        orders: &[OrderRequest],
    ) -> Result<Acknowledgment, SubmissionError> {
        let url = self.config.orders_url(investor_id.get());
        let body = SubmitOrdersBody::new(investor_id.get(), orders);

        debug!(url = %url, orders = orders.len(), "Submitting order pack");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.api_key)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(SubmissionError::Transport)?;

        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SubmitOrdersResponse = serde_json::from_str(&text)
            .map_err(|e| SubmissionError::MalformedResponse(e.to_string()))?;
        parsed.into_acknowledgment()
    }
}

#[async_trait]
impl MarketplaceClient for LendingClubClient {
    async fn submit_orders(
        &self,
        investor_id: InvestorId,
        orders: &[OrderRequest],
    ) -> Result<Acknowledgment, Error> {
        Ok(self.post_orders(investor_id, orders).await?)
    }

    fn marketplace_name(&self) -> &'static str {
        "lendingclub"
    }
}
