//! HAL search API client
//!
//! The search service is queried with a fixed author query and field list,
//! most recent production date first.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::HalConfig,
    error::{AppError, AppResult},
    models::publication::REQUESTED_FIELDS,
};

/// Source of the raw publications search payload
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Perform one search request and return the decoded JSON body
    async fn fetch(&self) -> AppResult<Value>;
}

#[derive(Clone)]
pub struct HalClient {
    client: reqwest::Client,
    config: HalConfig,
}

impl HalClient {
    pub fn new(config: HalConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Query string pairs sent to the search endpoint
    pub fn query_params(&self) -> [(&'static str, String); 4] {
        [
            ("q", self.config.query.clone()),
            ("fl", REQUESTED_FIELDS.join(",")),
            ("sort", "producedDate_s desc".to_string()),
            ("wt", "json".to_string()),
        ]
    }
}

#[async_trait]
impl PublicationSource for HalClient {
    async fn fetch(&self) -> AppResult<Value> {
        tracing::debug!("Querying HAL search API at {}", self.config.search_url);
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(&self.config.search_url)
            .query(&self.query_params())
            .send()
            .await?
            .error_for_status()?;

        let payload = response.json::<Value>().await?;

        tracing::info!("HAL search completed in {:?}", start.elapsed());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let client = HalClient::new(HalConfig::default()).unwrap();
        let params = client.query_params();
        assert_eq!(params[0], ("q", "ammar mian".to_string()));
        assert_eq!(
            params[1].1,
            "uri_s,authFullName_s,title_s,docType_s,producedDate_s,journalTitle_s,conferenceTitle_s,label_bibtex,citationFull_s"
        );
        assert_eq!(params[2], ("sort", "producedDate_s desc".to_string()));
        assert_eq!(params[3], ("wt", "json".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_an_upstream_error() {
        let client = HalClient::new(HalConfig {
            search_url: "http://127.0.0.1:9/search/".to_string(),
            query: "nobody".to_string(),
            timeout_seconds: 2,
        })
        .unwrap();

        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
