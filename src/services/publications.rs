//! Publications service

use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::publication::{normalize_all, PublicationRecord},
    services::hal::PublicationSource,
};

#[derive(Clone)]
pub struct PublicationsService {
    source: Arc<dyn PublicationSource>,
}

impl PublicationsService {
    pub fn new(source: Arc<dyn PublicationSource>) -> Self {
        Self { source }
    }

    /// Raw search payload, exactly as decoded from the upstream
    pub async fn fetch_raw(&self) -> AppResult<Value> {
        self.source.fetch().await
    }

    /// Fetch and normalize every publication, in upstream order
    pub async fn load_records(&self) -> AppResult<Vec<PublicationRecord>> {
        let payload = self.fetch_raw().await?;
        let records = normalize_all(&payload).ok_or_else(|| {
            AppError::Upstream("Search payload has no response.docs array".to_string())
        })?;

        tracing::debug!("Normalized {} publications", records.len());
        Ok(records)
    }
}
