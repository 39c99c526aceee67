//! REST-backed record store.
//!
//! Inserts each record as a JSON row via a hosted table endpoint. The API
//! key goes out as both an `apikey` header and a bearer credential, which is
//! what hosted Postgres REST gateways expect.

use super::DesignStore;
use crate::models::DesignRecord;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct RestStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self::new_with_client(endpoint, api_key, reqwest::Client::new())
    }

    pub fn new_with_client(
        endpoint: String,
        api_key: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl DesignStore for RestStore {
    async fn save(&self, record: &DesignRecord) -> Result<()> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=minimal")
            .json(record);

        if let Some(api_key) = &self.api_key {
            request = request
                .header("apikey", api_key)
                .header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to reach design store: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Design store error (status {}): {}", status, error_text);
            return Err(Error::Store(format!(
                "insert failed (status {}): {}",
                status, error_text
            )));
        }

        Ok(())
    }
}
