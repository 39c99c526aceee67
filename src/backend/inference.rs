//! Raw inference API backend.
//!
//! Posts `{"inputs": prompt}` with a bearer credential to a hosted model
//! URL and encodes the returned image bytes as a base64 data URL. Upstream
//! error bodies are preserved verbatim so the HTTP surface can relay them.

use super::ImageBackend;
use crate::models::DesignRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct InferenceBackend {
    client: reqwest::Client,
    model_url: String,
    api_token: String,
    timeout: Duration,
}

impl InferenceBackend {
    pub fn new(model_url: String, api_token: String, timeout: Duration) -> Self {
        Self::new_with_client(model_url, api_token, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        model_url: String,
        api_token: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            model_url,
            api_token,
            timeout,
        }
    }
}

#[async_trait]
impl ImageBackend for InferenceBackend {
    async fn generate_image(&self, request: &DesignRequest) -> Result<String> {
        tracing::debug!("Sending inference request to {}", self.model_url);

        let response = self
            .client
            .post(&self.model_url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&serde_json::json!({ "inputs": request.composite_prompt }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach inference API: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Inference API error (status {}): {}", status, error_text);
            return Err(Error::Upstream(error_text));
        }

        let image_bytes = response.bytes().await?;
        tracing::debug!("Inference API returned {} bytes", image_bytes.len());

        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image_bytes);
        Ok(format!("data:image/png;base64,{}", encoded))
    }
}
