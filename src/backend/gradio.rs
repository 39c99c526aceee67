//! Remote inference client against a hosted gradio space.
//!
//! Invokes the space's `/infer` prediction route with positional inputs
//! `[prompt, negative, scale]` and reads the first element of the returned
//! data sequence as the image reference.

use super::ImageBackend;
use crate::models::DesignRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PredictRequest {
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    data: Vec<Value>,
}

pub struct GradioBackend {
    client: reqwest::Client,
    space_url: String,
    timeout: Duration,
}

impl GradioBackend {
    pub fn new(space_url: String, timeout: Duration) -> Self {
        Self::new_with_client(space_url, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(space_url: String, timeout: Duration, client: reqwest::Client) -> Self {
        Self {
            client,
            space_url: space_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Prediction outputs are either bare strings or file objects carrying
    /// a `url` field; anything else is not an image reference.
    fn image_ref_from(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(map) => map
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

#[async_trait]
impl ImageBackend for GradioBackend {
    async fn generate_image(&self, request: &DesignRequest) -> Result<String> {
        let body = PredictRequest {
            data: vec![
                Value::from(request.composite_prompt.clone()),
                Value::from(request.negative_prompt.clone()),
                Value::from(request.guidance_scale),
            ],
        };

        tracing::debug!("Sending prediction request to {}", self.space_url);

        let response = self
            .client
            .post(format!("{}/run/infer", self.space_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach gradio space: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Gradio space error (status {}): {}", status, error_text);
            return Err(Error::Upstream(format!(
                "prediction failed (status {}): {}",
                status, error_text
            )));
        }

        let body_text = response.text().await?;
        let prediction: PredictResponse = serde_json::from_str(&body_text).map_err(|e| {
            tracing::error!("Failed to parse prediction response: {}\nBody: {}", e, body_text);
            Error::Upstream(format!("unexpected response format: {}", e))
        })?;

        prediction
            .data
            .first()
            .and_then(Self::image_ref_from)
            .ok_or_else(|| {
                Error::Upstream("unexpected response format: no image in prediction data".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesignCategory;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_request() -> DesignRequest {
        DesignRequest::new(DesignCategory::Clothing, "a summer dress", "dark colors", 9)
    }

    fn make_backend(server: &MockServer) -> GradioBackend {
        GradioBackend::new(server.uri(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_generate_image_reads_first_data_element() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run/infer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": ["https://space.test/file=abc/image.png", 1234]
            })))
            .mount(&server)
            .await;

        let image_ref = make_backend(&server)
            .generate_image(&make_request())
            .await
            .unwrap();
        assert_eq!(image_ref, "https://space.test/file=abc/image.png");
    }

    #[tokio::test]
    async fn test_generate_image_accepts_file_objects() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run/infer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "url": "https://space.test/image.png", "is_file": true }]
            })))
            .mount(&server)
            .await;

        let image_ref = make_backend(&server)
            .generate_image(&make_request())
            .await
            .unwrap();
        assert_eq!(image_ref, "https://space.test/image.png");
    }

    #[tokio::test]
    async fn test_request_carries_composite_prompt_and_scale() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run/infer"))
            .and(body_string_contains("clothing: a summer dress"))
            .and(body_string_contains("dark colors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": ["https://space.test/image.png"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        make_backend(&server)
            .generate_image(&make_request())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_data_sequence_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run/infer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let err = make_backend(&server)
            .generate_image(&make_request())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains("unexpected response format"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run/infer"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>queue full</html>"))
            .mount(&server)
            .await;

        let err = make_backend(&server)
            .generate_image(&make_request())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_api_error_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run/infer"))
            .respond_with(ResponseTemplate::new(503).set_body_string("space is sleeping"))
            .mount(&server)
            .await;

        let err = make_backend(&server)
            .generate_image(&make_request())
            .await
            .unwrap_err();
        match err {
            Error::Upstream(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("space is sleeping"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
