use super::ImageBackend;
use crate::models::DesignRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const DEFAULT_IMAGE_REF: &str = "https://mock-images.example.com/design.png";

/// Scripted backend for tests: queued outcomes cycle per call, with optional
/// artificial latency for exercising the in-flight guard.
#[derive(Clone)]
pub struct MockImageBackend {
    responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl MockImageBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            delay: None,
        }
    }

    pub fn with_image_ref(self, image_ref: String) -> Self {
        self.responses.lock().unwrap().push(Ok(image_ref));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageBackend for MockImageBackend {
    async fn generate_image(&self, _request: &DesignRequest) -> Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(DEFAULT_IMAGE_REF.to_string());
        }

        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok(image_ref) => Ok(image_ref.clone()),
            Err(message) => Err(Error::Upstream(message.clone())),
        }
    }
}
