//! Simulated generation for running without a real model.
//!
//! Waits a fixed delay, then returns a seeded URL against a placeholder
//! image service. Never fails.

use super::ImageBackend;
use crate::models::DesignRequest;
use crate::Result;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

const IMAGE_EDGE_PX: u32 = 512;

pub struct SimulatedBackend {
    base_url: String,
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(base_url: String, delay: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            delay,
        }
    }
}

#[async_trait]
impl ImageBackend for SimulatedBackend {
    async fn generate_image(&self, request: &DesignRequest) -> Result<String> {
        tokio::time::sleep(self.delay).await;

        let seed: u32 = rand::thread_rng().gen_range(1..=99_999);
        tracing::debug!(
            "Simulated generation for '{}' with seed {}",
            request.composite_prompt,
            seed
        );

        Ok(format!(
            "{}/seed/{}/{}/{}",
            self.base_url, seed, IMAGE_EDGE_PX, IMAGE_EDGE_PX
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DesignCategory;

    fn make_request() -> DesignRequest {
        DesignRequest::new(DesignCategory::Shoes, "canvas sneakers", "heels", 9)
    }

    #[tokio::test]
    async fn test_simulated_generation_builds_seeded_url() {
        let backend = SimulatedBackend::new(
            "https://placeholder.test/".to_string(),
            Duration::from_millis(0),
        );

        let image_ref = backend.generate_image(&make_request()).await.unwrap();

        let suffix = image_ref
            .strip_prefix("https://placeholder.test/seed/")
            .expect("url should start with the placeholder base");
        let mut parts = suffix.split('/');
        let seed: u32 = parts.next().unwrap().parse().unwrap();
        assert!((1..=99_999).contains(&seed));
        assert_eq!(parts.next(), Some("512"));
        assert_eq!(parts.next(), Some("512"));
    }

    #[tokio::test]
    async fn test_simulated_generation_always_succeeds() {
        let backend =
            SimulatedBackend::new("https://placeholder.test".to_string(), Duration::from_millis(0));

        for _ in 0..5 {
            assert!(backend.generate_image(&make_request()).await.is_ok());
        }
    }
}
