//! Image generation backends
//!
//! One capability trait with three interchangeable strategies behind it:
//! a hosted gradio space, a raw inference API, and a simulated generator
//! for running without any model wired up.

pub mod gradio;
pub mod inference;
pub mod mock;
pub mod simulated;

pub use gradio::GradioBackend;
pub use inference::InferenceBackend;
pub use mock::MockImageBackend;
pub use simulated::SimulatedBackend;

use crate::config::Config;
use crate::models::DesignRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Produce an opaque image reference (URL or data URL) for the request.
    async fn generate_image(&self, request: &DesignRequest) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Gradio,
    Simulated,
    Inference,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Gradio => "gradio",
            BackendKind::Simulated => "simulated",
            BackendKind::Inference => "inference",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gradio" => Ok(BackendKind::Gradio),
            "simulated" => Ok(BackendKind::Simulated),
            "inference" => Ok(BackendKind::Inference),
            other => Err(Error::Config(format!(
                "unknown backend '{}' (expected gradio, simulated, or inference)",
                other
            ))),
        }
    }
}

/// Build the configured backend, reusing one HTTP connection pool across
/// whatever strategy is selected.
pub fn from_config(config: &Config, client: reqwest::Client) -> Result<Box<dyn ImageBackend>> {
    match config.backend {
        BackendKind::Gradio => Ok(Box::new(GradioBackend::new_with_client(
            config.gradio_space_url.clone(),
            config.request_timeout,
            client,
        ))),
        BackendKind::Simulated => Ok(Box::new(SimulatedBackend::new(
            config.placeholder_base_url.clone(),
            Duration::from_millis(config.simulated_delay_ms),
        ))),
        BackendKind::Inference => {
            let api_token = config
                .inference_api_token
                .clone()
                .ok_or_else(|| Error::Config("INFERENCE_API_TOKEN not set".to_string()))?;
            Ok(Box::new(InferenceBackend::new_with_client(
                config.inference_model_url.clone(),
                api_token,
                config.request_timeout,
                client,
            )))
        }
    }
}
