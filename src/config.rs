//! Process configuration.
//!
//! Loaded once at startup from the environment (with `.env` support).
//! Credentials live here and in the clients built from here; they are never
//! logged and never written into source.

use crate::backend::BackendKind;
use crate::{Error, Result};
use std::time::Duration;

const DEFAULT_GRADIO_SPACE_URL: &str = "https://stabilityai-stable-diffusion.hf.space";
const DEFAULT_INFERENCE_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-2";
const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://picsum.photos";

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub gradio_space_url: String,
    pub inference_model_url: String,
    pub inference_api_token: Option<String>,
    pub placeholder_base_url: String,
    pub simulated_delay_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub request_timeout: Duration,
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    pub user_id: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend = std::env::var("STUDIO_BACKEND")
            .unwrap_or_else(|_| "simulated".to_string())
            .parse::<BackendKind>()?;

        let inference_api_token = std::env::var("INFERENCE_API_TOKEN").ok();
        if backend == BackendKind::Inference && inference_api_token.is_none() {
            return Err(Error::Config("INFERENCE_API_TOKEN not set".to_string()));
        }

        Ok(Self {
            backend,
            gradio_space_url: std::env::var("GRADIO_SPACE_URL")
                .unwrap_or_else(|_| DEFAULT_GRADIO_SPACE_URL.to_string()),
            inference_model_url: std::env::var("INFERENCE_MODEL_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_MODEL_URL.to_string()),
            inference_api_token,
            placeholder_base_url: std::env::var("PLACEHOLDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_BASE_URL.to_string()),
            simulated_delay_ms: parse_var("SIMULATED_DELAY_MS", 1500)?,
            retry_attempts: parse_var("STUDIO_RETRY_ATTEMPTS", 1)?,
            retry_delay_ms: parse_var("STUDIO_RETRY_DELAY_MS", 2000)?,
            request_timeout: Duration::from_secs(parse_var("STUDIO_REQUEST_TIMEOUT_SECS", 30)?),
            store_url: std::env::var("STORE_URL").ok(),
            store_api_key: std::env::var("STORE_API_KEY").ok(),
            user_id: std::env::var("STUDIO_USER_ID").unwrap_or_else(|_| "anonymous".to_string()),
            port: parse_var("PORT", 8080)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid value for {}", value, key))),
        Err(_) => Ok(default),
    }
}
