//! The design generation workflow.
//!
//! Accepts a submitted [`DesignRequest`], runs it through the configured
//! image backend (with optional retry), records the result when a store is
//! configured, and tracks what the result panel should show. One request is
//! in flight at a time; the loading state clears on every exit path.

use crate::backend::ImageBackend;
use crate::models::{DesignRecord, DesignRequest, DesignResult};
use crate::store::DesignStore;
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio_retry::{strategy::FixedInterval, Retry};
use tracing::{error, info, warn};

/// What the result panel is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Empty,
    Loading,
    Image(String),
}

#[derive(Debug, Clone)]
pub struct StudioOptions {
    /// Total backend attempts per generation (1 = no retry).
    pub retry_attempts: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
    /// Owner recorded on persisted designs.
    pub user_id: String,
}

impl Default for StudioOptions {
    fn default() -> Self {
        Self {
            retry_attempts: 1,
            retry_delay: Duration::from_millis(2000),
            user_id: "anonymous".to_string(),
        }
    }
}

pub struct DesignStudio {
    backend: Box<dyn ImageBackend>,
    store: Option<Box<dyn DesignStore>>,
    options: StudioOptions,
    in_flight: AtomicBool,
    panel: Mutex<PanelState>,
}

impl DesignStudio {
    pub fn new(
        backend: Box<dyn ImageBackend>,
        store: Option<Box<dyn DesignStore>>,
        options: StudioOptions,
    ) -> Self {
        Self {
            backend,
            store,
            options,
            in_flight: AtomicBool::new(false),
            panel: Mutex::new(PanelState::Empty),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn panel(&self) -> PanelState {
        self.panel.lock().unwrap().clone()
    }

    /// Run one generation. A submission while another is in flight is
    /// rejected without touching the backend; the UI additionally disables
    /// its submit control while loading.
    pub async fn generate(&self, request: DesignRequest) -> Result<DesignResult> {
        request.validate()?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Rejecting submission: a generation is already in flight");
            return Err(Error::Busy);
        }

        *self.panel.lock().unwrap() = PanelState::Loading;
        info!("Generating design for prompt: {}", request.composite_prompt);

        let outcome = self.run_generation(&request).await;

        match &outcome {
            Ok(result) => {
                *self.panel.lock().unwrap() = PanelState::Image(result.image_ref.clone());
                info!("Design generated ({} chars)", result.image_ref.len());
            }
            Err(e) => {
                *self.panel.lock().unwrap() = PanelState::Empty;
                error!("Failed to generate design: {}", e);
            }
        }
        // The loading flag clears regardless of which path was taken.
        self.in_flight.store(false, Ordering::SeqCst);

        outcome
    }

    async fn run_generation(&self, request: &DesignRequest) -> Result<DesignResult> {
        let image_ref = self.generate_with_retry(request).await?;

        // Fail closed: when a store is configured, the image is only
        // surfaced if the record of it could be saved.
        if let Some(store) = &self.store {
            let record = DesignRecord {
                user_id: self.options.user_id.clone(),
                prompt: request.prompt_text.clone(),
                negative_prompt: request.negative_prompt.clone(),
                scale: request.guidance_scale,
                category: request.category,
                image_url: image_ref.clone(),
            };
            store.save(&record).await?;
            info!("Saved design record for user {}", self.options.user_id);
        }

        Ok(DesignResult {
            image_ref,
            request: request.clone(),
        })
    }

    async fn generate_with_retry(&self, request: &DesignRequest) -> Result<String> {
        let retries = self.options.retry_attempts.saturating_sub(1) as usize;
        let retry_strategy =
            FixedInterval::from_millis(self.options.retry_delay.as_millis() as u64).take(retries);

        Retry::spawn(retry_strategy, move || async move {
            match self.backend.generate_image(request).await {
                Ok(image_ref) => Ok(image_ref),
                Err(e) => {
                    warn!("Backend attempt failed: {}", e);
                    Err(e)
                }
            }
        })
        .await
    }
}
