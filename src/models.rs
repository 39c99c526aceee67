//! Data models and structures
//!
//! Defines the design request/result types shared by the form, the studio,
//! the backends, and the HTTP surface.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_GUIDANCE_SCALE: u8 = 1;
pub const MAX_GUIDANCE_SCALE: u8 = 20;
pub const DEFAULT_GUIDANCE_SCALE: u8 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignCategory {
    #[default]
    Clothing,
    Bags,
    Shoes,
}

impl DesignCategory {
    pub const ALL: [DesignCategory; 3] = [
        DesignCategory::Clothing,
        DesignCategory::Bags,
        DesignCategory::Shoes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DesignCategory::Clothing => "clothing",
            DesignCategory::Bags => "bags",
            DesignCategory::Shoes => "shoes",
        }
    }
}

impl fmt::Display for DesignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated packet of user input submitted for generation.
///
/// Immutable once built; `composite_prompt` is derived at construction and
/// is what every backend actually sends upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRequest {
    pub category: DesignCategory,
    pub prompt_text: String,
    pub negative_prompt: String,
    pub guidance_scale: u8,
    pub composite_prompt: String,
}

impl DesignRequest {
    pub fn new(
        category: DesignCategory,
        prompt_text: impl Into<String>,
        negative_prompt: impl Into<String>,
        guidance_scale: u8,
    ) -> Self {
        let prompt_text = prompt_text.into();
        let composite_prompt = format!("{}: {}", category, prompt_text);

        Self {
            category,
            prompt_text,
            negative_prompt: negative_prompt.into(),
            guidance_scale,
            composite_prompt,
        }
    }

    /// Checks the invariants the form normally guarantees. The studio calls
    /// this before touching any state, since requests can also arrive over
    /// the wire where only `prompt` is required.
    pub fn validate(&self) -> Result<()> {
        if self.prompt_text.trim().is_empty() {
            return Err(Error::Validation("prompt must not be empty".to_string()));
        }
        if !(MIN_GUIDANCE_SCALE..=MAX_GUIDANCE_SCALE).contains(&self.guidance_scale) {
            return Err(Error::Validation(format!(
                "guidance scale {} outside [{}, {}]",
                self.guidance_scale, MIN_GUIDANCE_SCALE, MAX_GUIDANCE_SCALE
            )));
        }
        Ok(())
    }
}

/// One successful generation: the image reference plus the request it came
/// from. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignResult {
    pub image_ref: String,
    pub request: DesignRequest,
}

/// Row persisted for each successful generation. The store stamps the
/// creation time; field names follow the store's column naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub user_id: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub scale: u8,
    pub category: DesignCategory,
    pub image_url: String,
}

// HTTP API request/response models

#[derive(Debug, Default, Deserialize)]
pub struct GenerateDesignBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub negative: Option<String>,
    #[serde(default)]
    pub scale: Option<u8>,
    #[serde(default)]
    pub category: Option<DesignCategory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateDesignResponse {
    pub image: String,
}
