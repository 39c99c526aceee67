//! The design prompt form.
//!
//! Holds the editable fields of the submission form and turns them into an
//! immutable [`DesignRequest`] on explicit submission. Performs no I/O.

use crate::models::{
    DesignCategory, DesignRequest, DEFAULT_GUIDANCE_SCALE, MAX_GUIDANCE_SCALE, MIN_GUIDANCE_SCALE,
};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct DesignForm {
    pub category: DesignCategory,
    pub prompt_text: String,
    pub negative_prompt: String,
    guidance_scale: u8,
}

impl Default for DesignForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignForm {
    pub fn new() -> Self {
        Self {
            category: DesignCategory::default(),
            prompt_text: String::new(),
            negative_prompt: String::new(),
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }

    pub fn guidance_scale(&self) -> u8 {
        self.guidance_scale
    }

    /// The slider control cannot leave [1, 20]; neither can this setter.
    pub fn set_guidance_scale(&mut self, scale: u8) {
        self.guidance_scale = scale.clamp(MIN_GUIDANCE_SCALE, MAX_GUIDANCE_SCALE);
    }

    /// True when both text fields carry something submittable.
    pub fn can_submit(&self) -> bool {
        !self.prompt_text.trim().is_empty() && !self.negative_prompt.trim().is_empty()
    }

    /// Build the request this form describes. Both text fields are required;
    /// the composite prompt is computed here, at submission time.
    pub fn submit(&self) -> Result<DesignRequest> {
        if self.prompt_text.trim().is_empty() {
            return Err(Error::Validation(
                "design description is required".to_string(),
            ));
        }
        if self.negative_prompt.trim().is_empty() {
            return Err(Error::Validation("negative prompt is required".to_string()));
        }

        Ok(DesignRequest::new(
            self.category,
            self.prompt_text.clone(),
            self.negative_prompt.clone(),
            self.guidance_scale,
        ))
    }
}
