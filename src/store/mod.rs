//! Persistence of generated designs
//!
//! One record per successful generation, inserted fire-and-forget into an
//! external store. Records are never updated or deleted by this workflow.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::models::DesignRecord;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DesignStore: Send + Sync {
    async fn save(&self, record: &DesignRecord) -> Result<()>;
}
