use super::DesignStore;
use crate::models::DesignRecord;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store used by tests and local runs; failure injection covers
/// the fail-closed persistence path.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<DesignRecord>>>,
    fail_saves: Arc<AtomicBool>,
    save_count: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    pub fn records(&self) -> Vec<DesignRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn get_save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

#[async_trait]
impl DesignStore for MemoryStore {
    async fn save(&self, record: &DesignRecord) -> Result<()> {
        let mut count = self.save_count.lock().unwrap();
        *count += 1;

        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::Store("simulated store failure".to_string()));
        }

        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
