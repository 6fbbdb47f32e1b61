//! Long-term memory for the research agent.
//!
//! Memory is an append-only log of free-form facts. There is no schema and
//! no deduplication; the whole log is handed to the model as one block.

mod file;

pub use file::FileFactStore;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::RwLock;

/// Header written to a fresh memory log.
pub const MEMORY_HEADER: &str = "--- Research Memory ---";

/// Trait for fact storage backends.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// Return the whole log as text.
    async fn load(&self) -> Result<String>;

    /// Append one fact to the log.
    async fn append(&self, fact: &str) -> Result<()>;

    /// Human-readable location of the log.
    fn location(&self) -> String;
}

/// Fact store held in memory.
pub struct InMemoryFactStore {
    log: RwLock<String>,
}

impl InMemoryFactStore {
    pub fn new() -> Self {
        Self {
            log: RwLock::new(format!("{}\n", MEMORY_HEADER)),
        }
    }
}

impl Default for InMemoryFactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactStore for InMemoryFactStore {
    async fn load(&self) -> Result<String> {
        let log = self.log.read().unwrap();
        Ok(log.clone())
    }

    async fn append(&self, fact: &str) -> Result<()> {
        let mut log = self.log.write().unwrap();
        log.push_str(fact);
        log.push('\n');
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_appends_in_order() {
        let store = InMemoryFactStore::new();
        store.append("Paris is the capital of France").await.unwrap();
        store.append("Paris is the capital of France").await.unwrap();

        let log = store.load().await.unwrap();
        assert_eq!(
            log,
            "--- Research Memory ---\n\
            Paris is the capital of France\n\
            Paris is the capital of France\n"
        );
    }
}
