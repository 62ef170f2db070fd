//! Store implementations
//!
//! ```text
//! Directory facade / service layer
//!     ↓
//! Repository traits (repository.rs)
//!     ↓
//! MemoryStore (reference)  |  SledStore (persistent single table)
//! ```
//!
//! Both implementations honour the same contract; the backend is chosen from
//! [`Config`] and injected as `Arc<dyn SkillStore>` via [`StoreHandle::store`].

pub mod memory;
pub mod sled_table;

use std::sync::Arc;

use tracing::info;

use crate::config::{Backend, Config};
use crate::error::StorageError;
use crate::repository::SkillStore;

pub use memory::MemoryStore;
pub use sled_table::{SledStore, SledTableConfig};

/// An opened backend: the injectable store plus durability control
pub struct StoreHandle {
    store: Arc<dyn SkillStore>,
    sled: Option<Arc<SledStore>>,
}

impl StoreHandle {
    /// Shared store for injection into the directory facade
    pub fn store(&self) -> Arc<dyn SkillStore> {
        Arc::clone(&self.store)
    }

    /// Flush pending writes. The memory backend has nothing to flush.
    pub async fn flush(&self) -> Result<(), StorageError> {
        match &self.sled {
            Some(sled) => sled.flush().await,
            None => Ok(()),
        }
    }
}

/// Build the configured backend
pub async fn open_store(config: &Config) -> Result<StoreHandle, StorageError> {
    match config.backend {
        Backend::Memory => {
            info!("Using in-memory store");
            Ok(StoreHandle {
                store: Arc::new(MemoryStore::new()),
                sled: None,
            })
        }
        Backend::Sled => {
            let sled = Arc::new(
                SledStore::open(SledTableConfig {
                    db_path: Some(config.db_path()),
                    cache_capacity: config.cache_capacity_bytes,
                    flush_every_ms: config.flush_interval(),
                })
                .await?,
            );
            Ok(StoreHandle {
                store: sled.clone(),
                sled: Some(sled),
            })
        }
    }
}
