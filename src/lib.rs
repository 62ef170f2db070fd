//! Skill Directory - single-table storage for accounts and their skills
//!
//! Three entity kinds share one keyed store:
//!
//! | Entity | Primary key |
//! |--------|-------------|
//! | Account | `ACCOUNT#<handle>` |
//! | AccountSkill | `ACCOUNTSKILL#<handle>#<skill-id>` |
//! | CatalogSkill | `CATALOGSKILL#<skill-id>` |
//!
//! Secondary indexes answer cross-entity questions ("which accounts know Go
//! at Advanced level") without a join engine; see [`index`].
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/skill-directory/
//! ├── directory.sled/      # Single table plus index trees
//! └── config.toml          # Configuration
//! ```
//!
//! ## Backends
//!
//! - [`store::SledStore`] - persistent table with conditional writes
//! - [`store::MemoryStore`] - reference store for tests and local development

pub mod config;
pub mod directory;
pub mod error;
pub mod index;
pub mod keys;
pub mod models;
pub mod repository;
pub mod store;
pub mod sync;

// Re-exports
pub use config::{Backend, Config};
pub use directory::{CatalogEdit, CatalogSkillChanges, SkillDirectory};
pub use error::{ErrorKind, StorageError};
pub use index::{QueryShape, SkillQuery, YearsRange};
pub use keys::{EntityKey, EntityKind};
pub use models::{
    Account, AccountSkill, CatalogSkill, NewAccount, NewAccountSkill, NewCatalogSkill,
    ProficiencyLevel, Record, SkillCategory,
};
pub use repository::{AccountRepository, AccountSkillRepository, CatalogSkillRepository, SkillStore};
pub use store::{open_store, MemoryStore, SledStore, SledTableConfig, StoreHandle};
pub use sync::{resync_denormalized, SyncReport};
