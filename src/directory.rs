//! Directory facade
//!
//! Thin orchestration over the repository traits for callers that work with
//! raw input (the CLI, a future HTTP layer):
//! - adding a skill looks up the catalog entry to fill the denormalized fields
//! - catalog edits optionally re-sync AccountSkill copies afterwards

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::error::StorageError;
use crate::index::SkillQuery;
use crate::models::{
    Account, AccountSkill, CatalogSkill, NewAccount, NewAccountSkill, NewCatalogSkill,
};
use crate::repository::SkillStore;
use crate::sync::{resync_denormalized, SyncReport};

/// Partial edit of a catalog entry; `None` keeps the current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSkillChanges {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Result of a catalog edit
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEdit {
    pub skill: CatalogSkill,
    /// Present when denormalized copies were re-synced
    pub resync: Option<SyncReport>,
}

pub struct SkillDirectory {
    store: Arc<dyn SkillStore>,
    resync_on_catalog_update: bool,
}

impl SkillDirectory {
    pub fn new(store: Arc<dyn SkillStore>) -> Self {
        Self {
            store,
            resync_on_catalog_update: false,
        }
    }

    pub fn from_config(store: Arc<dyn SkillStore>, config: &Config) -> Self {
        Self::new(store).with_resync(config.resync_on_catalog_update)
    }

    pub fn with_resync(mut self, enabled: bool) -> Self {
        self.resync_on_catalog_update = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn SkillStore> {
        &self.store
    }

    pub async fn register_account(&self, input: NewAccount) -> Result<Account, StorageError> {
        let account = self.store.create_account(Account::new(input)?).await?;
        info!(handle = %account.handle, "Account registered");
        Ok(account)
    }

    pub async fn add_catalog_skill(&self, input: NewCatalogSkill) -> Result<CatalogSkill, StorageError> {
        self.store.create_catalog_skill(CatalogSkill::new(input)?).await
    }

    /// Apply `changes` to a catalog entry, re-syncing copies if enabled
    pub async fn edit_catalog_skill(
        &self,
        skill_id: &str,
        changes: CatalogSkillChanges,
    ) -> Result<CatalogEdit, StorageError> {
        let mut skill = self.store.get_catalog_skill(skill_id).await?;
        if let Some(name) = &changes.display_name {
            skill.set_display_name(name)?;
        }
        if let Some(description) = &changes.description {
            skill.set_description(description);
        }
        if let Some(category) = &changes.category {
            skill.set_category(category)?;
        }
        if let Some(tags) = &changes.tags {
            skill.set_tags(tags)?;
        }

        let skill = self.store.update_catalog_skill(skill).await?;
        let resync = if self.resync_on_catalog_update {
            Some(resync_denormalized(self.store.as_ref(), &skill).await?)
        } else {
            None
        };

        Ok(CatalogEdit { skill, resync })
    }

    /// Add a skill to an account, copying name and category from the catalog
    pub async fn add_skill(
        &self,
        handle: &str,
        skill_id: &str,
        input: NewAccountSkill,
    ) -> Result<AccountSkill, StorageError> {
        let catalog = self.store.get_catalog_skill(skill_id).await?;
        let skill = AccountSkill::new(handle, &catalog, input)?;
        self.store.create_account_skill(skill).await
    }

    pub async fn endorse(&self, handle: &str, skill_id: &str) -> Result<AccountSkill, StorageError> {
        self.store.endorse_account_skill(handle, skill_id).await
    }

    pub async fn remove_skill(&self, handle: &str, skill_id: &str) -> Result<(), StorageError> {
        self.store.delete_account_skill(handle, skill_id).await
    }

    pub async fn find(&self, query: &SkillQuery) -> Result<Vec<AccountSkill>, StorageError> {
        self.store.find_account_skills(query).await
    }

    pub async fn resync(&self, skill_id: &str) -> Result<SyncReport, StorageError> {
        let catalog = self.store.get_catalog_skill(skill_id).await?;
        resync_denormalized(self.store.as_ref(), &catalog).await
    }
}
