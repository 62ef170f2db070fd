//! Repository contract
//!
//! Capability traits every backing store implements. The service layer only
//! sees these traits, so the in-memory reference store and the persistent
//! table are interchangeable.
//!
//! Shared rules:
//! - `create_*` sets `created_at` and `updated_at`, and fails with
//!   `AlreadyExists` if the key is taken
//! - `update_*` refreshes `updated_at`, keeps the stored `created_at`, and
//!   fails with `NotFound` if the key was never created (never an upsert)
//! - concurrent updates of one existing key are last-writer-wins
//! - list operations skip items that fail to decode instead of failing

use async_trait::async_trait;

use crate::error::StorageError;
use crate::index::SkillQuery;
use crate::models::{Account, AccountSkill, CatalogSkill, ProficiencyLevel, Record, SkillCategory};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, account: Account) -> Result<Account, StorageError>;

    /// Lookup is case-insensitive on the handle
    async fn get_account(&self, handle: &str) -> Result<Account, StorageError>;

    async fn update_account(&self, account: Account) -> Result<Account, StorageError>;

    async fn account_exists(&self, handle: &str) -> Result<bool, StorageError>;

    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError>;

    /// Profile and skill records of one account, ordered by primary key
    async fn account_records(&self, handle: &str) -> Result<Vec<Record>, StorageError>;
}

#[async_trait]
pub trait AccountSkillRepository: Send + Sync {
    async fn create_account_skill(&self, skill: AccountSkill) -> Result<AccountSkill, StorageError>;

    async fn get_account_skill(
        &self,
        handle: &str,
        skill_id: &str,
    ) -> Result<AccountSkill, StorageError>;

    async fn update_account_skill(&self, skill: AccountSkill) -> Result<AccountSkill, StorageError>;

    async fn delete_account_skill(&self, handle: &str, skill_id: &str) -> Result<(), StorageError>;

    /// Atomically increment the endorsement count
    async fn endorse_account_skill(
        &self,
        handle: &str,
        skill_id: &str,
    ) -> Result<AccountSkill, StorageError>;

    /// Re-copy `skill_name` and `category` from `catalog` in one conditional
    /// write, leaving every other field as stored. Returns `None` when the
    /// copy was already current.
    async fn refresh_denormalized(
        &self,
        handle: &str,
        skill_id: &str,
        catalog: &CatalogSkill,
    ) -> Result<Option<AccountSkill>, StorageError>;

    async fn list_account_skills(&self, handle: &str) -> Result<Vec<AccountSkill>, StorageError>;

    /// Walk the category index. Results are in index order.
    async fn find_account_skills(
        &self,
        query: &SkillQuery,
    ) -> Result<Vec<AccountSkill>, StorageError>;

    /// Every record referencing a catalog skill, whatever its category.
    /// Used to re-sync denormalized copies.
    async fn list_by_skill_id(&self, skill_id: &str) -> Result<Vec<AccountSkill>, StorageError>;

    async fn list_by_skill(
        &self,
        category: SkillCategory,
        skill_id: &str,
    ) -> Result<Vec<AccountSkill>, StorageError> {
        self.find_account_skills(&SkillQuery::new(category).with_skill(skill_id))
            .await
    }

    async fn list_by_skill_level(
        &self,
        category: SkillCategory,
        skill_id: &str,
        level: ProficiencyLevel,
    ) -> Result<Vec<AccountSkill>, StorageError> {
        self.find_account_skills(
            &SkillQuery::new(category)
                .with_skill(skill_id)
                .with_level(level),
        )
        .await
    }
}

#[async_trait]
pub trait CatalogSkillRepository: Send + Sync {
    async fn create_catalog_skill(&self, skill: CatalogSkill) -> Result<CatalogSkill, StorageError>;

    async fn get_catalog_skill(&self, skill_id: &str) -> Result<CatalogSkill, StorageError>;

    /// Does not touch AccountSkill copies; see [`crate::sync`]
    async fn update_catalog_skill(&self, skill: CatalogSkill) -> Result<CatalogSkill, StorageError>;

    async fn delete_catalog_skill(&self, skill_id: &str) -> Result<(), StorageError>;

    async fn list_catalog_skills(&self) -> Result<Vec<CatalogSkill>, StorageError>;
}

/// Full store contract
pub trait SkillStore: AccountRepository + AccountSkillRepository + CatalogSkillRepository {}

impl<T> SkillStore for T where T: AccountRepository + AccountSkillRepository + CatalogSkillRepository {}
