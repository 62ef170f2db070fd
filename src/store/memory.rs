//! In-memory reference store
//!
//! Behaves like the persistent table for every contract operation and is used
//! in tests and local development. All three collections sit behind one
//! reader/writer lock: reads run concurrently, every write is exclusive, and a
//! write to any collection blocks reads of the others.
//!
//! Collections are keyed by encoded primary key, so iteration order matches
//! the persistent table's key order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageError;
use crate::index::{self, SkillQuery};
use crate::keys::{self, EntityKind};
use crate::models::{Account, AccountSkill, CatalogSkill, Record};
use crate::repository::{AccountRepository, AccountSkillRepository, CatalogSkillRepository};

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<String, Account>,
    account_skills: BTreeMap<String, AccountSkill>,
    catalog_skills: BTreeMap<String, CatalogSkill>,
}

/// Reference store over lock-guarded maps
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of items across all collections
    pub async fn len(&self) -> usize {
        let tables = self.tables.read().await;
        tables.accounts.len() + tables.account_skills.len() + tables.catalog_skills.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create_account(&self, mut account: Account) -> Result<Account, StorageError> {
        let key = account.key();
        let mut tables = self.tables.write().await;
        if tables.accounts.contains_key(&key) {
            return Err(StorageError::already_exists(EntityKind::Account, key));
        }

        let now = Utc::now();
        account.created_at = now;
        account.updated_at = now;
        tables.accounts.insert(key.clone(), account.clone());
        debug!(key = %key, "Account created");
        Ok(account)
    }

    async fn get_account(&self, handle: &str) -> Result<Account, StorageError> {
        let key = keys::account_key(handle);
        self.tables
            .read()
            .await
            .accounts
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(EntityKind::Account, key))
    }

    async fn update_account(&self, mut account: Account) -> Result<Account, StorageError> {
        let key = account.key();
        let mut tables = self.tables.write().await;
        let existing = tables
            .accounts
            .get_mut(&key)
            .ok_or_else(|| StorageError::not_found(EntityKind::Account, key.clone()))?;

        account.created_at = existing.created_at;
        account.updated_at = Utc::now();
        *existing = account.clone();
        debug!(key = %key, "Account updated");
        Ok(account)
    }

    async fn account_exists(&self, handle: &str) -> Result<bool, StorageError> {
        let key = keys::account_key(handle);
        Ok(self.tables.read().await.accounts.contains_key(&key))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.tables.read().await.accounts.values().cloned().collect())
    }

    async fn account_records(&self, handle: &str) -> Result<Vec<Record>, StorageError> {
        let tables = self.tables.read().await;
        let mut records: Vec<Record> = Vec::new();

        if let Some(account) = tables.accounts.get(&keys::account_key(handle)) {
            records.push(account.clone().into());
        }
        let prefix = keys::account_skill_key(handle, "");
        records.extend(
            tables
                .account_skills
                .range(prefix.clone()..)
                .take_while(|(k, _)| k.starts_with(&prefix))
                .map(|(_, s)| Record::from(s.clone())),
        );
        Ok(records)
    }
}

#[async_trait]
impl AccountSkillRepository for MemoryStore {
    async fn create_account_skill(&self, mut skill: AccountSkill) -> Result<AccountSkill, StorageError> {
        let key = skill.key();
        let mut tables = self.tables.write().await;
        if tables.account_skills.contains_key(&key) {
            return Err(StorageError::already_exists(EntityKind::AccountSkill, key));
        }

        let now = Utc::now();
        skill.created_at = now;
        skill.updated_at = now;
        tables.account_skills.insert(key.clone(), skill.clone());
        debug!(key = %key, "AccountSkill created");
        Ok(skill)
    }

    async fn get_account_skill(&self, handle: &str, skill_id: &str) -> Result<AccountSkill, StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        self.tables
            .read()
            .await
            .account_skills
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(EntityKind::AccountSkill, key))
    }

    async fn update_account_skill(&self, mut skill: AccountSkill) -> Result<AccountSkill, StorageError> {
        let key = skill.key();
        let mut tables = self.tables.write().await;
        let existing = tables
            .account_skills
            .get_mut(&key)
            .ok_or_else(|| StorageError::not_found(EntityKind::AccountSkill, key.clone()))?;

        skill.created_at = existing.created_at;
        skill.updated_at = Utc::now();
        *existing = skill.clone();
        debug!(key = %key, "AccountSkill updated");
        Ok(skill)
    }

    async fn delete_account_skill(&self, handle: &str, skill_id: &str) -> Result<(), StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        match self.tables.write().await.account_skills.remove(&key) {
            Some(_) => {
                debug!(key = %key, "AccountSkill deleted");
                Ok(())
            }
            None => Err(StorageError::not_found(EntityKind::AccountSkill, key)),
        }
    }

    async fn endorse_account_skill(&self, handle: &str, skill_id: &str) -> Result<AccountSkill, StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        let mut tables = self.tables.write().await;
        let skill = tables
            .account_skills
            .get_mut(&key)
            .ok_or_else(|| StorageError::not_found(EntityKind::AccountSkill, key.clone()))?;

        skill.endorse();
        skill.updated_at = Utc::now();
        debug!(key = %key, endorsements = skill.endorsements, "AccountSkill endorsed");
        Ok(skill.clone())
    }

    async fn refresh_denormalized(
        &self,
        handle: &str,
        skill_id: &str,
        catalog: &CatalogSkill,
    ) -> Result<Option<AccountSkill>, StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        let mut tables = self.tables.write().await;
        let skill = tables
            .account_skills
            .get_mut(&key)
            .ok_or_else(|| StorageError::not_found(EntityKind::AccountSkill, key.clone()))?;

        if !skill.is_stale(catalog) {
            return Ok(None);
        }
        skill.refresh_from_catalog(catalog);
        skill.updated_at = Utc::now();
        debug!(key = %key, "Denormalized copy refreshed");
        Ok(Some(skill.clone()))
    }

    async fn list_account_skills(&self, handle: &str) -> Result<Vec<AccountSkill>, StorageError> {
        let prefix = keys::account_skill_key(handle, "");
        let tables = self.tables.read().await;
        Ok(tables
            .account_skills
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn find_account_skills(&self, query: &SkillQuery) -> Result<Vec<AccountSkill>, StorageError> {
        query.shape()?;
        let tables = self.tables.read().await;
        let mut matched: Vec<(String, AccountSkill)> = tables
            .account_skills
            .values()
            .filter(|s| query.matches(s))
            .map(|s| (index::category_index_key(s), s.clone()))
            .collect();
        matched.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matched.into_iter().map(|(_, s)| s).collect())
    }

    async fn list_by_skill_id(&self, skill_id: &str) -> Result<Vec<AccountSkill>, StorageError> {
        let skill_id = keys::normalize(skill_id);
        let tables = self.tables.read().await;
        Ok(tables
            .account_skills
            .values()
            .filter(|s| keys::normalize(&s.skill_id) == skill_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CatalogSkillRepository for MemoryStore {
    async fn create_catalog_skill(&self, mut skill: CatalogSkill) -> Result<CatalogSkill, StorageError> {
        let key = skill.key();
        let mut tables = self.tables.write().await;
        if tables.catalog_skills.contains_key(&key) {
            return Err(StorageError::already_exists(EntityKind::CatalogSkill, key));
        }

        let now = Utc::now();
        skill.created_at = now;
        skill.updated_at = now;
        tables.catalog_skills.insert(key.clone(), skill.clone());
        debug!(key = %key, "CatalogSkill created");
        Ok(skill)
    }

    async fn get_catalog_skill(&self, skill_id: &str) -> Result<CatalogSkill, StorageError> {
        let key = keys::catalog_skill_key(skill_id);
        self.tables
            .read()
            .await
            .catalog_skills
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(EntityKind::CatalogSkill, key))
    }

    async fn update_catalog_skill(&self, mut skill: CatalogSkill) -> Result<CatalogSkill, StorageError> {
        let key = skill.key();
        let mut tables = self.tables.write().await;
        let existing = tables
            .catalog_skills
            .get_mut(&key)
            .ok_or_else(|| StorageError::not_found(EntityKind::CatalogSkill, key.clone()))?;

        skill.created_at = existing.created_at;
        skill.updated_at = Utc::now();
        *existing = skill.clone();
        debug!(key = %key, "CatalogSkill updated");
        Ok(skill)
    }

    async fn delete_catalog_skill(&self, skill_id: &str) -> Result<(), StorageError> {
        let key = keys::catalog_skill_key(skill_id);
        match self.tables.write().await.catalog_skills.remove(&key) {
            Some(_) => {
                debug!(key = %key, "CatalogSkill deleted");
                Ok(())
            }
            None => Err(StorageError::not_found(EntityKind::CatalogSkill, key)),
        }
    }

    async fn list_catalog_skills(&self) -> Result<Vec<CatalogSkill>, StorageError> {
        Ok(self.tables.read().await.catalog_skills.values().cloned().collect())
    }
}
