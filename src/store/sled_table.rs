//! Persistent single-table store backed by sled
//!
//! ## Trees
//!
//! - `items` - every record, keyed by primary key, MessagePack encoded
//! - `idx_category` - category index key -> primary key
//! - `idx_skill` - `<skill>#<pk>` -> primary key
//! - `idx_account` - `<handle>#<pk>` -> primary key
//!
//! Creates and updates are conditional puts executed as one transaction over
//! the item tree and all index trees: a create only commits if the key is
//! absent, an update only if it is present. There is no version counter, so
//! two updates racing on the same key are last-writer-wins.
//!
//! List and query operations skip items that fail to decode (and index entries
//! whose item is gone) with a warning, returning the rest.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use sled::transaction::{
    ConflictableTransactionError, TransactionError, TransactionResult, TransactionalTree,
    UnabortableTransactionError,
};
use sled::Transactional;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::index::{self, IndexScan, SkillQuery};
use crate::keys::{self, EntityKind};
use crate::models::{Account, AccountSkill, CatalogSkill, Record};
use crate::repository::{AccountRepository, AccountSkillRepository, CatalogSkillRepository};

const ITEMS_TREE: &str = "items";
const CATEGORY_INDEX_TREE: &str = "idx_category";
const SKILL_INDEX_TREE: &str = "idx_skill";
const ACCOUNT_INDEX_TREE: &str = "idx_account";

/// Configuration for the sled table
#[derive(Debug, Clone)]
pub struct SledTableConfig {
    /// Database directory; `None` opens a temporary database
    pub db_path: Option<PathBuf>,
    /// Page cache size in bytes
    pub cache_capacity: u64,
    /// Background flush interval
    pub flush_every_ms: Option<u64>,
}

impl Default for SledTableConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            cache_capacity: 64 * 1024 * 1024, // 64MB
            flush_every_ms: Some(500),
        }
    }
}

/// Index entries one record contributes
#[derive(Debug, Default)]
struct IndexEntries {
    category: Option<String>,
    skill: Option<String>,
    account: Option<String>,
}

impl IndexEntries {
    fn for_record(record: &Record, primary_key: &str) -> Self {
        match record {
            Record::Account(a) => Self {
                account: Some(index::account_index_key(&a.handle, primary_key)),
                ..Default::default()
            },
            Record::AccountSkill(s) => Self {
                category: Some(index::category_index_key(s)),
                skill: Some(index::skill_index_key(&s.skill_id, primary_key)),
                account: Some(index::account_index_key(&s.handle, primary_key)),
            },
            Record::CatalogSkill(_) => Self::default(),
        }
    }

    fn insert(
        &self,
        trees: (&TransactionalTree, &TransactionalTree, &TransactionalTree),
        primary_key: &str,
    ) -> Result<(), UnabortableTransactionError> {
        let (by_category, by_skill, by_account) = trees;
        let entries = [
            (by_category, &self.category),
            (by_skill, &self.skill),
            (by_account, &self.account),
        ];
        for (tree, entry) in entries {
            if let Some(index_key) = entry {
                tree.insert(index_key.as_bytes(), primary_key.as_bytes())?;
            }
        }
        Ok(())
    }

    fn remove(
        &self,
        trees: (&TransactionalTree, &TransactionalTree, &TransactionalTree),
    ) -> Result<(), UnabortableTransactionError> {
        let (by_category, by_skill, by_account) = trees;
        let entries = [
            (by_category, &self.category),
            (by_skill, &self.skill),
            (by_account, &self.account),
        ];
        for (tree, entry) in entries {
            if let Some(index_key) = entry {
                tree.remove(index_key.as_bytes())?;
            }
        }
        Ok(())
    }
}

fn encode(record: &Record) -> Result<Vec<u8>, StorageError> {
    Ok(rmp_serde::to_vec_named(record)?)
}

fn decode(bytes: &[u8]) -> Result<Record, StorageError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

fn decode_account_skill(bytes: &[u8]) -> Result<AccountSkill, StorageError> {
    match decode(bytes)? {
        Record::AccountSkill(skill) => Ok(skill),
        other => Err(StorageError::Internal(format!(
            "expected AccountSkill, found {}",
            other.kind()
        ))),
    }
}

fn abort<T>(error: StorageError) -> Result<T, ConflictableTransactionError<StorageError>> {
    Err(ConflictableTransactionError::Abort(error))
}

/// Unwrap a transaction result, attaching operation context
fn finish<T>(
    result: TransactionResult<T, StorageError>,
    operation: &'static str,
    key: &str,
) -> Result<T, StorageError> {
    result.map_err(|e| match e {
        TransactionError::Abort(e) => e.context(operation, key),
        TransactionError::Storage(e) => StorageError::Database(e).context(operation, key),
    })
}

/// Single-table store backed by sled
pub struct SledStore {
    db: sled::Db,
    items: sled::Tree,
    by_category: sled::Tree,
    by_skill: sled::Tree,
    by_account: sled::Tree,
}

impl SledStore {
    /// Open or create the table
    pub async fn open(config: SledTableConfig) -> Result<Self, StorageError> {
        let mut sled_config = sled::Config::new()
            .cache_capacity(config.cache_capacity)
            .mode(sled::Mode::HighThroughput)
            .flush_every_ms(config.flush_every_ms);

        sled_config = match &config.db_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                sled_config.path(path)
            }
            None => sled_config.temporary(true),
        };

        let db = sled_config.open()?;
        let store = Self {
            items: db.open_tree(ITEMS_TREE)?,
            by_category: db.open_tree(CATEGORY_INDEX_TREE)?,
            by_skill: db.open_tree(SKILL_INDEX_TREE)?,
            by_account: db.open_tree(ACCOUNT_INDEX_TREE)?,
            db,
        };

        match &config.db_path {
            Some(path) => info!(path = %path.display(), items = store.items.len(), "Sled table opened"),
            None => info!("Temporary sled table opened"),
        }
        Ok(store)
    }

    /// Open a throwaway database that is removed on drop
    pub async fn temporary() -> Result<Self, StorageError> {
        Self::open(SledTableConfig::default()).await
    }

    /// Item tree followed by the three index trees
    fn trees(&self) -> (&sled::Tree, &sled::Tree, &sled::Tree, &sled::Tree) {
        (&self.items, &self.by_category, &self.by_skill, &self.by_account)
    }

    /// Flush pending writes to disk
    pub async fn flush(&self) -> Result<(), StorageError> {
        let bytes = self.db.flush_async().await?;
        debug!(bytes, "Sled table flushed");
        Ok(())
    }

    /// Number of items in the table
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_record(&self, key: &str, operation: &'static str) -> Result<Option<Record>, StorageError> {
        let value = self
            .items
            .get(key.as_bytes())
            .map_err(|e| StorageError::Database(e).context(operation, key))?;
        value
            .map(|bytes| decode(&bytes))
            .transpose()
            .map_err(|e| e.context(operation, key))
    }

    /// Conditional put: commit only if nothing exists at the record's key
    fn insert_new(&self, mut record: Record, operation: &'static str) -> Result<Record, StorageError> {
        let key = record.key();
        let kind = record.kind();
        let now = Utc::now();
        record.stamp(now, now);

        let bytes = encode(&record).map_err(|e| e.context(operation, &key))?;
        let entries = IndexEntries::for_record(&record, &key);

        let result: TransactionResult<(), StorageError> = self.trees().transaction(|(items, by_category, by_skill, by_account)| {
            if items.get(key.as_bytes())?.is_some() {
                return abort(StorageError::already_exists(kind, key.clone()));
            }
            items.insert(key.as_bytes(), bytes.as_slice())?;
            entries.insert((by_category, by_skill, by_account), &key)?;
            Ok(())
        });
        finish(result, operation, &key)?;

        debug!(key = %key, entity = %kind, "Item created");
        Ok(record)
    }

    /// Conditional put: commit only if an item already exists at the key.
    /// Keeps the stored `created_at` and moves index entries if the indexed
    /// fields changed.
    fn replace_existing(&self, record: Record, operation: &'static str) -> Result<Record, StorageError> {
        let key = record.key();
        let kind = record.kind();
        let updated_at = Utc::now();

        let result: TransactionResult<Record, StorageError> = self.trees().transaction(|(items, by_category, by_skill, by_account)| {
            let Some(old_bytes) = items.get(key.as_bytes())? else {
                return abort(StorageError::not_found(kind, key.clone()));
            };
            let old = match decode(&old_bytes) {
                Ok(old) => old,
                Err(e) => return abort(e),
            };

            let mut next = record.clone();
            next.stamp(old.created_at(), updated_at);
            let bytes = match encode(&next) {
                Ok(bytes) => bytes,
                Err(e) => return abort(e),
            };

            IndexEntries::for_record(&old, &key).remove((by_category, by_skill, by_account))?;
            items.insert(key.as_bytes(), bytes)?;
            IndexEntries::for_record(&next, &key).insert((by_category, by_skill, by_account), &key)?;
            Ok(next)
        });
        let stored = finish(result, operation, &key)?;

        debug!(key = %key, entity = %kind, "Item updated");
        Ok(stored)
    }

    /// Remove an existing item and its index entries
    fn remove_existing(&self, kind: EntityKind, key: &str, operation: &'static str) -> Result<(), StorageError> {
        let result: TransactionResult<(), StorageError> = self.trees().transaction(|(items, by_category, by_skill, by_account)| {
            let Some(old_bytes) = items.remove(key.as_bytes())? else {
                return abort(StorageError::not_found(kind, key));
            };
            let old = match decode(&old_bytes) {
                Ok(old) => old,
                Err(e) => return abort(e),
            };
            IndexEntries::for_record(&old, key).remove((by_category, by_skill, by_account))?;
            Ok(())
        });
        finish(result, operation, key)?;

        debug!(key = %key, entity = %kind, "Item deleted");
        Ok(())
    }

    /// Scan every item of one kind from the item tree
    fn scan_kind(&self, kind: EntityKind, operation: &'static str) -> Result<Vec<Record>, StorageError> {
        let prefix = kind.key_prefix();
        let mut records = Vec::new();

        for item in self.items.scan_prefix(prefix.as_bytes()) {
            let (key, value) = item.map_err(|e| StorageError::Database(e).context(operation, &prefix))?;
            match decode(&value) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    key = %String::from_utf8_lossy(&key),
                    error = %e,
                    operation,
                    "Skipping undecodable item"
                ),
            }
        }

        Ok(records)
    }

    /// Walk an index and resolve each entry to its item
    fn scan_index(
        &self,
        tree: &sled::Tree,
        scan: &IndexScan,
        operation: &'static str,
    ) -> Result<Vec<Record>, StorageError> {
        let (iter, label) = match scan {
            IndexScan::Prefix(prefix) => (tree.scan_prefix(prefix.as_bytes()), prefix.as_str()),
            IndexScan::Range { start, end } => {
                (tree.range(start.as_bytes()..end.as_bytes()), start.as_str())
            }
        };

        let mut records = Vec::new();
        for item in iter {
            let (index_key, primary_key) =
                item.map_err(|e| StorageError::Database(e).context(operation, label))?;
            let value = self
                .items
                .get(&primary_key)
                .map_err(|e| StorageError::Database(e).context(operation, label))?;

            match value {
                Some(bytes) => match decode(&bytes) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!(
                        key = %String::from_utf8_lossy(&primary_key),
                        error = %e,
                        operation,
                        "Skipping undecodable item"
                    ),
                },
                None => warn!(
                    index_key = %String::from_utf8_lossy(&index_key),
                    operation,
                    "Skipping dangling index entry"
                ),
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl AccountRepository for SledStore {
    async fn create_account(&self, account: Account) -> Result<Account, StorageError> {
        let record = self.insert_new(account.into(), "create_account")?;
        record
            .into_account()
            .ok_or_else(|| StorageError::Internal("created record is not an Account".into()))
    }

    async fn get_account(&self, handle: &str) -> Result<Account, StorageError> {
        let key = keys::account_key(handle);
        self.get_record(&key, "get_account")?
            .and_then(Record::into_account)
            .ok_or_else(|| StorageError::not_found(EntityKind::Account, key))
    }

    async fn update_account(&self, account: Account) -> Result<Account, StorageError> {
        let record = self.replace_existing(account.into(), "update_account")?;
        record
            .into_account()
            .ok_or_else(|| StorageError::Internal("updated record is not an Account".into()))
    }

    async fn account_exists(&self, handle: &str) -> Result<bool, StorageError> {
        let key = keys::account_key(handle);
        self.items
            .contains_key(key.as_bytes())
            .map_err(|e| StorageError::Database(e).context("account_exists", &key))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self
            .scan_kind(EntityKind::Account, "list_accounts")?
            .into_iter()
            .filter_map(Record::into_account)
            .collect())
    }

    async fn account_records(&self, handle: &str) -> Result<Vec<Record>, StorageError> {
        let scan = IndexScan::Prefix(index::account_index_prefix(handle));
        self.scan_index(&self.by_account, &scan, "account_records")
    }
}

#[async_trait]
impl AccountSkillRepository for SledStore {
    async fn create_account_skill(&self, skill: AccountSkill) -> Result<AccountSkill, StorageError> {
        let record = self.insert_new(skill.into(), "create_account_skill")?;
        record
            .into_account_skill()
            .ok_or_else(|| StorageError::Internal("created record is not an AccountSkill".into()))
    }

    async fn get_account_skill(&self, handle: &str, skill_id: &str) -> Result<AccountSkill, StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        self.get_record(&key, "get_account_skill")?
            .and_then(Record::into_account_skill)
            .ok_or_else(|| StorageError::not_found(EntityKind::AccountSkill, key))
    }

    async fn update_account_skill(&self, skill: AccountSkill) -> Result<AccountSkill, StorageError> {
        let record = self.replace_existing(skill.into(), "update_account_skill")?;
        record
            .into_account_skill()
            .ok_or_else(|| StorageError::Internal("updated record is not an AccountSkill".into()))
    }

    async fn delete_account_skill(&self, handle: &str, skill_id: &str) -> Result<(), StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        self.remove_existing(EntityKind::AccountSkill, &key, "delete_account_skill")
    }

    async fn endorse_account_skill(&self, handle: &str, skill_id: &str) -> Result<AccountSkill, StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        let updated_at = Utc::now();

        let result: TransactionResult<AccountSkill, StorageError> = self.items.transaction(|items| {
            let Some(bytes) = items.get(key.as_bytes())? else {
                return abort(StorageError::not_found(EntityKind::AccountSkill, key.clone()));
            };
            let mut skill = match decode_account_skill(&bytes) {
                Ok(skill) => skill,
                Err(e) => return abort(e),
            };

            skill.endorse();
            skill.updated_at = updated_at;
            let encoded = match encode(&Record::AccountSkill(skill.clone())) {
                Ok(encoded) => encoded,
                Err(e) => return abort(e),
            };
            items.insert(key.as_bytes(), encoded)?;
            Ok(skill)
        });
        let skill = finish(result, "endorse_account_skill", &key)?;

        debug!(key = %key, endorsements = skill.endorsements, "AccountSkill endorsed");
        Ok(skill)
    }

    async fn refresh_denormalized(
        &self,
        handle: &str,
        skill_id: &str,
        catalog: &CatalogSkill,
    ) -> Result<Option<AccountSkill>, StorageError> {
        let key = keys::account_skill_key(handle, skill_id);
        let updated_at = Utc::now();

        // Read and rewrite in one transaction so concurrent endorsements survive
        let result: TransactionResult<Option<AccountSkill>, StorageError> =
            self.trees().transaction(|(items, by_category, by_skill, by_account)| {
                let Some(bytes) = items.get(key.as_bytes())? else {
                    return abort(StorageError::not_found(EntityKind::AccountSkill, key.clone()));
                };
                let current = match decode_account_skill(&bytes) {
                    Ok(skill) => skill,
                    Err(e) => return abort(e),
                };
                if !current.is_stale(catalog) {
                    return Ok(None);
                }

                let mut next = current.clone();
                next.refresh_from_catalog(catalog);
                next.updated_at = updated_at;
                let old_record = Record::AccountSkill(current);
                let next_record = Record::AccountSkill(next.clone());
                let encoded = match encode(&next_record) {
                    Ok(encoded) => encoded,
                    Err(e) => return abort(e),
                };

                IndexEntries::for_record(&old_record, &key).remove((by_category, by_skill, by_account))?;
                items.insert(key.as_bytes(), encoded)?;
                IndexEntries::for_record(&next_record, &key).insert((by_category, by_skill, by_account), &key)?;
                Ok(Some(next))
            });
        let refreshed = finish(result, "refresh_denormalized", &key)?;

        if refreshed.is_some() {
            debug!(key = %key, "Denormalized copy refreshed");
        }
        Ok(refreshed)
    }

    async fn list_account_skills(&self, handle: &str) -> Result<Vec<AccountSkill>, StorageError> {
        let scan = IndexScan::Prefix(index::account_index_prefix(handle));
        Ok(self
            .scan_index(&self.by_account, &scan, "list_account_skills")?
            .into_iter()
            .filter_map(Record::into_account_skill)
            .collect())
    }

    async fn find_account_skills(&self, query: &SkillQuery) -> Result<Vec<AccountSkill>, StorageError> {
        let scan = query.scan()?;
        // Items are read after their index entry; drop any that changed in between
        Ok(self
            .scan_index(&self.by_category, &scan, "find_account_skills")?
            .into_iter()
            .filter_map(Record::into_account_skill)
            .filter(|skill| query.matches(skill))
            .collect())
    }

    async fn list_by_skill_id(&self, skill_id: &str) -> Result<Vec<AccountSkill>, StorageError> {
        let scan = IndexScan::Prefix(index::skill_index_prefix(skill_id));
        Ok(self
            .scan_index(&self.by_skill, &scan, "list_by_skill_id")?
            .into_iter()
            .filter_map(Record::into_account_skill)
            .collect())
    }
}

#[async_trait]
impl CatalogSkillRepository for SledStore {
    async fn create_catalog_skill(&self, skill: CatalogSkill) -> Result<CatalogSkill, StorageError> {
        let record = self.insert_new(skill.into(), "create_catalog_skill")?;
        record
            .into_catalog_skill()
            .ok_or_else(|| StorageError::Internal("created record is not a CatalogSkill".into()))
    }

    async fn get_catalog_skill(&self, skill_id: &str) -> Result<CatalogSkill, StorageError> {
        let key = keys::catalog_skill_key(skill_id);
        self.get_record(&key, "get_catalog_skill")?
            .and_then(Record::into_catalog_skill)
            .ok_or_else(|| StorageError::not_found(EntityKind::CatalogSkill, key))
    }

    async fn update_catalog_skill(&self, skill: CatalogSkill) -> Result<CatalogSkill, StorageError> {
        let record = self.replace_existing(skill.into(), "update_catalog_skill")?;
        record
            .into_catalog_skill()
            .ok_or_else(|| StorageError::Internal("updated record is not a CatalogSkill".into()))
    }

    async fn delete_catalog_skill(&self, skill_id: &str) -> Result<(), StorageError> {
        let key = keys::catalog_skill_key(skill_id);
        self.remove_existing(EntityKind::CatalogSkill, &key, "delete_catalog_skill")
    }

    async fn list_catalog_skills(&self) -> Result<Vec<CatalogSkill>, StorageError> {
        Ok(self
            .scan_kind(EntityKind::CatalogSkill, "list_catalog_skills")?
            .into_iter()
            .filter_map(Record::into_catalog_skill)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewAccount, NewAccountSkill, NewCatalogSkill, ProficiencyLevel, SkillCategory};
    use tempfile::TempDir;

    fn account(handle: &str) -> Account {
        Account::new(NewAccount {
            handle: handle.into(),
            display_name: handle.to_uppercase(),
            ..Default::default()
        })
        .unwrap()
    }

    fn go_skill(handle: &str, level: &str, years: i64) -> AccountSkill {
        let catalog = CatalogSkill::new(NewCatalogSkill {
            skill_id: "go".into(),
            display_name: "Go".into(),
            category: "Programming".into(),
            ..Default::default()
        })
        .unwrap();
        AccountSkill::new(
            handle,
            &catalog,
            NewAccountSkill {
                proficiency: level.into(),
                years_of_experience: years,
                last_used: None,
                notes: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_records_carry_entity_tag() {
        let bytes = encode(&Record::Account(account("jane"))).unwrap();
        let value: serde_json::Value = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(value["entity_type"], "Account");
        assert_eq!(value["handle"], "jane");
    }

    #[tokio::test]
    async fn test_list_skips_undecodable_items() {
        let store = SledStore::temporary().await.unwrap();
        store.create_account(account("jane")).await.unwrap();
        store.create_account(account("user1")).await.unwrap();

        // Corrupt item sharing the Account prefix
        store
            .items
            .insert(keys::account_key("broken").as_bytes(), &b"\xc1not msgpack"[..])
            .unwrap();

        let accounts = store.list_accounts().await.unwrap();
        let handles: Vec<_> = accounts.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(handles, vec!["jane", "user1"]);

        // A direct get still reports the failure
        let err = store.get_account("broken").await.unwrap_err();
        assert!(matches!(err, StorageError::Operation { operation: "get_account", .. }));
    }

    #[tokio::test]
    async fn test_index_scan_skips_dangling_entries() {
        let store = SledStore::temporary().await.unwrap();
        store.create_account_skill(go_skill("jane", "Advanced", 6)).await.unwrap();

        let orphan = go_skill("ghost", "Advanced", 2);
        store
            .by_category
            .insert(index::category_index_key(&orphan).as_bytes(), orphan.key().as_bytes())
            .unwrap();

        let found = store
            .list_by_skill_level(SkillCategory::Programming, "go", ProficiencyLevel::Advanced)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].handle, "jane");
    }

    #[tokio::test]
    async fn test_update_moves_index_entries() {
        let store = SledStore::temporary().await.unwrap();
        let mut skill = store
            .create_account_skill(go_skill("jane", "Intermediate", 3))
            .await
            .unwrap();

        skill.set_proficiency("Expert").unwrap();
        skill.set_years_of_experience(7).unwrap();
        store.update_account_skill(skill).await.unwrap();

        assert_eq!(store.by_category.len(), 1);
        let keys: Vec<String> = store
            .by_category
            .iter()
            .keys()
            .map(|k| String::from_utf8(k.unwrap().to_vec()).unwrap())
            .collect();
        assert_eq!(keys, vec!["Programming#go#Expert#007#jane".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_removes_index_entries() {
        let store = SledStore::temporary().await.unwrap();
        store.create_account(account("jane")).await.unwrap();
        store.create_account_skill(go_skill("jane", "Advanced", 6)).await.unwrap();
        assert_eq!(store.by_account.len(), 2);

        store.delete_account_skill("jane", "go").await.unwrap();
        assert_eq!(store.by_category.len(), 0);
        assert_eq!(store.by_skill.len(), 0);
        assert_eq!(store.by_account.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_reopen_preserves_items() {
        let temp_dir = TempDir::new().unwrap();
        let config = SledTableConfig {
            db_path: Some(temp_dir.path().join("directory.sled")),
            flush_every_ms: None,
            ..Default::default()
        };

        {
            let store = SledStore::open(config.clone()).await.unwrap();
            store.create_account(account("jane")).await.unwrap();
            store.create_account_skill(go_skill("jane", "Expert", 10)).await.unwrap();
            store.flush().await.unwrap();
        }

        let store = SledStore::open(config).await.unwrap();
        assert!(store.account_exists("Jane").await.unwrap());
        let found = store
            .list_by_skill_level(SkillCategory::Programming, "go", ProficiencyLevel::Expert)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].years_of_experience, 10);
    }
}
