//! Domain entities stored in the single table
//!
//! ## Entities
//!
//! - [`Account`] - profile keyed by case-folded handle
//! - [`CatalogSkill`] - canonical skill metadata keyed by skill id
//! - [`AccountSkill`] - one account's record of one skill, carrying a
//!   denormalized copy of the catalog display name and category
//!
//! Constructors and setters validate every field, so the stores never
//! raise `InvalidField` themselves.

pub mod account;
pub mod account_skill;
pub mod catalog_skill;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::EntityKind;

pub use account::{Account, NewAccount};
pub use account_skill::{AccountSkill, NewAccountSkill};
pub use catalog_skill::{CatalogSkill, NewCatalogSkill};
pub use validation::{ProficiencyLevel, SkillCategory};

/// One item in the single table, tagged with its entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type")]
pub enum Record {
    Account(Account),
    AccountSkill(AccountSkill),
    CatalogSkill(CatalogSkill),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Account(_) => EntityKind::Account,
            Self::AccountSkill(_) => EntityKind::AccountSkill,
            Self::CatalogSkill(_) => EntityKind::CatalogSkill,
        }
    }

    /// Primary key derived from the record's business fields
    pub fn key(&self) -> String {
        match self {
            Self::Account(a) => a.key(),
            Self::AccountSkill(s) => s.key(),
            Self::CatalogSkill(c) => c.key(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Account(a) => a.created_at,
            Self::AccountSkill(s) => s.created_at,
            Self::CatalogSkill(c) => c.created_at,
        }
    }

    /// Overwrite both timestamps before persisting
    pub fn stamp(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        let (created, updated) = match self {
            Self::Account(a) => (&mut a.created_at, &mut a.updated_at),
            Self::AccountSkill(s) => (&mut s.created_at, &mut s.updated_at),
            Self::CatalogSkill(c) => (&mut c.created_at, &mut c.updated_at),
        };
        *created = created_at;
        *updated = updated_at;
    }

    pub fn into_account(self) -> Option<Account> {
        match self {
            Self::Account(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_account_skill(self) -> Option<AccountSkill> {
        match self {
            Self::AccountSkill(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_catalog_skill(self) -> Option<CatalogSkill> {
        match self {
            Self::CatalogSkill(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Account> for Record {
    fn from(a: Account) -> Self {
        Self::Account(a)
    }
}

impl From<AccountSkill> for Record {
    fn from(s: AccountSkill) -> Self {
        Self::AccountSkill(s)
    }
}

impl From<CatalogSkill> for Record {
    fn from(c: CatalogSkill) -> Self {
        Self::CatalogSkill(c)
    }
}
