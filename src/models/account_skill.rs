//! Per-account skill record
//!
//! `skill_name` and `category` are copies of the catalog entry taken when the
//! record is created. They are not looked up at read time and go stale if the
//! catalog entry is edited later; see [`crate::sync`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::catalog_skill::CatalogSkill;
use super::validation::{validate_handle, validate_years, ProficiencyLevel, SkillCategory};
use crate::error::StorageError;
use crate::index;
use crate::keys;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSkill {
    pub handle: String,
    pub skill_id: String,
    /// Denormalized from the catalog entry
    pub skill_name: String,
    /// Denormalized from the catalog entry
    pub category: SkillCategory,
    pub proficiency: ProficiencyLevel,
    pub years_of_experience: u32,
    #[serde(default)]
    pub endorsements: u32,
    #[serde(default)]
    pub last_used: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding a skill to an account
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccountSkill {
    pub proficiency: String,
    #[serde(default)]
    pub years_of_experience: i64,
    #[serde(default)]
    pub last_used: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AccountSkill {
    /// Build a record for `handle`, copying display name and category from
    /// the catalog entry.
    pub fn new(
        handle: &str,
        catalog: &CatalogSkill,
        input: NewAccountSkill,
    ) -> Result<Self, StorageError> {
        let now = Utc::now();
        Ok(Self {
            handle: validate_handle(handle)?,
            skill_id: catalog.skill_id.clone(),
            skill_name: catalog.display_name.clone(),
            category: catalog.category,
            proficiency: input.proficiency.parse()?,
            years_of_experience: validate_years(input.years_of_experience)?,
            endorsements: 0,
            last_used: input.last_used,
            notes: input.notes.unwrap_or_default().trim().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn key(&self) -> String {
        keys::account_skill_key(&self.handle, &self.skill_id)
    }

    /// Sort key within the category index:
    /// `<skill>#<level>#<years>#<handle>`
    pub fn category_sort_key(&self) -> String {
        index::category_sort_key(
            &self.skill_id,
            self.proficiency,
            self.years_of_experience,
            &self.handle,
        )
    }

    pub fn set_proficiency(&mut self, level: &str) -> Result<(), StorageError> {
        self.proficiency = level.parse()?;
        Ok(())
    }

    pub fn set_years_of_experience(&mut self, years: i64) -> Result<(), StorageError> {
        self.years_of_experience = validate_years(years)?;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.trim().to_string();
    }

    pub fn set_last_used(&mut self, date: Option<NaiveDate>) {
        self.last_used = date;
    }

    /// Increment the endorsement count. Saturates instead of wrapping.
    pub fn endorse(&mut self) -> u32 {
        self.endorsements = self.endorsements.saturating_add(1);
        self.endorsements
    }

    /// Whether the denormalized copy differs from the catalog entry
    pub fn is_stale(&self, catalog: &CatalogSkill) -> bool {
        self.skill_name != catalog.display_name || self.category != catalog.category
    }

    /// Re-copy the denormalized fields from the catalog entry
    pub fn refresh_from_catalog(&mut self, catalog: &CatalogSkill) {
        self.skill_name = catalog.display_name.clone();
        self.category = catalog.category;
    }
}
