//! Canonical skill catalog entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_skill_id, validate_skill_name, validate_tags, SkillCategory};
use crate::error::StorageError;
use crate::keys;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSkill {
    /// Immutable identifier, `[a-z0-9-]{1,50}`
    pub skill_id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a catalog entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCatalogSkill {
    pub skill_id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogSkill {
    pub fn new(input: NewCatalogSkill) -> Result<Self, StorageError> {
        let now = Utc::now();
        Ok(Self {
            skill_id: validate_skill_id(&input.skill_id)?,
            display_name: validate_skill_name(&input.display_name)?,
            description: input.description.trim().to_string(),
            category: input.category.parse()?,
            tags: validate_tags(&input.tags)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn key(&self) -> String {
        keys::catalog_skill_key(&self.skill_id)
    }

    pub fn set_display_name(&mut self, name: &str) -> Result<(), StorageError> {
        self.display_name = validate_skill_name(name)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), StorageError> {
        self.category = category.parse()?;
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub fn set_tags(&mut self, tags: &[String]) -> Result<(), StorageError> {
        self.tags = validate_tags(tags)?;
        Ok(())
    }
}
