//! Secondary index layout and query routing
//!
//! Three indexes are maintained over the single table:
//!
//! | Index | Key | Answers |
//! |-------|-----|---------|
//! | category | `<Category>#<skill>#<Level>#<years>#<handle>` | who knows skill X (at level Y, with N..M years) |
//! | skill | `<skill>#<primary key>` | every AccountSkill referencing a catalog entry |
//! | account | `<handle>#<primary key>` | profile plus skills of one account |
//!
//! The category index sort components are ordered so that one index serves
//! four query shapes: category, category+skill, category+skill+level and
//! category+skill+level with a years range. Years are zero-padded to three
//! digits so lexicographic order matches numeric order.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::keys::{normalize, KEY_SEPARATOR};
use crate::models::validation::{validate_skill_id, MAX_YEARS_OF_EXPERIENCE};
use crate::models::{AccountSkill, ProficiencyLevel, SkillCategory};

/// Sort key within the category partition
pub fn category_sort_key(
    skill_id: &str,
    level: ProficiencyLevel,
    years: u32,
    handle: &str,
) -> String {
    format!(
        "{skill}{sep}{level}{sep}{years:03}{sep}{handle}",
        skill = normalize(skill_id),
        sep = KEY_SEPARATOR,
        level = level,
        years = years,
        handle = normalize(handle),
    )
}

/// Full category index key for a record
pub fn category_index_key(skill: &AccountSkill) -> String {
    format!("{}{}{}", skill.category, KEY_SEPARATOR, skill.category_sort_key())
}

pub fn skill_index_prefix(skill_id: &str) -> String {
    format!("{}{}", normalize(skill_id), KEY_SEPARATOR)
}

pub fn skill_index_key(skill_id: &str, primary_key: &str) -> String {
    format!("{}{}", skill_index_prefix(skill_id), primary_key)
}

pub fn account_index_prefix(handle: &str) -> String {
    format!("{}{}", normalize(handle), KEY_SEPARATOR)
}

pub fn account_index_key(handle: &str, primary_key: &str) -> String {
    format!("{}{}", account_index_prefix(handle), primary_key)
}

/// Inclusive years-of-experience bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsRange {
    pub min: u32,
    pub max: u32,
}

/// Which of the four category index shapes a query uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    Category,
    Skill,
    SkillLevel,
    SkillLevelYears,
}

/// How a store walks the category index for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexScan {
    /// All keys starting with the prefix
    Prefix(String),
    /// Keys in `start..end`
    Range { start: String, end: String },
}

/// Filter over the category index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillQuery {
    pub category: SkillCategory,
    pub skill_id: Option<String>,
    pub level: Option<ProficiencyLevel>,
    pub years: Option<YearsRange>,
}

impl SkillQuery {
    pub fn new(category: SkillCategory) -> Self {
        Self {
            category,
            skill_id: None,
            level: None,
            years: None,
        }
    }

    pub fn with_skill(mut self, skill_id: &str) -> Self {
        self.skill_id = Some(normalize(skill_id));
        self
    }

    pub fn with_level(mut self, level: ProficiencyLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_years(mut self, min: u32, max: u32) -> Self {
        self.years = Some(YearsRange { min, max });
        self
    }

    /// Resolve the query shape, rejecting filters that skip a sort component
    pub fn shape(&self) -> Result<QueryShape, StorageError> {
        if let Some(skill_id) = &self.skill_id {
            validate_skill_id(skill_id).map_err(|e| StorageError::InvalidQuery(e.to_string()))?;
        }
        if let Some(YearsRange { min, max }) = self.years {
            if min > max || max > MAX_YEARS_OF_EXPERIENCE {
                return Err(StorageError::InvalidQuery(format!(
                    "years range {min}..={max} must satisfy min <= max <= {MAX_YEARS_OF_EXPERIENCE}"
                )));
            }
        }

        match (&self.skill_id, self.level, self.years) {
            (None, None, None) => Ok(QueryShape::Category),
            (Some(_), None, None) => Ok(QueryShape::Skill),
            (Some(_), Some(_), None) => Ok(QueryShape::SkillLevel),
            (Some(_), Some(_), Some(_)) => Ok(QueryShape::SkillLevelYears),
            (None, Some(_), _) => Err(StorageError::InvalidQuery(
                "a proficiency level filter requires a skill id".into(),
            )),
            (_, None, Some(_)) => Err(StorageError::InvalidQuery(
                "a years range requires a skill id and a proficiency level".into(),
            )),
        }
    }

    /// Key bounds for walking the category index
    pub fn scan(&self) -> Result<IndexScan, StorageError> {
        let mut prefix = format!("{}{}", self.category, KEY_SEPARATOR);
        let shape = self.shape()?;

        if let Some(skill_id) = &self.skill_id {
            prefix.push_str(skill_id);
            prefix.push(KEY_SEPARATOR);
        }
        if let Some(level) = self.level {
            prefix.push_str(level.as_str());
            prefix.push(KEY_SEPARATOR);
        }

        match (shape, self.years) {
            (QueryShape::SkillLevelYears, Some(YearsRange { min, max })) => Ok(IndexScan::Range {
                start: format!("{prefix}{min:03}{KEY_SEPARATOR}"),
                end: format!("{prefix}{:03}{KEY_SEPARATOR}", max + 1),
            }),
            _ => Ok(IndexScan::Prefix(prefix)),
        }
    }

    /// Whether a record would be returned by this query
    pub fn matches(&self, skill: &AccountSkill) -> bool {
        if skill.category != self.category {
            return false;
        }
        if let Some(skill_id) = &self.skill_id {
            if normalize(&skill.skill_id) != *skill_id {
                return false;
            }
        }
        if let Some(level) = self.level {
            if skill.proficiency != level {
                return false;
            }
        }
        if let Some(YearsRange { min, max }) = self.years {
            if !(min..=max).contains(&skill.years_of_experience) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_sort_key_layout() {
        assert_eq!(
            category_sort_key("Go", ProficiencyLevel::Advanced, 6, "Jane"),
            "go#Advanced#006#jane"
        );
    }

    #[test]
    fn test_scan_shapes() {
        let q = SkillQuery::new(SkillCategory::Programming);
        assert_eq!(q.shape().unwrap(), QueryShape::Category);
        assert_eq!(q.scan().unwrap(), IndexScan::Prefix("Programming#".into()));

        let q = q.with_skill("Go");
        assert_eq!(q.scan().unwrap(), IndexScan::Prefix("Programming#go#".into()));

        let q = q.with_level(ProficiencyLevel::Advanced);
        assert_eq!(
            q.scan().unwrap(),
            IndexScan::Prefix("Programming#go#Advanced#".into())
        );

        let q = q.with_years(3, 9);
        assert_eq!(q.shape().unwrap(), QueryShape::SkillLevelYears);
        assert_eq!(
            q.scan().unwrap(),
            IndexScan::Range {
                start: "Programming#go#Advanced#003#".into(),
                end: "Programming#go#Advanced#010#".into(),
            }
        );
    }

    #[test]
    fn test_skill_prefix_does_not_match_longer_ids() {
        let IndexScan::Prefix(prefix) = SkillQuery::new(SkillCategory::Programming)
            .with_skill("go")
            .scan()
            .unwrap()
        else {
            panic!("expected prefix scan");
        };
        assert!(!"Programming#go-kit#Expert#002#jane".starts_with(&prefix));
        assert!("Programming#go#Expert#002#jane".starts_with(&prefix));
    }

    #[test]
    fn test_invalid_shapes() {
        let level_only = SkillQuery::new(SkillCategory::Programming).with_level(ProficiencyLevel::Expert);
        assert_eq!(level_only.shape().unwrap_err().kind(), ErrorKind::InvalidQuery);

        let years_without_level = SkillQuery::new(SkillCategory::Programming)
            .with_skill("go")
            .with_years(1, 2);
        assert!(years_without_level.shape().is_err());

        let inverted = SkillQuery::new(SkillCategory::Programming)
            .with_skill("go")
            .with_level(ProficiencyLevel::Expert)
            .with_years(5, 2);
        assert!(inverted.scan().is_err());

        let bad_id = SkillQuery::new(SkillCategory::Programming).with_skill("c++");
        assert!(bad_id.shape().is_err());
    }

    #[test]
    fn test_range_bounds_order_numerically() {
        let IndexScan::Range { start, end } = SkillQuery::new(SkillCategory::Programming)
            .with_skill("go")
            .with_level(ProficiencyLevel::Expert)
            .with_years(2, 10)
            .scan()
            .unwrap()
        else {
            panic!("expected range scan");
        };
        let inside = ["Programming#go#Expert#002#a", "Programming#go#Expert#010#zz"];
        let outside = ["Programming#go#Expert#001#a", "Programming#go#Expert#011#a"];
        for key in inside {
            assert!(key >= start.as_str() && key < end.as_str(), "{key} should be in range");
        }
        for key in outside {
            assert!(!(key >= start.as_str() && key < end.as_str()), "{key} should be out of range");
        }
    }
}
