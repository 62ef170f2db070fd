//! Field enumerations and validation rules shared by the domain entities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub const HANDLE_MIN_LEN: usize = 3;
pub const HANDLE_MAX_LEN: usize = 32;
pub const SKILL_ID_MAX_LEN: usize = 50;
pub const SKILL_NAME_MIN_LEN: usize = 2;
pub const SKILL_NAME_MAX_LEN: usize = 100;
pub const DISPLAY_NAME_MAX_LEN: usize = 100;
pub const MAX_YEARS_OF_EXPERIENCE: u32 = 100;
pub const MAX_TAGS: usize = 20;
pub const TAG_MAX_LEN: usize = 30;

/// How well an account knows a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub const ALL: [Self; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                StorageError::invalid(
                    "proficiency_level",
                    format!("'{trimmed}' is not one of Beginner, Intermediate, Advanced, Expert"),
                )
            })
    }
}

/// Fixed catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Programming,
    Frontend,
    Backend,
    DevOps,
    Cloud,
    Database,
    DataScience,
    Security,
    Design,
    Management,
    Communication,
    Languages,
    Other,
}

impl SkillCategory {
    pub const ALL: [Self; 13] = [
        Self::Programming,
        Self::Frontend,
        Self::Backend,
        Self::DevOps,
        Self::Cloud,
        Self::Database,
        Self::DataScience,
        Self::Security,
        Self::Design,
        Self::Management,
        Self::Communication,
        Self::Languages,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Programming => "Programming",
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::DevOps => "DevOps",
            Self::Cloud => "Cloud",
            Self::Database => "Database",
            Self::DataScience => "DataScience",
            Self::Security => "Security",
            Self::Design => "Design",
            Self::Management => "Management",
            Self::Communication => "Communication",
            Self::Languages => "Languages",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StorageError::invalid("category", format!("unknown category '{trimmed}'")))
    }
}

/// Case-fold and validate an account handle
pub fn validate_handle(raw: &str) -> Result<String, StorageError> {
    let handle = raw.trim().to_lowercase();
    let len = handle.chars().count();
    if !(HANDLE_MIN_LEN..=HANDLE_MAX_LEN).contains(&len) {
        return Err(StorageError::invalid(
            "handle",
            format!("must be {HANDLE_MIN_LEN}-{HANDLE_MAX_LEN} characters, got {len}"),
        ));
    }
    if !handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(StorageError::invalid(
            "handle",
            format!("'{handle}' may only contain letters, digits, '_', '.' and '-'"),
        ));
    }
    Ok(handle)
}

/// Case-fold and validate a catalog skill identifier
pub fn validate_skill_id(raw: &str) -> Result<String, StorageError> {
    let skill_id = raw.trim().to_lowercase();
    if skill_id.is_empty() || skill_id.len() > SKILL_ID_MAX_LEN {
        return Err(StorageError::invalid(
            "skill_id",
            format!("must be 1-{SKILL_ID_MAX_LEN} characters"),
        ));
    }
    if !skill_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(StorageError::invalid(
            "skill_id",
            format!("'{skill_id}' may only contain lowercase letters, digits and '-'"),
        ));
    }
    if skill_id.starts_with('-') {
        return Err(StorageError::invalid("skill_id", "must not start with '-'"));
    }
    Ok(skill_id)
}

/// Validate a skill display name (2-100 characters after trimming)
pub fn validate_skill_name(raw: &str) -> Result<String, StorageError> {
    let name = raw.trim();
    let len = name.chars().count();
    if !(SKILL_NAME_MIN_LEN..=SKILL_NAME_MAX_LEN).contains(&len) {
        return Err(StorageError::invalid(
            "skill_name",
            format!("must be {SKILL_NAME_MIN_LEN}-{SKILL_NAME_MAX_LEN} characters, got {len}"),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_display_name(raw: &str) -> Result<String, StorageError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > DISPLAY_NAME_MAX_LEN {
        return Err(StorageError::invalid(
            "display_name",
            format!("must be 1-{DISPLAY_NAME_MAX_LEN} characters, got {len}"),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_email(raw: &str) -> Result<String, StorageError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Ok(email)
        }
        _ => Err(StorageError::invalid("email", format!("'{email}' is not an email address"))),
    }
}

pub fn validate_years(years: i64) -> Result<u32, StorageError> {
    if years < 0 {
        return Err(StorageError::invalid(
            "years_of_experience",
            format!("must not be negative, got {years}"),
        ));
    }
    if years > i64::from(MAX_YEARS_OF_EXPERIENCE) {
        return Err(StorageError::invalid(
            "years_of_experience",
            format!("must be at most {MAX_YEARS_OF_EXPERIENCE}, got {years}"),
        ));
    }
    Ok(years as u32)
}

/// Lower-case, de-duplicate and bound catalog tags
pub fn validate_tags(raw: &[String]) -> Result<Vec<String>, StorageError> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || tag.chars().count() > TAG_MAX_LEN {
            return Err(StorageError::invalid(
                "tags",
                format!("each tag must be 1-{TAG_MAX_LEN} characters"),
            ));
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.len() > MAX_TAGS {
        return Err(StorageError::invalid("tags", format!("at most {MAX_TAGS} tags")));
    }
    Ok(tags)
}
