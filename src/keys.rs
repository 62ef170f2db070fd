//! Entity key codec
//!
//! All three entity kinds share one keyspace. Every primary key starts with an
//! entity tag, followed by the case-folded business identifiers:
//!
//! ```text
//! ACCOUNT#<handle>
//! ACCOUNTSKILL#<handle>#<skill-id>
//! CATALOGSKILL#<skill-id>
//! ```
//!
//! Components are validated before they reach the codec and can never contain
//! the separator, so keys of different kinds never collide.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the tag and each key component
pub const KEY_SEPARATOR: char = '#';

/// The three entity kinds stored in the single table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Account,
    AccountSkill,
    CatalogSkill,
}

impl EntityKind {
    /// Key prefix tag for this kind
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT",
            Self::AccountSkill => "ACCOUNTSKILL",
            Self::CatalogSkill => "CATALOGSKILL",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ACCOUNT" => Some(Self::Account),
            "ACCOUNTSKILL" => Some(Self::AccountSkill),
            "CATALOGSKILL" => Some(Self::CatalogSkill),
            _ => None,
        }
    }

    /// Scan prefix covering every primary key of this kind
    pub fn key_prefix(self) -> String {
        format!("{}{}", self.tag(), KEY_SEPARATOR)
    }

    /// Number of identifier components after the tag
    const fn arity(self) -> usize {
        match self {
            Self::Account | Self::CatalogSkill => 1,
            Self::AccountSkill => 2,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Account => "Account",
            Self::AccountSkill => "AccountSkill",
            Self::CatalogSkill => "CatalogSkill",
        };
        f.write_str(name)
    }
}

/// Case-fold an identifier component
pub fn normalize(component: &str) -> String {
    component.trim().to_lowercase()
}

pub fn account_key(handle: &str) -> String {
    format!("{}{}{}", EntityKind::Account.tag(), KEY_SEPARATOR, normalize(handle))
}

pub fn account_skill_key(handle: &str, skill_id: &str) -> String {
    format!(
        "{tag}{sep}{handle}{sep}{skill}",
        tag = EntityKind::AccountSkill.tag(),
        sep = KEY_SEPARATOR,
        handle = normalize(handle),
        skill = normalize(skill_id),
    )
}

pub fn catalog_skill_key(skill_id: &str) -> String {
    format!(
        "{}{}{}",
        EntityKind::CatalogSkill.tag(),
        KEY_SEPARATOR,
        normalize(skill_id)
    )
}

/// A decoded primary key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Account { handle: String },
    AccountSkill { handle: String, skill_id: String },
    CatalogSkill { skill_id: String },
}

impl EntityKey {
    /// Decode any primary key. Returns `None` for unknown tags, wrong
    /// component counts, or empty components.
    pub fn parse(key: &str) -> Option<Self> {
        let (tag, rest) = key.split_once(KEY_SEPARATOR)?;
        let kind = EntityKind::from_tag(tag)?;
        let parts: Vec<&str> = rest.split(KEY_SEPARATOR).collect();
        if parts.len() != kind.arity() || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        Some(match kind {
            EntityKind::Account => Self::Account {
                handle: parts[0].to_string(),
            },
            EntityKind::AccountSkill => Self::AccountSkill {
                handle: parts[0].to_string(),
                skill_id: parts[1].to_string(),
            },
            EntityKind::CatalogSkill => Self::CatalogSkill {
                skill_id: parts[0].to_string(),
            },
        })
    }

    /// Decode a key only if it belongs to `expected`
    pub fn parse_as(key: &str, expected: EntityKind) -> Option<Self> {
        Self::parse(key).filter(|decoded| decoded.kind() == expected)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Account { .. } => EntityKind::Account,
            Self::AccountSkill { .. } => EntityKind::AccountSkill,
            Self::CatalogSkill { .. } => EntityKind::CatalogSkill,
        }
    }

    pub fn to_storage_key(&self) -> String {
        match self {
            Self::Account { handle } => account_key(handle),
            Self::AccountSkill { handle, skill_id } => account_skill_key(handle, skill_id),
            Self::CatalogSkill { skill_id } => catalog_skill_key(skill_id),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage_key())
    }
}

pub fn parse_account_key(key: &str) -> Option<String> {
    match EntityKey::parse_as(key, EntityKind::Account)? {
        EntityKey::Account { handle } => Some(handle),
        _ => None,
    }
}

pub fn parse_account_skill_key(key: &str) -> Option<(String, String)> {
    match EntityKey::parse_as(key, EntityKind::AccountSkill)? {
        EntityKey::AccountSkill { handle, skill_id } => Some((handle, skill_id)),
        _ => None,
    }
}

pub fn parse_catalog_skill_key(key: &str) -> Option<String> {
    match EntityKey::parse_as(key, EntityKind::CatalogSkill)? {
        EntityKey::CatalogSkill { skill_id } => Some(skill_id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(account_key("John"), "ACCOUNT#john");
        assert_eq!(account_skill_key("Jane", "Go"), "ACCOUNTSKILL#jane#go");
        assert_eq!(catalog_skill_key("Rust-Lang"), "CATALOGSKILL#rust-lang");
    }

    #[test]
    fn test_build_is_idempotent() {
        let once = account_key("JoHn");
        assert_eq!(account_key(&normalize("JoHn")), once);
    }

    #[test]
    fn test_round_trip() {
        for handle in ["jane", "user1", "a.b_c-d"] {
            assert_eq!(parse_account_key(&account_key(handle)).as_deref(), Some(handle));
            for skill in ["go", "python", "rust-async"] {
                assert_eq!(
                    parse_account_skill_key(&account_skill_key(handle, skill)),
                    Some((handle.to_string(), skill.to_string()))
                );
            }
        }
        assert_eq!(
            parse_catalog_skill_key(&catalog_skill_key("python")).as_deref(),
            Some("python")
        );
    }

    #[test]
    fn test_kinds_never_collide() {
        let keys = [
            account_key("python"),
            account_skill_key("python", "python"),
            catalog_skill_key("python"),
        ];
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[0], keys[2]);
        assert_ne!(keys[1], keys[2]);

        assert_eq!(EntityKey::parse(&keys[0]).map(|k| k.kind()), Some(EntityKind::Account));
        assert_eq!(EntityKey::parse(&keys[1]).map(|k| k.kind()), Some(EntityKind::AccountSkill));
        assert_eq!(EntityKey::parse(&keys[2]).map(|k| k.kind()), Some(EntityKind::CatalogSkill));
    }

    #[test]
    fn test_parse_rejects_other_kinds_and_garbage() {
        assert_eq!(parse_account_key(&catalog_skill_key("go")), None);
        assert_eq!(parse_catalog_skill_key(&account_skill_key("jane", "go")), None);
        assert_eq!(parse_account_skill_key(&account_key("jane")), None);

        for garbage in ["", "#", "ACCOUNT", "ACCOUNT#", "ACCOUNT#a#b", "USER#jane", "ACCOUNTSKILL#jane", "ACCOUNTSKILL#jane#"] {
            assert_eq!(EntityKey::parse(garbage), None, "{garbage:?} should not parse");
        }
    }

    #[test]
    fn test_storage_key_matches_builders() {
        let key = EntityKey::AccountSkill {
            handle: "jane".into(),
            skill_id: "go".into(),
        };
        assert_eq!(key.to_storage_key(), account_skill_key("jane", "go"));
        assert_eq!(EntityKey::parse(&key.to_string()), Some(key));
    }
}
