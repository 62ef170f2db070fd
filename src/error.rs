//! Error types for skill-directory

use thiserror::Error;

use crate::keys::EntityKind;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },

    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: EntityKind, key: String },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{operation} failed for {key}: {source}")]
    Operation {
        operation: &'static str,
        key: String,
        #[source]
        source: Box<StorageError>,
    },
}

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidField,
    InvalidQuery,
    Backend,
    Config,
}

impl StorageError {
    pub fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn already_exists(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Attach operation context to a backend failure.
    ///
    /// Contract errors (`NotFound`, `AlreadyExists`, validation) already name
    /// their key and pass through unchanged.
    pub fn context(self, operation: &'static str, key: impl Into<String>) -> Self {
        match self {
            Self::Database(_) | Self::Serialization(_) | Self::Io(_) | Self::Internal(_) => {
                Self::Operation {
                    operation,
                    key: key.into(),
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::InvalidField { .. } => ErrorKind::InvalidField,
            Self::InvalidQuery(_) => ErrorKind::InvalidQuery,
            Self::Config(_) => ErrorKind::Config,
            Self::Operation { source, .. } => source.kind(),
            Self::Database(_) | Self::Serialization(_) | Self::Io(_) | Self::Internal(_) => {
                ErrorKind::Backend
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}

impl From<rmp_serde::encode::Error> for StorageError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for StorageError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_backend_errors_only() {
        let wrapped = StorageError::Serialization("bad msgpack".into())
            .context("get_account", "ACCOUNT#jane");
        assert_eq!(wrapped.kind(), ErrorKind::Backend);
        assert!(wrapped.to_string().contains("get_account failed for ACCOUNT#jane"));

        let missing = StorageError::not_found(EntityKind::Account, "ACCOUNT#jane")
            .context("get_account", "ACCOUNT#jane");
        assert!(matches!(missing, StorageError::NotFound { .. }));
        assert!(missing.is_not_found());
    }
}
