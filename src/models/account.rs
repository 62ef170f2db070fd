//! Account profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_display_name, validate_email, validate_handle};
use crate::error::StorageError;
use crate::keys;

/// Account profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Case-folded unique handle
    pub handle: String,
    pub display_name: String,
    /// Empty when credentials live with an external identity provider
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    pub handle: String,
    pub display_name: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Account {
    pub fn new(input: NewAccount) -> Result<Self, StorageError> {
        let now = Utc::now();
        Ok(Self {
            handle: validate_handle(&input.handle)?,
            display_name: validate_display_name(&input.display_name)?,
            password_hash: input.password_hash,
            email: input.email.as_deref().map(validate_email).transpose()?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Primary key for this account
    pub fn key(&self) -> String {
        keys::account_key(&self.handle)
    }

    pub fn set_display_name(&mut self, name: &str) -> Result<(), StorageError> {
        self.display_name = validate_display_name(name)?;
        Ok(())
    }

    pub fn set_email(&mut self, email: Option<&str>) -> Result<(), StorageError> {
        self.email = email.map(validate_email).transpose()?;
        Ok(())
    }

    pub fn set_password_hash(&mut self, hash: impl Into<String>) {
        self.password_hash = hash.into();
    }

    /// Whether credentials are managed by this store rather than externally
    pub fn has_local_credentials(&self) -> bool {
        !self.password_hash.is_empty()
    }
}
