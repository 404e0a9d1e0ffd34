//! Static credential store backing the login gate.
//!
//! Credentials live in a plain JSON map of username to password. The file is
//! trusted as-is; hashing and account management are out of scope.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{FundError, Result};
use crate::fs;

/// A username → password mapping loaded from a JSON file.
#[derive(Debug, Default, Clone)]
pub struct Credentials {
    users: HashMap<String, String>,
}

impl Credentials {
    /// Load the mapping.
    ///
    /// # Errors
    ///
    /// Returns `FundError::Storage` if the file is missing or not a JSON
    /// object of strings.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FundError::Storage(format!("Failed to read users file {}: {}", path.display(), e))
        })?;
        let users = serde_json::from_str(&contents).map_err(|e| {
            FundError::Storage(format!("Malformed users file {}: {}", path.display(), e))
        })?;
        Ok(Self { users })
    }

    /// Write the mapping back out (used to seed the first account).
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.users)?;
        fs::write_snapshot(path, contents.as_bytes())?;
        Ok(())
    }

    pub fn insert(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.users.insert(username.into(), password.into());
    }

    /// Check a submitted username/password pair.
    pub fn validate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored == password)
    }
}
