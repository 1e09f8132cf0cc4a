use shared::domain::{normalize_username, Account};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("username already taken")]
    UsernameTaken,
}

impl From<RegistryError> for shared::error::AuthError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UsernameTaken => shared::error::AuthError::UsernameTaken,
        }
    }
}

/// In-memory, process-lifetime store of known accounts. Append-only: records
/// are never updated or removed once registered, and no two records share a
/// username under case-insensitive comparison.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive lookup by username. The input is normalized (`@`
    /// marker stripped) before comparison. No side effects.
    pub fn find_by_username(&self, name: &str) -> Option<&Account> {
        let wanted = normalize_username(name);
        self.accounts
            .iter()
            .find(|account| account.username.eq_ignore_ascii_case(&wanted))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find_by_username(name).is_some()
    }

    /// Appends a new account, rejecting a username already present under
    /// case-insensitive comparison. Either the record lands whole or nothing
    /// is written.
    pub fn register(&mut self, account: Account) -> Result<(), RegistryError> {
        if self.exists(&account.username) {
            return Err(RegistryError::UsernameTaken);
        }
        debug!(username = %account.username, "account registered");
        self.accounts.push(account);
        Ok(())
    }

    /// Returns the matching account only when both the case-insensitive
    /// username match and the exact byte-for-byte secret match hold. A miss
    /// never reveals whether the username or the secret was wrong.
    pub fn verify(&self, name: &str, secret: &str) -> Option<&Account> {
        self.find_by_username(name)
            .filter(|account| account.secret == secret)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
