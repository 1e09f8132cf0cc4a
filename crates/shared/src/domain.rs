use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LEN: usize = 4;
pub const USERNAME_MAX_LEN: usize = 24;

/// Stored identity record. The secret is kept and compared in plain form;
/// this mirrors the reference behavior and is NOT suitable for real
/// credential storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub secret: String,
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            secret: secret.into(),
        }
    }
}

/// Runtime representation of "currently authenticated as account X".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub email: String,
    pub avatar_ref: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainTab {
    Chats,
    Settings,
}

/// Strips the first `@` marker, wherever it appears, and leaves the rest of
/// the input untouched. Matching and storage both operate on the normalized
/// form; lookups additionally compare case-insensitively.
pub fn normalize_username(input: &str) -> String {
    match input.find('@') {
        Some(index) => {
            let mut cleaned = String::with_capacity(input.len().saturating_sub(1));
            cleaned.push_str(&input[..index]);
            cleaned.push_str(&input[index + 1..]);
            cleaned
        }
        None => input.to_string(),
    }
}

/// Format invariant for normalized usernames: 4 to 24 ASCII letters/digits.
pub fn is_valid_username(normalized: &str) -> bool {
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&normalized.len())
        && normalized.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_leading_at() {
        assert_eq!(normalize_username("@alex1"), "alex1");
    }

    #[test]
    fn normalize_strips_only_first_at() {
        assert_eq!(normalize_username("@@alex1"), "@alex1");
        assert_eq!(normalize_username("al@ex1"), "alex1");
    }

    #[test]
    fn normalize_leaves_plain_input_unchanged() {
        assert_eq!(normalize_username("alex1"), "alex1");
        assert_eq!(normalize_username(""), "");
    }

    #[test]
    fn username_length_bounds() {
        assert!(!is_valid_username("abc"));
        assert!(is_valid_username("abcd"));
        assert!(is_valid_username(&"a".repeat(USERNAME_MAX_LEN)));
        assert!(!is_valid_username(&"a".repeat(USERNAME_MAX_LEN + 1)));
    }

    #[test]
    fn username_rejects_non_alphanumeric() {
        assert!(!is_valid_username("alex_1"));
        assert!(!is_valid_username("alex 1"));
        assert!(!is_valid_username("@alex1"));
        assert!(is_valid_username("Alex123"));
    }

    #[test]
    fn auth_mode_toggles_both_ways() {
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Register);
        assert_eq!(AuthMode::Register.toggled(), AuthMode::Login);
    }
}
