use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which submission path produced a format failure. The underlying rule is
/// identical; only the user-visible message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFlow {
    Login,
    Register,
}

impl AuthFlow {
    fn format_message(self) -> &'static str {
        match self {
            AuthFlow::Login => "Invalid username format",
            AuthFlow::Register => "Username must be 4-24 characters (letters and numbers only)",
        }
    }
}

/// Terminal outcome of a failed login or registration attempt. The `Display`
/// strings are the exact user-visible messages; `InvalidCredentials`
/// deliberately does not distinguish an unknown account from a wrong secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingField,
    #[error("{}", .flow.format_message())]
    InvalidFormat { flow: AuthFlow },
    #[error("Account does not exist or wrong password")]
    InvalidCredentials,
    #[error("Username already taken")]
    UsernameTaken,
}
