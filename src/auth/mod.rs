// Authentication sits outside the ledger: a successful login only decides
// whether a client may show the ledger. The ledger never sees a session.

mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryAuthenticator;

pub type UserId = Uuid;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Never print the password.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    WeakPassword,

    #[error("An account already exists for {0}")]
    AlreadyRegistered(String),

    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Capability for signing users up and in.
pub trait Authenticator {
    /// Create an account for `credentials`.
    fn register(&mut self, credentials: &Credentials) -> Result<UserId, AuthError>;

    /// Check `credentials` and open a session.
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Trim and lowercase an email, rejecting anything without a local part and a domain.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Alice@Example.COM "),
            Ok("alice@example.com".to_string())
        );
        assert!(normalize_email("alice").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("alice@").is_err());
        assert!(normalize_email("a@b@c").is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("alice@example.com", "hunter22");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice@example.com"));
        assert!(!printed.contains("hunter22"));
    }
}
