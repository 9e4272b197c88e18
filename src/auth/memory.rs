use std::collections::HashMap;

use chrono::Utc;
use log::{info, warn};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::{
    AuthError, Authenticator, Credentials, MIN_PASSWORD_LEN, Session, UserId, normalize_email,
};

struct Account {
    user_id: UserId,
    salt: String,
    password_hash: String,
}

/// Authenticator keeping accounts in memory for the life of the process.
#[derive(Default)]
pub struct MemoryAuthenticator {
    accounts: HashMap<String, Account>,
}

impl MemoryAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl Authenticator for MemoryAuthenticator {
    fn register(&mut self, credentials: &Credentials) -> Result<UserId, AuthError> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if self.accounts.contains_key(&email) {
            return Err(AuthError::AlreadyRegistered(email));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let account = Account {
            user_id: Uuid::new_v4(),
            password_hash: hash_password(&salt, &credentials.password),
            salt,
        };
        let user_id = account.user_id;
        self.accounts.insert(email, account);

        info!("event=auth_register status=ok user_id={}", user_id);
        Ok(user_id)
    }

    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        // Malformed emails cannot belong to an account; same answer as a miss.
        let email =
            normalize_email(&credentials.email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(account) = self.accounts.get(&email) else {
            warn!("event=auth_login status=rejected");
            return Err(AuthError::InvalidCredentials);
        };
        if hash_password(&account.salt, &credentials.password) != account.password_hash {
            warn!("event=auth_login status=rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!("event=auth_login status=ok user_id={}", account.user_id);
        Ok(Session {
            user_id: account.user_id,
            email,
            started_at: Utc::now(),
        })
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
