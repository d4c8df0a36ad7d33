//! How submitted passwords are written to storage.
//! Used by: config, state, handlers::save.

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

use crate::error::{Error, Result};

/// Plaintext keeps the stored record identical to what was submitted.
/// Argon2 replaces it with a salted PHC hash string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    #[default]
    Plaintext,
    Argon2,
}

impl PasswordPolicy {
    pub fn apply(&self, password: &str) -> Result<String> {
        match self {
            PasswordPolicy::Plaintext => Ok(password.to_string()),
            PasswordPolicy::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| Error::Hashing(e.to_string()))?;
                Ok(hash.to_string())
            }
        }
    }
}

impl FromStr for PasswordPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plaintext" => Ok(PasswordPolicy::Plaintext),
            "argon2" => Ok(PasswordPolicy::Argon2),
            other => Err(Error::Config(format!("unknown password policy: {}", other))),
        }
    }
}

impl fmt::Display for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordPolicy::Plaintext => f.write_str("plaintext"),
            PasswordPolicy::Argon2 => f.write_str("argon2"),
        }
    }
}
