//! Environment-driven configuration.
//! Used by: main, state, store.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::password::PasswordPolicy;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_STORE_URI: &str = "sqlite:loginstore.db";
pub const DEFAULT_DATABASE: &str = "devopsdb";
pub const DEFAULT_COLLECTION: &str = "users";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub store: StoreConfig,
    pub store_required: bool,
    pub password_policy: PasswordPolicy,
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

impl StoreConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.into(),
            collection: DEFAULT_COLLECTION.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// The URI with any password replaced, safe to log.
    pub fn redacted_uri(&self) -> String {
        redact_uri(&self.uri)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests don't touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = StoreConfig {
            uri: lookup("STORE_URI").unwrap_or_else(|| DEFAULT_STORE_URI.into()),
            database: lookup("STORE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into()),
            collection: lookup("STORE_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.into()),
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "STORE_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
        };
        validate_name("STORE_DATABASE", &store.database)?;
        validate_name("STORE_COLLECTION", &store.collection)?;

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            store,
            store_required: parse_or(&lookup, "STORE_REQUIRED", false)?,
            password_policy: parse_or(&lookup, "PASSWORD_POLICY", PasswordPolicy::Plaintext)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| Error::Config(format!("{}={}", key, raw))),
    }
}

// Collection names end up in SQL for the sqlite backend.
fn validate_name(key: &str, value: &str) -> Result<()> {
    let ok = !value.is_empty()
        && value.len() <= 64
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(Error::Config(format!("{} must be 1-64 alphanumeric/underscore chars", key)))
    }
}

fn redact_uri(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    // Unescaped `/`, `?` or `@` may sit inside the password, so the host
    // starts after the last `@` preceding the first path or query delimiter
    // that follows an `@`.
    let Some(first_at) = rest.find('@') else {
        return uri.to_string();
    };
    let authority_end = rest[first_at..]
        .find(|c| c == '/' || c == '?')
        .map_or(rest.len(), |i| first_at + i);
    match rest[..authority_end].rfind('@') {
        Some(at) => {
            let userinfo = &rest[..at];
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{}://{}:***@{}", scheme, user, &rest[at + 1..])
        }
        None => uri.to_string(),
    }
}
