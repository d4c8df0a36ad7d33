//! Credential record storage.
//! Used by: state, handlers::save, handlers::health.

pub mod mongo;
pub mod sqlite;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Error, Result};

use self::mongo::MongoStore;
use self::sqlite::SqliteStore;

/// One submitted email/password pair. Serialized as `{email, password}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The storage handle shared by every request.
pub enum CredentialStore {
    Mongo(MongoStore),
    Sqlite(SqliteStore),
}

impl CredentialStore {
    /// Picks the backend from the URI scheme and builds its client.
    /// Does not round-trip to the server; call [`ping`](Self::ping) for that.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let uri = config.uri.as_str();
        if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
            Ok(Self::Mongo(MongoStore::connect(config).await?))
        } else if let Some(path) = uri.strip_prefix("sqlite:") {
            let path = path.strip_prefix("//").unwrap_or(path);
            Ok(Self::Sqlite(SqliteStore::open(path, &config.collection)?))
        } else {
            Err(Error::Config(format!(
                "unsupported STORE_URI scheme: {}",
                config.redacted_uri()
            )))
        }
    }

    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Mongo(store) => store.ping().await,
            Self::Sqlite(store) => store.ping(),
        }
    }

    pub async fn insert(&self, record: &CredentialRecord) -> Result<()> {
        match self {
            Self::Mongo(store) => store.insert(record).await,
            Self::Sqlite(store) => store.insert(record),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Mongo(_) => "mongodb",
            Self::Sqlite(_) => "sqlite",
        }
    }
}
