//! Shared application state and startup store probing.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::password::PasswordPolicy;
use crate::store::sqlite::SqliteStore;
use crate::store::CredentialStore;
use crate::telemetry::Metrics;

pub struct AppStateInner {
    /// `None` when the store could not be opened or pinged at startup.
    pub store: Option<CredentialStore>,
    pub password_policy: PasswordPolicy,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn store(&self) -> Result<&CredentialStore> {
        self.store.as_ref().ok_or(Error::StoreUnavailable)
    }

    pub fn backend(&self) -> Option<&'static str> {
        self.store.as_ref().map(CredentialStore::backend)
    }

    pub fn increment_requests(&self) {
        let n = self.metrics.record_request();
        if n % 1000 == 0 {
            tracing::info!(count = n, "request volume");
        }
    }
}

struct StateBuilder {
    store: Option<CredentialStore>,
    password_policy: PasswordPolicy,
}

impl StateBuilder {
    fn build(self) -> AppState {
        Arc::new(AppStateInner {
            store: self.store,
            password_policy: self.password_policy,
            metrics: Metrics::new(),
        })
    }
}

/// Opens and pings the configured store once.
///
/// A failure is logged and leaves the service running without a handle,
/// unless `store_required` is set, in which case it is returned.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = match probe_store(config).await {
        Ok(store) => {
            tracing::info!(
                backend = store.backend(),
                uri = %config.store.redacted_uri(),
                "connected to store"
            );
            Some(store)
        }
        Err(err) if config.store_required => {
            tracing::error!(error = %err, uri = %config.store.redacted_uri(), "store required but unreachable");
            return Err(err);
        }
        Err(err) => {
            tracing::error!(error = %err, uri = %config.store.redacted_uri(), "store connection failed, continuing degraded");
            crate::console::log_store_down(&config.store.redacted_uri(), &err.to_string());
            None
        }
    };

    Ok(StateBuilder {
        store,
        password_policy: config.password_policy,
    }
    .build())
}

async fn probe_store(config: &Config) -> Result<CredentialStore> {
    let store = CredentialStore::open(&config.store).await?;
    store.ping().await?;
    Ok(store)
}

pub fn build_test_state() -> Result<AppState> {
    Ok(StateBuilder {
        store: Some(CredentialStore::Sqlite(SqliteStore::open_in_memory()?)),
        password_policy: PasswordPolicy::Plaintext,
    }
    .build())
}

pub fn build_state_with(store: Option<CredentialStore>, password_policy: PasswordPolicy) -> AppState {
    StateBuilder { store, password_policy }.build()
}
