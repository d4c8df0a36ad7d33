//! MongoDB-backed credential collection.
//! Used by: store.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::config::StoreConfig;
use crate::error::Result;

use super::CredentialRecord;

const APP_NAME: &str = "loginstore";

pub struct MongoStore {
    database: Database,
    collection: Collection<CredentialRecord>,
}

impl MongoStore {
    /// Parses the URI (SRV lookup included) and builds a pooled client.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(config.uri.as_str()).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        let collection = database.collection::<CredentialRecord>(&config.collection);
        tracing::debug!(
            database = %config.database,
            collection = %config.collection,
            "mongodb client built"
        );
        Ok(Self { database, collection })
    }

    pub async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub async fn insert(&self, record: &CredentialRecord) -> Result<()> {
        let result = self.collection.insert_one(record).await?;
        tracing::debug!(id = %result.inserted_id, "credential document inserted");
        Ok(())
    }
}
