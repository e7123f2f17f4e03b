//! MongoDB-backed [`DocumentDriver`].

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document as BsonDocument};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, FindOptions};
use mongodb::Client;
use std::time::Duration;
use storage::{
    Collection, ConnectionOptions, DeleteResult, Document, DocumentDriver, Filter, StorageConfig,
    StorageError,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::convert::{bson_to_document, document_to_bson, filter_to_bson, map_error};

/// Holds one MongoDB client from `connect` until `close`.
pub struct MongoDocumentStore {
    uri: String,
    database: String,
    options: ConnectionOptions,
    client: RwLock<Option<Client>>,
}

/// Applies the options bag to parsed client options. The legacy mode flags have no
/// counterpart in the Rust driver.
pub fn apply_connection_options(client_options: &mut ClientOptions, options: &ConnectionOptions) {
    client_options.connect_timeout = Some(Duration::from_millis(options.connect_timeout_ms));
    debug!(
        use_new_url_parser = options.use_new_url_parser,
        use_create_index = options.use_create_index,
        use_unified_topology = options.use_unified_topology,
        use_find_and_modify = options.use_find_and_modify,
        "Legacy connection flags ignored by the Rust driver"
    );
}

impl MongoDocumentStore {
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        options: ConnectionOptions,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            options,
            client: RwLock::new(None),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.uri, &config.database, config.options.clone())
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Server-side time limit for reads and find-and-modify, taken from the socket timeout.
    fn max_time(&self) -> Duration {
        Duration::from_millis(self.options.socket_timeout_ms)
    }

    async fn collection(
        &self,
        collection: Collection,
    ) -> Result<mongodb::Collection<BsonDocument>, StorageError> {
        let guard = self.client.read().await;
        let client = guard.as_ref().ok_or(StorageError::NotConnected)?;
        Ok(client
            .database(&self.database)
            .collection::<BsonDocument>(collection.name()))
    }
}

#[async_trait]
impl DocumentDriver for MongoDocumentStore {
    async fn connect(&self) -> Result<(), StorageError> {
        info!(database = %self.database, "Connecting to MongoDB");

        let mut client_options = ClientOptions::parse(&self.uri).await.map_err(map_error)?;
        apply_connection_options(&mut client_options, &self.options);
        let client = Client::with_options(client_options).map_err(map_error)?;

        // Client creation is lazy; ping so connect reports unreachable servers.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(map_error)?;

        *self.client.write().await = Some(client);
        info!(database = %self.database, "Connected to MongoDB");
        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        let client = self.client.write().await.take();
        if client.is_some() {
            info!(database = %self.database, "MongoDB connection closed");
        }
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        let query = filter_to_bson(filter)?;
        let options = FindOptions::builder().max_time(self.max_time()).build();

        let cursor = self
            .collection(collection)
            .await?
            .find(query, options)
            .await
            .map_err(map_error)?;
        let documents: Vec<BsonDocument> = cursor.try_collect().await.map_err(map_error)?;

        debug!(%collection, count = documents.len(), "MongoDB find returned");
        Ok(documents.into_iter().map(bson_to_document).collect())
    }

    async fn find_one_and_update(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Document,
    ) -> Result<Option<Document>, StorageError> {
        let query = filter_to_bson(filter)?;
        let update = doc! { "$set": document_to_bson(&update)? };
        let options = FindOneAndUpdateOptions::builder()
            .max_time(self.max_time())
            .build();

        let matched = self
            .collection(collection)
            .await?
            .find_one_and_update(query, update, options)
            .await
            .map_err(map_error)?;
        Ok(matched.map(bson_to_document))
    }

    async fn create(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<Document, StorageError> {
        let bson = document_to_bson(&document)?;
        let result = self
            .collection(collection)
            .await?
            .insert_one(bson, None)
            .await
            .map_err(map_error)?;

        debug!(%collection, inserted_id = %result.inserted_id, "MongoDB insert_one done");
        Ok(document)
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StorageError> {
        let query = filter_to_bson(filter)?;
        let result = self
            .collection(collection)
            .await?
            .delete_one(query, None)
            .await
            .map_err(map_error)?;
        Ok(DeleteResult {
            deleted_count: result.deleted_count,
        })
    }
}
