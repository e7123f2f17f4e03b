//! Storage provider: entity-level CRUD for users and templates.
//!
//! Composes the query builder, a [`DocumentDriver`] and the [`StorageResponse`] envelope.
//! Driver errors never escape; each one becomes a single `Failure`, with no retry.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::driver::DocumentDriver;
use crate::models::{from_document, to_document, Entity, Template, User};
use crate::response::StorageResponse;

/// Operations exposed to the service layer.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    async fn get_users(&self, query: &User) -> StorageResponse<Vec<User>>;
    async fn get_templates(&self, query: &Template) -> StorageResponse<Vec<Template>>;
    /// Updates only one user.
    async fn update_user(&self, query: &User, update: &User) -> StorageResponse<()>;
    /// Updates only one template.
    async fn update_template(&self, query: &Template, update: &Template)
        -> StorageResponse<()>;
    async fn insert_user(&self, user: &User) -> StorageResponse<u64>;
    async fn insert_template(&self, template: &Template) -> StorageResponse<u64>;
    async fn remove_user(&self, query: &User) -> StorageResponse<()>;
    async fn remove_template(&self, query: &Template) -> StorageResponse<()>;
    async fn connect(&self) -> StorageResponse<bool>;
    async fn close(&self) -> StorageResponse<bool>;
}

/// [`StorageProvider`] backed by an owned document store driver.
pub struct DocumentStorageProvider<D> {
    driver: D,
}

fn not_found<E: Entity>() -> String {
    format!("No {} found matching given criteria", E::COLLECTION)
}

impl<D: DocumentDriver> DocumentStorageProvider<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    async fn get<E: Entity>(&self, query: &E) -> StorageResponse<Vec<E>> {
        let collection = E::COLLECTION;
        let filter = query.to_filter();

        let documents = match self.driver.find(collection, &filter).await {
            Ok(documents) => documents,
            Err(e) => {
                warn!(%collection, error = %e, "find failed");
                return e.into();
            }
        };

        if documents.is_empty() {
            info!(%collection, clauses = filter.len(), "find matched nothing");
            return StorageResponse::failure(not_found::<E>());
        }

        match documents
            .into_iter()
            .map(from_document::<E>)
            .collect::<Result<Vec<E>, _>>()
        {
            Ok(entities) => {
                info!(%collection, count = entities.len(), "find returned");
                StorageResponse::success(entities)
            }
            Err(e) => {
                warn!(%collection, error = %e, "stored document does not decode");
                e.into()
            }
        }
    }

    async fn update<E: Entity>(&self, query: &E, update: &E) -> StorageResponse<()> {
        let collection = E::COLLECTION;
        let filter = query.to_filter();
        let update = match to_document(update) {
            Ok(update) => update,
            Err(e) => return e.into(),
        };

        match self
            .driver
            .find_one_and_update(collection, &filter, update)
            .await
        {
            Ok(Some(_)) => {
                info!(%collection, "updated one document");
                StorageResponse::done()
            }
            Ok(None) => StorageResponse::failure(format!("{}.", not_found::<E>())),
            Err(e) => {
                warn!(%collection, error = %e, "find_one_and_update failed");
                e.into()
            }
        }
    }

    async fn insert<E: Entity>(&self, entity: &E) -> StorageResponse<u64> {
        let collection = E::COLLECTION;
        let document = match to_document(entity) {
            Ok(document) => document,
            Err(e) => return e.into(),
        };

        match self.driver.create(collection, document).await {
            Ok(_) => {
                info!(%collection, "inserted one document");
                StorageResponse::success(1)
            }
            Err(e) => {
                warn!(%collection, error = %e, "create failed");
                e.into()
            }
        }
    }

    async fn remove<E: Entity>(&self, query: &E) -> StorageResponse<()> {
        let collection = E::COLLECTION;
        let filter = query.to_filter();

        match self.driver.delete_one(collection, &filter).await {
            Ok(result) if result.deleted_count > 0 => {
                info!(%collection, "deleted one document");
                StorageResponse::done()
            }
            Ok(_) => StorageResponse::failure(not_found::<E>()),
            Err(e) => {
                warn!(%collection, error = %e, "delete_one failed");
                e.into()
            }
        }
    }
}

#[async_trait]
impl<D: DocumentDriver> StorageProvider for DocumentStorageProvider<D> {
    async fn get_users(&self, query: &User) -> StorageResponse<Vec<User>> {
        self.get(query).await
    }

    async fn get_templates(&self, query: &Template) -> StorageResponse<Vec<Template>> {
        self.get(query).await
    }

    async fn update_user(&self, query: &User, update: &User) -> StorageResponse<()> {
        self.update(query, update).await
    }

    async fn update_template(
        &self,
        query: &Template,
        update: &Template,
    ) -> StorageResponse<()> {
        self.update(query, update).await
    }

    async fn insert_user(&self, user: &User) -> StorageResponse<u64> {
        self.insert(user).await
    }

    async fn insert_template(&self, template: &Template) -> StorageResponse<u64> {
        self.insert(template).await
    }

    async fn remove_user(&self, query: &User) -> StorageResponse<()> {
        self.remove(query).await
    }

    async fn remove_template(&self, query: &Template) -> StorageResponse<()> {
        self.remove(query).await
    }

    async fn connect(&self) -> StorageResponse<bool> {
        match self.driver.connect().await {
            Ok(()) => StorageResponse::success(true),
            Err(e) => e.into(),
        }
    }

    async fn close(&self) -> StorageResponse<bool> {
        match self.driver.close().await {
            Ok(()) => StorageResponse::success(true),
            Err(e) => e.into(),
        }
    }
}
