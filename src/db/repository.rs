// src/db/repository.rs

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{Collection, DocumentStore, StoredDocument},
    models::{
        budget::Budget,
        catalog::{CostItem, Product},
        crm::Customer,
    },
};

/// Registro tipado guardado numa coleção. O campo `id` não vai para o corpo do documento.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

macro_rules! impl_document {
    ($ty:ty, $collection:expr, $entity:literal) => {
        impl Document for $ty {
            const COLLECTION: Collection = $collection;
            const ENTITY: &'static str = $entity;

            fn id(&self) -> Uuid {
                self.id
            }

            fn set_id(&mut self, id: Uuid) {
                self.id = id;
            }
        }
    };
}

impl_document!(CostItem, Collection::Materials, "cost_item");
impl_document!(Product, Collection::Products, "product");
impl_document!(Customer, Collection::Customers, "customer");
impl_document!(Budget, Collection::Budgets, "budget");

pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

// Clone manual: não exige T: Clone
impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone(), _marker: PhantomData }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _marker: PhantomData }
    }

    pub async fn list_all(&self) -> Result<Vec<T>, AppError> {
        self.store
            .list_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, AppError> {
        self.store
            .get_by_id(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<T, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(T::ENTITY, id))
    }

    /// Grava o registro e devolve-o com o id atribuído pelo banco.
    pub async fn create(&self, mut record: T) -> Result<T, AppError> {
        let id = self.store.create(T::COLLECTION, encode(&record)?).await?;
        record.set_id(id);
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, mut record: T) -> Result<T, AppError> {
        record.set_id(id);
        if !self.store.update(T::COLLECTION, id, encode(&record)?).await? {
            return Err(AppError::not_found(T::ENTITY, id));
        }
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(AppError::not_found(T::ENTITY, id));
        }
        Ok(())
    }
}

fn encode<T: Document>(record: &T) -> Result<Value, AppError> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    Ok(value)
}

fn decode<T: Document>(doc: StoredDocument) -> Result<T, AppError> {
    let mut data = doc.data;
    if let Value::Object(map) = &mut data {
        map.insert("id".to_string(), Value::String(doc.id.to_string()));
    }
    Ok(serde_json::from_value(data)?)
}
