// src/db/memory_store.rs

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{Collection, DocumentStore, StoredDocument},
};

/// Banco em memória, na ordem de inserção. Usado sem DATABASE_URL e nos testes.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn create(&self, collection: Collection, data: Value) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push(StoredDocument { id, data });
        Ok(id)
    }

    async fn update(&self, collection: Collection, id: Uuid, data: Value) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id));

        match doc {
            Some(doc) => {
                doc.data = data;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn crud_cycle_keeps_collections_apart() {
        let store = MemoryDocumentStore::new();

        let id = store.create(Collection::Materials, json!({ "name": "Cola" })).await.unwrap();
        store.create(Collection::Customers, json!({ "name": "Ana" })).await.unwrap();

        assert_eq!(store.list_all(Collection::Materials).await.unwrap().len(), 1);
        assert!(store.get_by_id(Collection::Customers, id).await.unwrap().is_none());

        assert!(store.update(Collection::Materials, id, json!({ "name": "Verniz" })).await.unwrap());
        let doc = store.get_by_id(Collection::Materials, id).await.unwrap().unwrap();
        assert_eq!(doc.data, json!({ "name": "Verniz" }));

        assert!(store.delete(Collection::Materials, id).await.unwrap());
        assert!(!store.delete(Collection::Materials, id).await.unwrap());
        assert!(!store.update(Collection::Materials, id, json!({})).await.unwrap());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        for name in ["a", "b", "c"] {
            store.create(Collection::Products, json!({ "name": name })).await.unwrap();
        }
        let names: Vec<Value> = store
            .list_all(Collection::Products)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.data["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }
}
