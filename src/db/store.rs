// src/db/store.rs

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;

// As quatro coleções do banco de documentos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Materials,
    Products,
    Customers,
    Budgets,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Materials => "materials",
            Collection::Products => "products",
            Collection::Customers => "customers",
            Collection::Budgets => "budgets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documento cru: o id fica fora do corpo.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub data: Value,
}

/// Banco de documentos sem esquema. `update` e `delete` retornam `false` quando o id não existe.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError>;

    async fn get_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, AppError>;

    async fn create(&self, collection: Collection, data: Value) -> Result<Uuid, AppError>;

    async fn update(&self, collection: Collection, id: Uuid, data: Value) -> Result<bool, AppError>;

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, AppError>;
}
