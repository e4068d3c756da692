// src/services/catalog_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Repository,
    models::catalog::{CostItem, CostUnit},
};

// Itens de custo (materiais e mão de obra)
#[derive(Clone)]
pub struct CatalogService {
    repo: Repository<CostItem>,
}

impl CatalogService {
    pub fn new(repo: Repository<CostItem>) -> Self {
        Self { repo }
    }

    pub async fn list_cost_items(&self) -> Result<Vec<CostItem>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_cost_item(&self, id: Uuid) -> Result<CostItem, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create_cost_item(
        &self,
        name: &str,
        unit: CostUnit,
        unit_price: Decimal,
    ) -> Result<CostItem, AppError> {
        let item = self
            .repo
            .create(CostItem {
                id: Uuid::nil(),
                name: name.trim().to_string(),
                unit,
                unit_price,
            })
            .await?;

        tracing::info!(cost_item_id = %item.id, "Item de custo criado");
        Ok(item)
    }

    /// Sobrescreve o item. Produtos que o usam NÃO são recalculados.
    pub async fn update_cost_item(
        &self,
        id: Uuid,
        name: &str,
        unit: CostUnit,
        unit_price: Decimal,
    ) -> Result<CostItem, AppError> {
        let item = self
            .repo
            .update(
                id,
                CostItem {
                    id,
                    name: name.trim().to_string(),
                    unit,
                    unit_price,
                },
            )
            .await?;

        tracing::info!(cost_item_id = %id, "Item de custo atualizado");
        Ok(item)
    }

    // Sem verificação de uso: linhas de produto podem ficar órfãs
    pub async fn delete_cost_item(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(cost_item_id = %id, "Item de custo removido");
        Ok(())
    }
}
