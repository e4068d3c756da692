// src/services/product_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Repository,
    engine::pricing::{catalog_index, compute_product_pricing, PricingResult, PricingWarning},
    models::catalog::{CostItem, CostRow, Product},
};

/// Produto em edição: composição + os dois percentuais.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub cost_rows: Vec<CostRow>,
    pub fixed_cost_percent: Decimal,
    pub profit_margin_percent: Decimal,
}

/// Produto salvo junto com os avisos do cálculo que gerou o cache.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedProduct {
    pub product: Product,
    pub warnings: Vec<PricingWarning>,
}

/// Cache guardado vs. cálculo com o catálogo de agora.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricingStatus {
    pub product: Product,
    pub current: PricingResult,
    pub is_stale: bool,
}

#[derive(Clone)]
pub struct ProductService {
    repo: Repository<Product>,
    cost_items: Repository<CostItem>,
}

impl ProductService {
    pub fn new(repo: Repository<Product>, cost_items: Repository<CostItem>) -> Self {
        Self { repo, cost_items }
    }

    // Snapshot do catálogo tirado no início de cada operação
    async fn price(
        &self,
        cost_rows: &[CostRow],
        fixed_cost_percent: Decimal,
        profit_margin_percent: Decimal,
    ) -> Result<PricingResult, AppError> {
        let catalog = catalog_index(self.cost_items.list_all().await?);
        Ok(compute_product_pricing(
            cost_rows,
            &catalog,
            fixed_cost_percent,
            profit_margin_percent,
        ))
    }

    pub async fn preview_pricing(&self, draft: &ProductDraft) -> Result<PricingResult, AppError> {
        self.price(&draft.cost_rows, draft.fixed_cost_percent, draft.profit_margin_percent)
            .await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<SavedProduct, AppError> {
        let (product, warnings) = self.build(Uuid::nil(), draft).await?;
        let product = self.repo.create(product).await?;

        tracing::info!(
            product_id = %product.id,
            final_sale_price = %product.final_sale_price,
            warnings = warnings.len(),
            "Produto criado"
        );
        Ok(SavedProduct { product, warnings })
    }

    pub async fn update_product(&self, id: Uuid, draft: ProductDraft) -> Result<SavedProduct, AppError> {
        let (product, warnings) = self.build(id, draft).await?;
        let product = self.repo.update(id, product).await?;

        tracing::info!(
            product_id = %id,
            final_sale_price = %product.final_sale_price,
            warnings = warnings.len(),
            "Produto atualizado"
        );
        Ok(SavedProduct { product, warnings })
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(product_id = %id, "Produto removido");
        Ok(())
    }

    pub async fn pricing_status(&self, id: Uuid) -> Result<ProductPricingStatus, AppError> {
        let product = self.repo.get_by_id(id).await?;
        let current = self
            .price(&product.cost_rows, product.fixed_cost_percent, product.profit_margin_percent)
            .await?;
        let is_stale = !current.matches(&product);

        Ok(ProductPricingStatus { product, current, is_stale })
    }

    /// Recalcula o cache de preço com o catálogo atual e grava.
    pub async fn reprice_product(&self, id: Uuid) -> Result<SavedProduct, AppError> {
        let mut product = self.repo.get_by_id(id).await?;
        let pricing = self
            .price(&product.cost_rows, product.fixed_cost_percent, product.profit_margin_percent)
            .await?;

        let previous_price = product.final_sale_price;
        pricing.apply_to(&mut product, Utc::now());
        let product = self.repo.update(id, product).await?;

        tracing::info!(
            product_id = %id,
            %previous_price,
            final_sale_price = %product.final_sale_price,
            "Produto reprecificado"
        );
        Ok(SavedProduct { product, warnings: pricing.warnings })
    }

    async fn build(&self, id: Uuid, draft: ProductDraft) -> Result<(Product, Vec<PricingWarning>), AppError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ProductNameRequired);
        }

        let pricing = self
            .price(&draft.cost_rows, draft.fixed_cost_percent, draft.profit_margin_percent)
            .await?;

        let mut product = Product {
            id,
            name,
            cost_rows: draft.cost_rows,
            fixed_cost_percent: draft.fixed_cost_percent,
            profit_margin_percent: draft.profit_margin_percent,
            total_variable_cost: Decimal::ZERO,
            fixed_cost_value: Decimal::ZERO,
            total_product_cost: Decimal::ZERO,
            profit_value: Decimal::ZERO,
            final_sale_price: Decimal::ZERO,
            priced_at: None,
        };
        pricing.apply_to(&mut product, Utc::now());

        Ok((product, pricing.warnings))
    }
}
