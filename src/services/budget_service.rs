// src/services/budget_service.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Repository,
    engine::quote::{QuantityInput, QuoteDraft, QuoteTotals},
    models::{
        budget::{Budget, BudgetLine, BudgetStatus, CustomerRef},
        catalog::Product,
        crm::Customer,
    },
};

/// Linha pedida pelo cliente da API: produto + quantidade crua.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineInput {
    pub product_id: Uuid,
    #[serde(default)]
    #[schema(value_type = Object, example = 2)]
    pub quantity: QuantityInput,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    #[serde(flatten)]
    pub line: BudgetLine,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPreview {
    pub items: Vec<PreviewLine>,
    #[serde(flatten)]
    pub totals: QuoteTotals,
}

#[derive(Clone)]
pub struct BudgetService {
    repo: Repository<Budget>,
    customers: Repository<Customer>,
    products: Repository<Product>,
}

impl BudgetService {
    pub fn new(
        repo: Repository<Budget>,
        customers: Repository<Customer>,
        products: Repository<Product>,
    ) -> Self {
        Self { repo, customers, products }
    }

    // Monta o rascunho com as regras do motor: produto repetido é ignorado,
    // quantidade coerida para >= 1.
    async fn build_draft(&self, lines: &[BudgetLineInput]) -> Result<QuoteDraft, AppError> {
        let catalog: HashMap<Uuid, Product> = self
            .products
            .list_all()
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut draft = QuoteDraft::new();
        for input in lines {
            let product = catalog
                .get(&input.product_id)
                .ok_or_else(|| AppError::not_found("product", input.product_id))?;

            match draft.add_product(product) {
                Some(line_id) => {
                    draft.set_quantity(line_id, &input.quantity);
                }
                None => {
                    tracing::debug!(product_id = %product.id, "Produto já está no orçamento, ignorado");
                }
            }
        }
        Ok(draft)
    }

    pub async fn preview_budget(
        &self,
        lines: &[BudgetLineInput],
        shipping_cost: Decimal,
        discount: Decimal,
    ) -> Result<BudgetPreview, AppError> {
        let draft = self.build_draft(lines).await?;
        let totals = draft.totals(shipping_cost, discount);
        let items = draft
            .into_lines()
            .into_iter()
            .map(|line| PreviewLine { subtotal: line.subtotal(), line })
            .collect();
        Ok(BudgetPreview { items, totals })
    }

    pub async fn create_budget(
        &self,
        customer_id: Option<Uuid>,
        lines: &[BudgetLineInput],
        shipping_cost: Decimal,
        discount: Decimal,
    ) -> Result<Budget, AppError> {
        let customer_id = customer_id.ok_or(AppError::CustomerRequired)?;
        if lines.is_empty() {
            return Err(AppError::EmptyBudget);
        }

        let customer = self.customers.get_by_id(customer_id).await?;
        let draft = self.build_draft(lines).await?;
        let totals = draft.totals(shipping_cost, discount);

        let budget = self
            .repo
            .create(Budget {
                id: Uuid::nil(),
                customer: CustomerRef { id: customer.id, name: customer.name },
                items: draft.into_lines(),
                shipping_cost,
                discount,
                total: totals.total,
                created_at: Utc::now(),
                status: BudgetStatus::Pending,
            })
            .await?;

        tracing::info!(
            budget_id = %budget.id,
            customer_id = %customer_id,
            total = %budget.total,
            "Orçamento salvo"
        );
        Ok(budget)
    }

    pub async fn list_budgets(&self) -> Result<Vec<Budget>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_budget(&self, id: Uuid) -> Result<Budget, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn update_status(&self, id: Uuid, status: BudgetStatus) -> Result<Budget, AppError> {
        let mut budget = self.repo.get_by_id(id).await?;

        if !budget.status.can_transition_to(status) {
            return Err(AppError::InvalidStatusTransition {
                from: budget.status.to_string(),
                to: status.to_string(),
            });
        }

        let previous = budget.status;
        budget.status = status;
        let budget = self.repo.update(id, budget).await?;

        tracing::info!(budget_id = %id, %previous, status = %budget.status, "Status do orçamento alterado");
        Ok(budget)
    }
}
