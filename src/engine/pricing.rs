// src/engine/pricing.rs

//! Calculadora de preço de produto.
//!
//! custo variável -> + custo fixo (%) -> custo total -> + lucro (%) -> preço final.
//! Função pura: não falha, linhas inválidas contribuem com zero e viram avisos.
//! Valores fora do alcance do Decimal saturam em `Decimal::MAX`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::catalog::{CostItem, CostRow, CostUnit, HoursMinutes, Product};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Linha que não entrou no custo variável.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PricingWarning {
    #[serde(rename_all = "camelCase")]
    UnresolvedCostItem { row: usize, cost_item_id: Uuid },
    #[serde(rename_all = "camelCase")]
    NonPositiveQuantity { row: usize, cost_item_id: Uuid },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowCost {
    pub cost_item_id: Uuid,
    // None quando o item não existe mais no catálogo
    pub unit: Option<CostUnit>,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    // Itens em hora: a mesma quantidade em H:M, para a tabela da calculadora
    pub duration: Option<HoursMinutes>,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub total_variable_cost: Decimal,
    pub fixed_cost_value: Decimal,
    pub total_product_cost: Decimal,
    pub profit_value: Decimal,
    pub final_sale_price: Decimal,
    pub rows: Vec<RowCost>,
    pub warnings: Vec<PricingWarning>,
}

impl PricingResult {
    /// Grava os campos desnormalizados no produto.
    pub fn apply_to(&self, product: &mut Product, priced_at: DateTime<Utc>) {
        product.total_variable_cost = self.total_variable_cost;
        product.fixed_cost_value = self.fixed_cost_value;
        product.total_product_cost = self.total_product_cost;
        product.profit_value = self.profit_value;
        product.final_sale_price = self.final_sale_price;
        product.priced_at = Some(priced_at);
    }

    /// O cache do produto ainda bate com este cálculo?
    pub fn matches(&self, product: &Product) -> bool {
        product.total_variable_cost == self.total_variable_cost
            && product.fixed_cost_value == self.fixed_cost_value
            && product.total_product_cost == self.total_product_cost
            && product.profit_value == self.profit_value
            && product.final_sale_price == self.final_sale_price
    }
}

/// Indexa um snapshot da coleção `materials` por id.
pub fn catalog_index(items: Vec<CostItem>) -> HashMap<Uuid, CostItem> {
    items.into_iter().map(|item| (item.id, item)).collect()
}

pub fn compute_product_pricing(
    cost_rows: &[CostRow],
    catalog: &HashMap<Uuid, CostItem>,
    fixed_cost_percent: Decimal,
    profit_margin_percent: Decimal,
) -> PricingResult {
    let mut rows = Vec::with_capacity(cost_rows.len());
    let mut warnings = Vec::new();
    let mut total_variable_cost = Decimal::ZERO;

    for (index, row) in cost_rows.iter().enumerate() {
        let Some(item) = catalog.get(&row.cost_item_id) else {
            warnings.push(PricingWarning::UnresolvedCostItem {
                row: index,
                cost_item_id: row.cost_item_id,
            });
            rows.push(RowCost {
                cost_item_id: row.cost_item_id,
                unit: None,
                unit_price: Decimal::ZERO,
                quantity: row.quantity,
                duration: None,
                subtotal: Decimal::ZERO,
            });
            continue;
        };

        let subtotal = if row.quantity > Decimal::ZERO {
            item.unit_price.saturating_mul(row.quantity)
        } else {
            warnings.push(PricingWarning::NonPositiveQuantity {
                row: index,
                cost_item_id: row.cost_item_id,
            });
            Decimal::ZERO
        };

        total_variable_cost = total_variable_cost.saturating_add(subtotal);
        rows.push(RowCost {
            cost_item_id: row.cost_item_id,
            unit: Some(item.unit),
            unit_price: item.unit_price,
            quantity: row.quantity,
            duration: item
                .unit
                .is_time_based()
                .then(|| HoursMinutes::from_quantity(row.quantity)),
            subtotal,
        });
    }

    let fixed_cost_value = percent_of(total_variable_cost, fixed_cost_percent);
    let total_product_cost = total_variable_cost.saturating_add(fixed_cost_value);
    let profit_value = percent_of(total_product_cost, profit_margin_percent);
    let final_sale_price = total_product_cost.saturating_add(profit_value);

    PricingResult {
        total_variable_cost,
        fixed_cost_value,
        total_product_cost,
        profit_value,
        final_sale_price,
        rows,
        warnings,
    }
}

fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    value.saturating_mul(percent) / HUNDRED
}
