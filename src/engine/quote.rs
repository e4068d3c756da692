// src/engine/quote.rs

//! Montagem e total de um orçamento em edição.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::budget::BudgetLine;
use crate::models::catalog::Product;

/// max(0, Σ preço·quantidade + frete − desconto). O piso é aplicado uma única vez, no fim.
pub fn compute_quote_total(lines: &[BudgetLine], shipping_cost: Decimal, discount: Decimal) -> Decimal {
    items_total(lines)
        .saturating_add(shipping_cost)
        .saturating_sub(discount)
        .max(Decimal::ZERO)
}

pub fn items_total(lines: &[BudgetLine]) -> Decimal {
    lines
        .iter()
        .map(BudgetLine::subtotal)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Quantidade como veio do formulário: número ou texto.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuantityInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Default for QuantityInput {
    fn default() -> Self {
        QuantityInput::Integer(1)
    }
}

/// Inteiro >= 1. Parte fracionária é descartada; entrada inválida ou menor que 1 vira 1.
pub fn coerce_quantity(input: &QuantityInput) -> u32 {
    let parsed = match input {
        QuantityInput::Integer(n) => Some(*n),
        QuantityInput::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        QuantityInput::Float(_) => None,
        QuantityInput::Text(s) => leading_integer(s),
    };

    match parsed {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

// "12abc" -> 12, "  -3" -> -3, "abc" -> None
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| n * sign)
        .or(Some(i64::MAX * sign))
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub items_total: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Orçamento em edição. Cada produto aparece no máximo uma vez.
#[derive(Debug, Clone, Default)]
pub struct QuoteDraft {
    lines: Vec<BudgetLine>,
    last_line_id: i64,
}

impl QuoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[BudgetLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<BudgetLine> {
        self.lines
    }

    pub fn contains_product(&self, product_id: Uuid) -> bool {
        self.lines.iter().any(|line| line.product_id == product_id)
    }

    /// Adiciona o produto com quantidade 1, congelando nome, preço e custo.
    /// Retorna `None` se o produto já está no orçamento.
    pub fn add_product(&mut self, product: &Product) -> Option<i64> {
        if self.contains_product(product.id) {
            return None;
        }
        let line_id = self.next_line_id();
        self.lines.push(BudgetLine {
            line_id,
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.final_sale_price,
            unit_cost: product.total_product_cost,
            quantity: 1,
        });
        Some(line_id)
    }

    pub fn set_quantity(&mut self, line_id: i64, input: &QuantityInput) -> bool {
        match self.lines.iter_mut().find(|line| line.line_id == line_id) {
            Some(line) => {
                line.quantity = coerce_quantity(input);
                true
            }
            None => false,
        }
    }

    pub fn remove_line(&mut self, line_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.line_id != line_id);
        self.lines.len() != before
    }

    pub fn totals(&self, shipping_cost: Decimal, discount: Decimal) -> QuoteTotals {
        QuoteTotals {
            items_total: items_total(&self.lines),
            shipping_cost,
            discount,
            total: compute_quote_total(&self.lines, shipping_cost, discount),
        }
    }

    // Baseado no relógio, mas sempre crescente dentro do rascunho
    fn next_line_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_line_id + 1);
        self.last_line_id = id;
        id
    }
}
