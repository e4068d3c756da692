// src/models/budget.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BudgetStatus {
    #[default]
    #[serde(alias = "Pendente")]
    Pending,
    #[serde(alias = "Aprovado")]
    Approved,
    #[serde(alias = "Recusado")]
    Rejected,
}

impl BudgetStatus {
    /// Só orçamentos pendentes podem ser decididos; repetir o mesmo status é permitido.
    pub fn can_transition_to(self, next: BudgetStatus) -> bool {
        self == next || self == BudgetStatus::Pending
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Pending => write!(f, "Pending"),
            BudgetStatus::Approved => write!(f, "Approved"),
            BudgetStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

// --- Structs ---

// Cópia do cliente no momento em que o orçamento foi salvo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    #[schema(example = 1718031234567_i64)]
    pub line_id: i64,
    pub product_id: Uuid,
    #[schema(example = "Armário sob medida")]
    pub name: String,
    // Preço congelado no momento em que a linha foi adicionada
    #[serde(alias = "price")]
    #[schema(example = "264.00")]
    pub unit_price: Decimal,
    #[serde(default)]
    #[schema(example = "220.00")]
    pub unit_cost: Decimal,
    #[schema(example = 2)]
    pub quantity: u32,
}

impl BudgetLine {
    // Satura em Decimal::MAX em vez de estourar
    pub fn subtotal(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn cost(&self) -> Decimal {
        self.unit_cost.saturating_mul(Decimal::from(self.quantity))
    }
}

// --- ORÇAMENTO (coleção `budgets`) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub customer: CustomerRef,
    pub items: Vec<BudgetLine>,
    #[schema(example = "10.00")]
    pub shipping_cost: Decimal,
    #[schema(example = "5.00")]
    pub discount: Decimal,
    #[schema(example = "56.00")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BudgetStatus,
}
