// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Cards do topo do painel de orçamentos
#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_value: Decimal,  // Soma dos totais de todos os orçamentos
    pub total_profit: Decimal, // Total menos o custo congelado das linhas
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
}
