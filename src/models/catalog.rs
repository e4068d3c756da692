// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- 1. Unidades de Medida ---
// Serializa em kebab-case; aceita os nomes antigos do catálogo em português.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CostUnit {
    #[serde(alias = "unidade")]
    Unit,
    #[serde(alias = "metro")]
    Meter,
    #[serde(alias = "m2")]
    SquareMeter,
    #[serde(alias = "kg")]
    Kilogram,
    #[serde(alias = "litro")]
    Liter,
    #[serde(alias = "hora")]
    Hour,
}

impl CostUnit {
    // Quantidade digitada como horas + minutos
    pub fn is_time_based(&self) -> bool {
        matches!(self, CostUnit::Hour)
    }
}

// --- 2. Item de Custo (coleção `materials`) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Chapa MDF 15mm")]
    pub name: String,
    pub unit: CostUnit,
    #[schema(example = "89.90")]
    pub unit_price: Decimal,
}

// --- 3. Linha de custo dentro de um Produto ---
// Referência ao item de custo, não posse: apagar o item deixa a linha órfã.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostRow {
    pub cost_item_id: Uuid,
    // Para itens em hora: horas + minutos/60
    #[schema(example = "2.5")]
    pub quantity: Decimal,
}

/// Duração em horas e minutos, guardada como um único decimal de horas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct HoursMinutes {
    pub hours: u32,
    #[validate(range(max = 59, message = "minutes_out_of_range"))]
    pub minutes: u32,
}

impl HoursMinutes {
    pub fn to_quantity(self) -> Decimal {
        Decimal::from(self.hours) + Decimal::from(self.minutes) / Decimal::from(60)
    }

    /// Chão para as horas, resto arredondado para minutos.
    pub fn from_quantity(quantity: Decimal) -> Self {
        if quantity <= Decimal::ZERO {
            return HoursMinutes { hours: 0, minutes: 0 };
        }
        let whole = quantity.floor();
        let minutes = ((quantity - whole) * Decimal::from(60))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        HoursMinutes {
            hours: whole.to_u32().unwrap_or(u32::MAX),
            minutes: minutes.to_u32().unwrap_or(0),
        }
    }
}

// --- 4. Produto / Serviço (coleção `products`) ---
// Os cinco valores calculados são um cache do motor de preços no momento do último save.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Armário sob medida")]
    pub name: String,
    pub cost_rows: Vec<CostRow>,
    #[schema(example = "10")]
    pub fixed_cost_percent: Decimal,
    #[schema(example = "20")]
    pub profit_margin_percent: Decimal,

    #[schema(example = "200.00")]
    pub total_variable_cost: Decimal,
    #[schema(example = "20.00")]
    pub fixed_cost_value: Decimal,
    #[schema(example = "220.00")]
    pub total_product_cost: Decimal,
    #[schema(example = "44.00")]
    pub profit_value: Decimal,
    #[schema(example = "264.00")]
    pub final_sale_price: Decimal,

    // Produtos antigos não têm a data de precificação
    #[serde(default)]
    pub priced_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn hours_and_minutes_round_trip_through_decimal_hours() {
        let duration = HoursMinutes { hours: 2, minutes: 30 };
        assert_eq!(duration.to_quantity(), dec("2.5"));
        assert_eq!(HoursMinutes::from_quantity(dec("2.5")), duration);
    }

    #[test]
    fn from_quantity_rounds_the_minutes() {
        // 1h20 vira 1.3333...; a volta deve dar 20 minutos
        let q = HoursMinutes { hours: 1, minutes: 20 }.to_quantity();
        assert_eq!(HoursMinutes::from_quantity(q), HoursMinutes { hours: 1, minutes: 20 });
        assert_eq!(HoursMinutes::from_quantity(Decimal::ZERO), HoursMinutes { hours: 0, minutes: 0 });
    }

    #[test]
    fn accepts_legacy_portuguese_units() {
        let unit: CostUnit = serde_json::from_str("\"hora\"").unwrap();
        assert_eq!(unit, CostUnit::Hour);
        let unit: CostUnit = serde_json::from_str("\"m2\"").unwrap();
        assert_eq!(unit, CostUnit::SquareMeter);
        assert_eq!(serde_json::to_string(&CostUnit::SquareMeter).unwrap(), "\"square-meter\"");
    }
}
