//! Propriedades da calculadora de preço e do total do orçamento.

use std::collections::HashMap;
use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use orcamentos::engine::pricing::{catalog_index, compute_product_pricing, PricingWarning};
use orcamentos::engine::quote::{coerce_quantity, compute_quote_total, QuantityInput};
use orcamentos::models::budget::BudgetLine;
use orcamentos::models::catalog::{CostItem, CostRow, CostUnit};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// Preço com centavos, quantidade com até duas casas, percentuais inteiros
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=100).prop_map(Decimal::from)
}

fn catalog_with(rows: &[(Decimal, Decimal)]) -> (HashMap<Uuid, CostItem>, Vec<CostRow>) {
    let mut items = Vec::new();
    let mut cost_rows = Vec::new();
    for (unit_price, quantity) in rows {
        let id = Uuid::new_v4();
        items.push(CostItem {
            id,
            name: "Item".to_string(),
            unit: CostUnit::Unit,
            unit_price: *unit_price,
        });
        cost_rows.push(CostRow { cost_item_id: id, quantity: *quantity });
    }
    (catalog_index(items), cost_rows)
}

fn line(unit_price: Decimal, quantity: u32) -> BudgetLine {
    BudgetLine {
        line_id: 1,
        product_id: Uuid::new_v4(),
        name: "Produto".to_string(),
        unit_price,
        unit_cost: Decimal::ZERO,
        quantity,
    }
}

#[test]
fn worked_example_from_the_calculator() {
    // 2 m² a 50 + 4 h a 25 = 200; +10% fixo = 220; +20% lucro = 264
    let (catalog, rows) = catalog_with(&[(dec("50"), dec("2")), (dec("25"), dec("4"))]);
    let result = compute_product_pricing(&rows, &catalog, dec("10"), dec("20"));

    assert_eq!(result.total_variable_cost, dec("200"));
    assert_eq!(result.fixed_cost_value, dec("20"));
    assert_eq!(result.total_product_cost, dec("220"));
    assert_eq!(result.profit_value, dec("44"));
    assert_eq!(result.final_sale_price, dec("264"));
    assert!(result.warnings.is_empty());
}

proptest! {
    #[test]
    fn variable_cost_is_sum_of_row_subtotals(
        rows in prop::collection::vec((price(), quantity()), 0..6),
        fixed in percent(),
        profit in percent(),
    ) {
        let (catalog, cost_rows) = catalog_with(&rows);
        let result = compute_product_pricing(&cost_rows, &catalog, fixed, profit);

        let expected: Decimal = rows.iter().map(|(p, q)| p * q).sum();
        prop_assert_eq!(result.total_variable_cost, expected);
        prop_assert_eq!(
            result.rows.iter().map(|r| r.subtotal).sum::<Decimal>(),
            result.total_variable_cost
        );
    }

    #[test]
    fn cost_and_price_follow_the_percentages(
        rows in prop::collection::vec((price(), quantity()), 0..6),
        fixed in percent(),
        profit in percent(),
    ) {
        let (catalog, cost_rows) = catalog_with(&rows);
        let result = compute_product_pricing(&cost_rows, &catalog, fixed, profit);
        let hundred = Decimal::ONE_HUNDRED;

        prop_assert_eq!(
            result.total_product_cost,
            result.total_variable_cost * (hundred + fixed) / hundred
        );
        prop_assert_eq!(
            result.final_sale_price,
            result.total_product_cost * (hundred + profit) / hundred
        );
        prop_assert!(result.final_sale_price >= result.total_product_cost);
        prop_assert!(result.total_product_cost >= result.total_variable_cost);
    }

    #[test]
    fn unknown_cost_item_adds_nothing_and_warns(
        rows in prop::collection::vec((price(), quantity()), 0..6),
        fixed in percent(),
        profit in percent(),
    ) {
        let (catalog, mut cost_rows) = catalog_with(&rows);
        let baseline = compute_product_pricing(&cost_rows, &catalog, fixed, profit);

        let ghost = Uuid::new_v4();
        cost_rows.push(CostRow { cost_item_id: ghost, quantity: dec("3") });
        let result = compute_product_pricing(&cost_rows, &catalog, fixed, profit);

        prop_assert_eq!(result.final_sale_price, baseline.final_sale_price);
        let expected_warning = PricingWarning::UnresolvedCostItem {
            row: rows.len(),
            cost_item_id: ghost,
        };
        prop_assert!(result.warnings.contains(&expected_warning));
    }

    #[test]
    fn quote_total_is_never_negative(
        prices in prop::collection::vec((price(), 1u32..50), 0..6),
        shipping in price(),
        discount in price(),
    ) {
        let lines: Vec<_> = prices.iter().map(|(p, q)| line(*p, *q)).collect();
        prop_assert!(compute_quote_total(&lines, shipping, discount) >= Decimal::ZERO);
    }

    #[test]
    fn more_shipping_never_lowers_the_total(
        prices in prop::collection::vec((price(), 1u32..50), 0..6),
        shipping in price(),
        extra in price(),
        discount in price(),
    ) {
        let lines: Vec<_> = prices.iter().map(|(p, q)| line(*p, *q)).collect();
        let base = compute_quote_total(&lines, shipping, discount);
        let more = compute_quote_total(&lines, shipping + extra, discount);
        prop_assert!(more >= base);
    }

    #[test]
    fn more_quantity_on_a_line_never_lowers_the_total(
        prices in prop::collection::vec((price(), 1u32..50), 1..6),
        pick in any::<prop::sample::Index>(),
        extra in 0u32..50,
        shipping in price(),
        discount in price(),
    ) {
        let mut lines: Vec<_> = prices.iter().map(|(p, q)| line(*p, *q)).collect();
        let base = compute_quote_total(&lines, shipping, discount);

        let target = pick.index(lines.len());
        lines[target].quantity += extra;
        let more = compute_quote_total(&lines, shipping, discount);
        prop_assert!(more >= base);
    }

    #[test]
    fn more_discount_never_raises_the_total(
        prices in prop::collection::vec((price(), 1u32..50), 0..6),
        shipping in price(),
        discount in price(),
        extra in price(),
    ) {
        let lines: Vec<_> = prices.iter().map(|(p, q)| line(*p, *q)).collect();
        let base = compute_quote_total(&lines, shipping, discount);
        let more = compute_quote_total(&lines, shipping, discount + extra);
        prop_assert!(more <= base);
    }

    #[test]
    fn coerced_quantity_is_at_least_one(n in any::<i64>(), text in ".{0,12}") {
        prop_assert!(coerce_quantity(&QuantityInput::Integer(n)) >= 1);
        prop_assert!(coerce_quantity(&QuantityInput::Text(text)) >= 1);
    }
}
