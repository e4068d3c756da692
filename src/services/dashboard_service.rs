// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::Repository,
    models::{
        budget::{Budget, BudgetLine, BudgetStatus},
        dashboard::DashboardSummary,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    budgets: Repository<Budget>,
}

impl DashboardService {
    pub fn new(budgets: Repository<Budget>) -> Self {
        Self { budgets }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let budgets = self.budgets.list_all().await?;
        Ok(summarize(&budgets))
    }
}

pub fn summarize(budgets: &[Budget]) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    let mut total_cost = Decimal::ZERO;

    for budget in budgets {
        summary.total_value = summary.total_value.saturating_add(budget.total);
        total_cost = budget
            .items
            .iter()
            .map(BudgetLine::cost)
            .fold(total_cost, Decimal::saturating_add);

        match budget.status {
            BudgetStatus::Pending => summary.pending_count += 1,
            BudgetStatus::Approved => summary.approved_count += 1,
            BudgetStatus::Rejected => summary.rejected_count += 1,
        }
    }

    summary.total_profit = summary.total_value.saturating_sub(total_cost);
    summary
}
