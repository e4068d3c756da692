// src/docs.rs

use utoipa::OpenApi;
use crate::{engine, handlers, models, services};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Materials ---
        handlers::materials::list_cost_items,
        handlers::materials::create_cost_item,
        handlers::materials::get_cost_item,
        handlers::materials::update_cost_item,
        handlers::materials::delete_cost_item,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::preview_pricing,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::get_pricing_status,
        handlers::products::reprice_product,

        // --- Customers ---
        handlers::crm::list_customers,
        handlers::crm::create_customer,
        handlers::crm::get_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,

        // --- Budgets ---
        handlers::budgets::preview_budget,
        handlers::budgets::create_budget,
        handlers::budgets::list_budgets,
        handlers::budgets::get_budget,
        handlers::budgets::update_budget_status,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Catalog ---
            models::catalog::CostUnit,
            models::catalog::CostItem,
            models::catalog::CostRow,
            models::catalog::HoursMinutes,
            models::catalog::Product,

            // --- Pricing ---
            engine::pricing::PricingWarning,
            engine::pricing::RowCost,
            engine::pricing::PricingResult,
            engine::quote::QuoteTotals,
            services::product_service::SavedProduct,
            services::product_service::ProductPricingStatus,

            // --- CRM ---
            models::crm::Customer,

            // --- Budgets ---
            models::budget::BudgetStatus,
            models::budget::CustomerRef,
            models::budget::BudgetLine,
            models::budget::Budget,
            services::budget_service::BudgetLineInput,
            services::budget_service::PreviewLine,
            services::budget_service::BudgetPreview,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,

            // --- Payloads ---
            handlers::materials::CostItemPayload,
            handlers::products::CostRowPayload,
            handlers::products::ProductPayload,
            handlers::crm::CustomerPayload,
            handlers::budgets::CreateBudgetPayload,
            handlers::budgets::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "Materials", description = "Matérias-primas e serviços com preço unitário"),
        (name = "Products", description = "Produtos e calculadora de preço"),
        (name = "Customers", description = "Cadastro de clientes"),
        (name = "Budgets", description = "Montagem e histórico de orçamentos"),
        (name = "Dashboard", description = "Indicadores dos orçamentos")
    )
)]
pub struct ApiDoc;
