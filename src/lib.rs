// src/lib.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod engine;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

/// Router completo da API, já com o estado.
pub fn app(app_state: AppState) -> Router {
    let material_routes = Router::new()
        .route("/"
               ,get(handlers::materials::list_cost_items)
               .post(handlers::materials::create_cost_item)
        )
        .route("/{id}"
               ,get(handlers::materials::get_cost_item)
               .put(handlers::materials::update_cost_item)
               .delete(handlers::materials::delete_cost_item)
        );

    let product_routes = Router::new()
        .route("/"
               ,get(handlers::products::list_products)
               .post(handlers::products::create_product)
        )
        // Calculadora sem salvar
        .route("/pricing"
               ,post(handlers::products::preview_pricing)
        )
        .route("/{id}"
               ,get(handlers::products::get_product)
               .put(handlers::products::update_product)
               .delete(handlers::products::delete_product)
        )
        .route("/{id}/pricing"
               ,get(handlers::products::get_pricing_status)
        )
        .route("/{id}/reprice"
               ,post(handlers::products::reprice_product)
        );

    let customer_routes = Router::new()
        .route("/"
               ,get(handlers::crm::list_customers)
               .post(handlers::crm::create_customer)
        )
        .route("/{id}"
               ,get(handlers::crm::get_customer)
               .put(handlers::crm::update_customer)
               .delete(handlers::crm::delete_customer)
        );

    let budget_routes = Router::new()
        .route("/"
               ,get(handlers::budgets::list_budgets)
               .post(handlers::budgets::create_budget)
        )
        .route("/preview"
               ,post(handlers::budgets::preview_budget)
        )
        .route("/{id}"
               ,get(handlers::budgets::get_budget)
        )
        .route("/{id}/status"
               ,patch(handlers::budgets::update_budget_status)
        );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/materials", material_routes)
        .nest("/api/products", product_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/budgets", budget_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(app_state)
}
