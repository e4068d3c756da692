// src/handlers/budgets.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        validation::validate_not_negative,
    },
    config::AppState,
    middleware::i18n::Locale,
    models::budget::{Budget, BudgetStatus},
    services::budget_service::{BudgetLineInput, BudgetPreview},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetPayload {
    pub customer_id: Option<Uuid>,

    #[serde(default)]
    pub items: Vec<BudgetLineInput>,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "15")]
    pub shipping_cost: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "5")]
    pub discount: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    #[schema(example = "Approved")]
    pub status: BudgetStatus,
}

// POST /api/budgets/preview
// Mesmo cálculo do salvar, sem exigir cliente
#[utoipa::path(
    post,
    path = "/api/budgets/preview",
    tag = "Budgets",
    request_body = CreateBudgetPayload,
    responses(
        (status = 200, description = "Linhas e totais do orçamento em montagem", body = BudgetPreview),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn preview_budget(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateBudgetPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let preview = app_state.budget_service
        .preview_budget(&payload.items, payload.shipping_cost, payload.discount)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(preview)))
}

// POST /api/budgets
#[utoipa::path(
    post,
    path = "/api/budgets",
    tag = "Budgets",
    request_body = CreateBudgetPayload,
    responses(
        (status = 201, description = "Orçamento salvo como pendente", body = Budget),
        (status = 400, description = "Cliente ausente, orçamento vazio ou dados inválidos"),
        (status = 404, description = "Cliente ou produto não encontrado")
    )
)]
pub async fn create_budget(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateBudgetPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let budget = app_state.budget_service
        .create_budget(
            payload.customer_id,
            &payload.items,
            payload.shipping_cost,
            payload.discount,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(budget)))
}

// GET /api/budgets
#[utoipa::path(
    get,
    path = "/api/budgets",
    tag = "Budgets",
    responses(
        (status = 200, description = "Histórico de orçamentos", body = Vec<Budget>)
    )
)]
pub async fn list_budgets(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let budgets = app_state.budget_service
        .list_budgets()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(budgets)))
}

// GET /api/budgets/{id}
#[utoipa::path(
    get,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    responses(
        (status = 200, description = "Orçamento", body = Budget),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do orçamento"))
)]
pub async fn get_budget(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let budget = app_state.budget_service
        .get_budget(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(budget)))
}

// PATCH /api/budgets/{id}/status
#[utoipa::path(
    patch,
    path = "/api/budgets/{id}/status",
    tag = "Budgets",
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Budget),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Transição de status não permitida")
    ),
    params(("id" = Uuid, Path, description = "ID do orçamento"))
)]
pub async fn update_budget_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let budget = app_state.budget_service
        .update_status(id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(budget)))
}
