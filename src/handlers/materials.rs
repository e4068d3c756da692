// src/handlers/materials.rs

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
    models::catalog::{CostItem, CostUnit},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostItemPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Chapa MDF 15mm")]
    pub name: String,

    #[schema(example = "square-meter")]
    pub unit: CostUnit,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "89.90")]
    pub unit_price: Decimal,
}

// GET /api/materials
#[utoipa::path(
    get,
    path = "/api/materials",
    tag = "Materials",
    responses(
        (status = 200, description = "Lista de itens de custo", body = Vec<CostItem>)
    )
)]
pub async fn list_cost_items(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let items = app_state.catalog_service
        .list_cost_items()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

// POST /api/materials
#[utoipa::path(
    post,
    path = "/api/materials",
    tag = "Materials",
    request_body = CostItemPayload,
    responses(
        (status = 201, description = "Item de custo criado", body = CostItem),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_cost_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CostItemPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state.catalog_service
        .create_cost_item(&payload.name, payload.unit, payload.unit_price)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/materials/{id}
#[utoipa::path(
    get,
    path = "/api/materials/{id}",
    tag = "Materials",
    responses(
        (status = 200, description = "Item de custo", body = CostItem),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item de custo"))
)]
pub async fn get_cost_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let item = app_state.catalog_service
        .get_cost_item(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(item)))
}

// PUT /api/materials/{id}
#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    tag = "Materials",
    request_body = CostItemPayload,
    responses(
        (status = 200, description = "Item de custo atualizado", body = CostItem),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item de custo"))
)]
pub async fn update_cost_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<CostItemPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state.catalog_service
        .update_cost_item(id, &payload.name, payload.unit, payload.unit_price)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/materials/{id}
#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    tag = "Materials",
    responses(
        (status = 204, description = "Item de custo removido"),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do item de custo"))
)]
pub async fn delete_cost_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.catalog_service
        .delete_cost_item(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
