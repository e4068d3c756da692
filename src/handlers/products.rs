// src/handlers/products.rs

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
    engine::pricing::PricingResult,
    models::catalog::{CostRow, HoursMinutes, Product},
    services::product_service::{ProductDraft, ProductPricingStatus, SavedProduct},
};

// ---
// Payloads
// ---

// Linha da calculadora. Itens em hora podem vir como `duration` (H:M).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostRowPayload {
    #[serde(alias = "materialId")]
    pub cost_item_id: Uuid,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "2")]
    pub quantity: Option<Decimal>,

    #[validate(nested)]
    pub duration: Option<HoursMinutes>,
}

impl CostRowPayload {
    fn into_cost_row(self) -> CostRow {
        let quantity = match self.duration {
            Some(duration) => duration.to_quantity(),
            None => self.quantity.unwrap_or(Decimal::ZERO),
        };
        CostRow { cost_item_id: self.cost_item_id, quantity }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default)]
    #[schema(example = "Armário sob medida")]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub cost_rows: Vec<CostRowPayload>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "10")]
    pub fixed_cost_percent: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "20")]
    pub profit_margin_percent: Decimal,
}

impl ProductPayload {
    fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            cost_rows: self.cost_rows.into_iter().map(CostRowPayload::into_cost_row).collect(),
            fixed_cost_percent: self.fixed_cost_percent,
            profit_margin_percent: self.profit_margin_percent,
        }
    }
}

// ---
// Handlers
// ---

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Catálogo de produtos e serviços", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let products = app_state.product_service
        .list_products()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}

// POST /api/products/pricing
// Calculadora sem salvar: o nome não é exigido aqui
#[utoipa::path(
    post,
    path = "/api/products/pricing",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Resumo do preço do rascunho", body = PricingResult),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn preview_pricing(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let pricing = app_state.product_service
        .preview_pricing(&payload.into_draft())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(pricing)))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado com o preço calculado", body = SavedProduct),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let saved = app_state.product_service
        .create_product(payload.into_draft())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(saved)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do produto"))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let product = app_state.product_service
        .get_product(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado com o preço recalculado", body = SavedProduct),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do produto"))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let saved = app_state.product_service
        .update_product(id, payload.into_draft())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(saved)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do produto"))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.product_service
        .delete_product(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/products/{id}/pricing
#[utoipa::path(
    get,
    path = "/api/products/{id}/pricing",
    tag = "Products",
    responses(
        (status = 200, description = "Preço guardado vs. preço com o catálogo atual", body = ProductPricingStatus),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do produto"))
)]
pub async fn get_pricing_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let status = app_state.product_service
        .pricing_status(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(status)))
}

// POST /api/products/{id}/reprice
#[utoipa::path(
    post,
    path = "/api/products/{id}/reprice",
    tag = "Products",
    responses(
        (status = 200, description = "Produto reprecificado", body = SavedProduct),
        (status = 404, description = "Não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do produto"))
)]
pub async fn reprice_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let saved = app_state.product_service
        .reprice_product(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(saved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(duration: serde_json::Value) -> ProductPayload {
        serde_json::from_value(json!({
            "name": "Instalação",
            "costRows": [{ "costItemId": Uuid::new_v4(), "duration": duration }],
            "fixedCostPercent": 0,
            "profitMarginPercent": 0
        }))
        .unwrap()
    }

    #[test]
    fn minutes_above_59_are_rejected() {
        let errors = payload(json!({ "hours": 1, "minutes": 90 })).validate().unwrap_err();
        let api = AppError::ValidationError(errors)
            .to_api_error(&Locale("pt".into()), &crate::common::i18n::I18nStore::default());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.unwrap();
        assert_eq!(
            details["cost_rows[0].duration.minutes"][0],
            "Os minutos devem estar entre 0 e 59."
        );
    }

    #[test]
    fn duration_becomes_decimal_hours() {
        let payload = payload(json!({ "hours": 1, "minutes": 30 }));
        assert!(payload.validate().is_ok());

        let draft = payload.into_draft();
        assert_eq!(draft.cost_rows[0].quantity, Decimal::new(15, 1));
    }
}
