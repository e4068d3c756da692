// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro interno da aplicação. Services e repositórios só conhecem este tipo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{entity} {id} não encontrado")]
    NotFound { entity: &'static str, id: String },

    #[error("O nome do produto é obrigatório")]
    ProductNameRequired,

    #[error("Cliente obrigatório para o orçamento")]
    CustomerRequired,

    #[error("O orçamento precisa de pelo menos um produto")]
    EmptyBudget,

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Documento malformado: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound { entity, id: id.to_string() }
    }

    /// Código estável usado como chave de tradução.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::NotFound { .. } => "not_found",
            AppError::ProductNameRequired => "product_name_required",
            AppError::CustomerRequired => "customer_required",
            AppError::EmptyBudget => "empty_budget",
            AppError::InvalidStatusTransition { .. } => "invalid_status_transition",
            AppError::SerializationError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::ProductNameRequired
            | AppError::CustomerRequired
            | AppError::EmptyBudget => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            AppError::SerializationError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro interno na resposta HTTP, já traduzida para o idioma do pedido.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut fields: HashMap<String, Vec<String>> = HashMap::new();
                collect_field_errors(errors, "", locale, i18n, &mut fields);
                Some(json!(fields))
            }
            AppError::NotFound { entity, id } => Some(json!({ "entity": entity, "id": id })),
            AppError::InvalidStatusTransition { from, to } => {
                Some(json!({ "from": from, "to": to }))
            }
            _ => None,
        };

        ApiError {
            status,
            error: i18n.translate(&locale.0, self.code()),
            details,
        }
    }
}

// Achata erros aninhados: "cost_rows[0].duration.minutes"
fn collect_field_errors(
    errors: &ValidationErrors,
    prefix: &str,
    locale: &Locale,
    i18n: &I18nStore,
    fields: &mut HashMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        let code = e.message.as_deref().unwrap_or(&e.code);
                        i18n.translate(&locale.0, code)
                    })
                    .collect();
                fields.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_field_errors(inner, &path, locale, i18n, fields);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{path}[{index}]"), locale, i18n, fields);
                }
            }
        }
    }
}

// Resposta de erro que sai para o cliente HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
struct ApiErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            error: &self.error,
            details: self.details.as_ref(),
        });
        (self.status, body).into_response()
    }
}

// Sem idioma no contexto (ex: middleware), responde em inglês.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_translated_and_keeps_details() {
        let i18n = I18nStore::default();
        let api = AppError::not_found("product", "abc")
            .to_api_error(&Locale("pt".into()), &i18n);

        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Registro não encontrado.");
        assert_eq!(api.details, Some(json!({ "entity": "product", "id": "abc" })));
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let i18n = I18nStore::default();
        let api = AppError::InternalServerError(anyhow::anyhow!("pool closed"))
            .to_api_error(&Locale("en".into()), &i18n);

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool closed"));
    }
}
