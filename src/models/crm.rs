// src/models/crm.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- CLIENTE (coleção `customers`) ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[schema(example = "(11) 99999-8888")]
    pub phone: Option<String>,

    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    // CNPJ/CPF. Documentos antigos usam a chave `cnpj`.
    #[serde(alias = "cnpj")]
    #[schema(example = "12.345.678/0001-99")]
    pub tax_id: Option<String>,
}
