// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

// (código, inglês, português)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation_failed", "One or more fields are invalid.", "Um ou mais campos são inválidos."),
    ("not_found", "Record not found.", "Registro não encontrado."),
    ("product_name_required", "Please give the product/service a name.", "Por favor, dê um nome ao produto/serviço."),
    ("customer_required", "Please select a customer.", "Por favor, selecione um cliente."),
    ("empty_budget", "Add at least one product to the budget.", "Adicione pelo menos um produto ao orçamento."),
    ("invalid_status_transition", "This budget has already been decided.", "Este orçamento já foi decidido."),
    ("internal_error", "An unexpected error occurred.", "Ocorreu um erro inesperado."),
    // Códigos de campo (validator)
    ("required", "This field is required.", "Este campo é obrigatório."),
    ("invalid_email", "Invalid e-mail address.", "E-mail inválido."),
    ("negative_value", "The value cannot be negative.", "O valor não pode ser negativo."),
    ("minutes_out_of_range", "Minutes must be between 0 and 59.", "Os minutos devem estar entre 0 e 59."),
];

/// Tabela de mensagens traduzidas, compartilhada pelo AppState.
#[derive(Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<(&'static str, &'static str), &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut messages = HashMap::new();
        for (code, en, pt) in MESSAGES {
            messages.insert(("en", *code), *en);
            messages.insert(("pt", *code), *pt);
        }
        Self { messages: Arc::new(messages) }
    }
}

impl I18nStore {
    /// Idioma pedido -> inglês -> o próprio código.
    pub fn translate(&self, lang: &str, code: &str) -> String {
        self.messages
            .get(&(lang, code))
            .or_else(|| self.messages.get(&("en", code)))
            .map(|m| m.to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_then_code() {
        let store = I18nStore::default();
        assert_eq!(store.translate("pt", "required"), "Este campo é obrigatório.");
        assert_eq!(store.translate("fr", "required"), "This field is required.");
        assert_eq!(store.translate("pt", "unknown_code"), "unknown_code");
    }
}
