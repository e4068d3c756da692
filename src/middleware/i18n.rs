// src/middleware/i18n.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};

use crate::config::AppState;

// Idioma do pedido, extraído do Accept-Language
#[derive(Debug, Clone, PartialEq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale("en".to_string())
    }
}

impl Locale {
    /// "pt-BR;q=0.9, en" -> Some("pt")
    pub fn from_header(header_str: &str) -> Option<Self> {
        accept_language::parse(header_str)
            .into_iter()
            .find(|tag| !tag.trim().is_empty())
            .map(|tag| tag.split('-').next().unwrap_or(&tag).trim().to_lowercase())
            .map(Locale)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(Locale::from_header)
            .unwrap_or_else(|| Locale(app_state.config.default_locale.clone()));

        Ok(locale)
    }
}
