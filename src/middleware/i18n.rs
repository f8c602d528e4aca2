// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

pub const IDIOMA_PADRAO: &str = "pt";

/// Idioma preferido do cliente, só a parte primária da tag ("pt-BR" vira "pt").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Self(IDIOMA_PADRAO.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| {
                accept_language::parse(raw)
                    .first()
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_ascii_lowercase())
            })
            .map(Locale)
            .unwrap_or_default();

        Ok(locale)
    }
}
