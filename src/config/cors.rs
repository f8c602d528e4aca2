// src/config/cors.rs

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::{AppSettings, Environment};

/// Development: liberado geral.
/// Production: só leitura (GET), a partir da origem configurada ou de um
/// subdomínio dela.
pub fn cors_layer(settings: &AppSettings) -> CorsLayer {
    match settings.environment {
        Environment::Development => CorsLayer::permissive(),
        Environment::Production => {
            let base = settings.cors_origem.clone();
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                    origin.to_str().is_ok_and(|origin| origem_permitida(&base, origin))
                }))
                .allow_methods([Method::GET])
                .allow_headers(Any)
        }
    }
}

/// `http://desenvolvedor.io` aceita a própria origem e `http://*.desenvolvedor.io`.
pub fn origem_permitida(base: &str, origin: &str) -> bool {
    if origin.eq_ignore_ascii_case(base) {
        return true;
    }

    let Some((scheme, host)) = base.split_once("://") else {
        return false;
    };
    let Some((origin_scheme, origin_host)) = origin.split_once("://") else {
        return false;
    };

    origin_scheme.eq_ignore_ascii_case(scheme)
        && origin_host
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", host.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://desenvolvedor.io";

    #[test]
    fn same_origin_and_subdomains_are_allowed() {
        assert!(origem_permitida(BASE, "http://desenvolvedor.io"));
        assert!(origem_permitida(BASE, "http://app.desenvolvedor.io"));
        assert!(origem_permitida(BASE, "http://a.b.desenvolvedor.io"));
    }

    #[test]
    fn other_origins_are_rejected() {
        assert!(!origem_permitida(BASE, "https://app.desenvolvedor.io"));
        assert!(!origem_permitida(BASE, "http://maldesenvolvedor.io"));
        assert!(!origem_permitida(BASE, "http://desenvolvedor.io.evil.com"));
        assert!(!origem_permitida(BASE, "null"));
    }
}
