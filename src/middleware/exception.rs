// src/middleware/exception.rs

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

// Panic em handler: loga e devolve 500 sem corpo (detalhe só no log)
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detalhe = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "panic sem mensagem".to_string()
    };

    tracing::error!("Erro não tratado na requisição: {}", detalhe);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn panic_becomes_empty_500() {
        let response = handle_panic(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
