// src/handlers.rs

pub mod auth;
pub mod fornecedores;
pub mod produtos;

/// Id da rota diferente do id do corpo numa atualização.
pub const IDS_DIFERENTES: &str = "Os ids informados não são iguais!";
