pub mod auth;
pub mod fornecedor;
pub mod produto;
