pub mod auth;
pub mod documento;
pub mod fornecedor;
pub mod produto;
