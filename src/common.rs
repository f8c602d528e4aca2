pub mod error;
pub mod extractors;
pub mod i18n;
pub mod notificador;
pub mod response;
