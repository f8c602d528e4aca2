// src/middleware.rs

pub mod auth;
pub mod exception;
pub mod i18n;
pub mod rbac;
