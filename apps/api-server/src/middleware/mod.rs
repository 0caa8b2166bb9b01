//! Middleware modules: request identity and error rendering.

pub mod auth;
pub mod error;
