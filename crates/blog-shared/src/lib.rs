//! # Blog Shared
//!
//! Request and response types shared between the API server and its clients.
//! Request DTOs carry their validation rules; anything failing them is
//! rejected before it reaches a service.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
