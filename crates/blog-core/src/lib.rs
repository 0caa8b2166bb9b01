//! # Blog Core
//!
//! The domain layer of the blog API.
//! Entities, field projections, the authorization policy and the entity
//! services live here, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{CategoryService, EntityService, PostService, RetryPolicy};
