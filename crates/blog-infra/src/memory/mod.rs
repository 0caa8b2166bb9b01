//! In-memory repositories - used when no database is configured, and in tests.

mod repository;
mod table;

pub use repository::{InMemoryCategoryRepository, InMemoryDatabase, InMemoryPostRepository};
