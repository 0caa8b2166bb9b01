//! Entity services - the create/query/read/update/delete lifecycle shared by
//! every resource, plus the post operations guarded by the policy.

mod entity;
mod post;
mod retry;

pub use entity::EntityService;
pub use retry::RetryPolicy;

use crate::domain::{Category, Post};

pub type PostService = EntityService<Post>;
pub type CategoryService = EntityService<Category>;
