//! Domain entities - the core business objects.

mod category;
mod post;
mod projection;
mod resource;
mod user;

pub use category::{Category, CategoryField, CategoryPatch, CategoryView, NewCategory};
pub use post::{NewPost, Post, PostField, PostPatch, PostView};
pub use projection::{Field, FieldSet, ParseFieldError, QueryOptions, SortOrder};
pub use resource::Resource;
pub use user::{Requester, Right, Role};
