use async_trait::async_trait;

use crate::domain::{Category, FieldSet, Post, QueryOptions, Resource};
use crate::error::RepoError;

/// Generic repository trait - the persistence client every resource is
/// stored through.
///
/// Each call is one independent round trip. Nothing here is transactional,
/// so a row may disappear between a `find_unique` and a later `update`.
#[async_trait]
pub trait BaseRepository<R: Resource>: Send + Sync {
    /// Insert a new row and return it with its generated id and timestamps.
    async fn create(&self, new: R::New) -> Result<R, RepoError>;

    /// Every row, ordered per `options`, restricted to `fields`.
    async fn find_many(
        &self,
        options: &QueryOptions<R::Field>,
        fields: &FieldSet<R::Field>,
    ) -> Result<Vec<R::View>, RepoError>;

    /// One row by primary key. `Ok(None)` when it does not exist.
    async fn find_unique(
        &self,
        id: i32,
        fields: &FieldSet<R::Field>,
    ) -> Result<Option<R::View>, RepoError>;

    /// Patch one row. Fails with [`RepoError::NotFound`] when the row is gone.
    async fn update(
        &self,
        id: i32,
        patch: R::Patch,
        fields: &FieldSet<R::Field>,
    ) -> Result<R::View, RepoError>;

    /// Remove one row. Fails with [`RepoError::NotFound`] when nothing was deleted.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Post repository.
pub trait PostRepository: BaseRepository<Post> {}

impl<T: BaseRepository<Post> + ?Sized> PostRepository for T {}

/// Category repository.
pub trait CategoryRepository: BaseRepository<Category> {}

impl<T: BaseRepository<Category> + ?Sized> CategoryRepository for T {}
