//! In-memory repositories over shared tables behind async `RwLock`s.
//!
//! The tables enforce the `posts.category_id` foreign key the way the
//! Postgres schema does: a post may only name an existing category, and
//! deleting a category clears `category_id` on its posts. Locks are always
//! taken categories first, then posts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{
    Category, CategoryField, CategoryPatch, CategoryView, FieldSet, NewCategory, NewPost, Post,
    PostField, PostPatch, PostView, QueryOptions, Resource,
};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

use super::table::Table;

#[derive(Default)]
struct Tables {
    categories: RwLock<Table<Category>>,
    posts: RwLock<Table<Post>>,
}

/// The blog tables, held in process memory. Data is lost on restart.
///
/// Every repository handed out by one database sees the same rows.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            tables: Arc::clone(&self.tables),
        }
    }
}

fn check_category(categories: &Table<Category>, category_id: Option<i32>) -> Result<(), RepoError> {
    match category_id {
        Some(id) if !categories.contains(id) => Err(RepoError::Constraint(format!(
            "posts.category_id references missing category {id}"
        ))),
        _ => Ok(()),
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<Tables>,
}

impl InMemoryPostRepository {
    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.tables.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Full copy of a post, bypassing projection.
    pub async fn snapshot(&self, id: i32) -> Option<Post> {
        self.tables.posts.read().await.get(id).cloned()
    }
}

#[async_trait]
impl BaseRepository<Post> for InMemoryPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        let categories = self.tables.categories.read().await;
        check_category(&categories, new.category_id)?;

        let mut posts = self.tables.posts.write().await;
        Ok(posts.insert(new, Utc::now()))
    }

    async fn find_many(
        &self,
        options: &QueryOptions<PostField>,
        fields: &FieldSet<PostField>,
    ) -> Result<Vec<PostView>, RepoError> {
        Ok(self.tables.posts.read().await.select(options, fields))
    }

    async fn find_unique(
        &self,
        id: i32,
        fields: &FieldSet<PostField>,
    ) -> Result<Option<PostView>, RepoError> {
        let posts = self.tables.posts.read().await;
        Ok(posts.get(id).map(|post| post.project(fields)))
    }

    async fn update(
        &self,
        id: i32,
        patch: PostPatch,
        fields: &FieldSet<PostField>,
    ) -> Result<PostView, RepoError> {
        let categories = self.tables.categories.read().await;
        let mut posts = self.tables.posts.write().await;
        if !posts.contains(id) {
            return Err(RepoError::NotFound);
        }
        check_category(&categories, patch.category_id)?;

        Ok(posts.patch(id, patch, Utc::now())?.project(fields))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.tables.posts.write().await.remove(id).map(|_| ())
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl BaseRepository<Category> for InMemoryCategoryRepository {
    async fn create(&self, new: NewCategory) -> Result<Category, RepoError> {
        let mut categories = self.tables.categories.write().await;
        Ok(categories.insert(new, Utc::now()))
    }

    async fn find_many(
        &self,
        options: &QueryOptions<CategoryField>,
        fields: &FieldSet<CategoryField>,
    ) -> Result<Vec<CategoryView>, RepoError> {
        Ok(self.tables.categories.read().await.select(options, fields))
    }

    async fn find_unique(
        &self,
        id: i32,
        fields: &FieldSet<CategoryField>,
    ) -> Result<Option<CategoryView>, RepoError> {
        let categories = self.tables.categories.read().await;
        Ok(categories.get(id).map(|category| category.project(fields)))
    }

    async fn update(
        &self,
        id: i32,
        patch: CategoryPatch,
        fields: &FieldSet<CategoryField>,
    ) -> Result<CategoryView, RepoError> {
        let mut categories = self.tables.categories.write().await;
        Ok(categories.patch(id, patch, Utc::now())?.project(fields))
    }

    /// `ON DELETE SET NULL`: posts in the category keep existing without one.
    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut categories = self.tables.categories.write().await;
        categories.remove(id)?;

        let mut posts = self.tables.posts.write().await;
        for post in posts.rows_mut().filter(|post| post.category_id == Some(id)) {
            post.category_id = None;
        }
        Ok(())
    }
}
