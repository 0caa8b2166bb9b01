use std::sync::Arc;

use crate::domain::{FieldSet, QueryOptions, Resource};
use crate::error::DomainError;
use crate::ports::BaseRepository;

use super::retry::RetryPolicy;

/// CRUD service for one resource type.
///
/// Existence is always confirmed with a read before `update_by_id` and
/// `delete_by_id` write, so a missing row is reported as
/// [`DomainError::NotFound`] instead of a storage error. The read and the
/// write are separate round trips.
pub struct EntityService<R: Resource> {
    repo: Arc<dyn BaseRepository<R>>,
    retry: RetryPolicy,
}

impl<R: Resource> Clone for EntityService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            retry: self.retry.clone(),
        }
    }
}

impl<R: Resource> EntityService<R> {
    pub fn new(repo: Arc<dyn BaseRepository<R>>) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Persist a new row and return it in full.
    pub async fn create(&self, new: R::New) -> Result<R, DomainError> {
        let created = self
            .retry
            .run("create", || self.repo.create(new.clone()))
            .await
            .map_err(|e| e.into_domain(R::NAME, None))?;

        tracing::debug!(entity = R::NAME, id = created.id(), "Created");
        Ok(created)
    }

    /// All rows, ordered per `options`. Every field is returned unless a
    /// projection is given.
    pub async fn query(
        &self,
        options: &QueryOptions<R::Field>,
        fields: Option<FieldSet<R::Field>>,
    ) -> Result<Vec<R::View>, DomainError> {
        let fields = fields.filter(|f| !f.is_empty()).unwrap_or_else(FieldSet::all);
        let rows = self
            .retry
            .run("find_many", || self.repo.find_many(options, &fields))
            .await
            .map_err(|e| e.into_domain(R::NAME, None))?;

        tracing::debug!(
            entity = R::NAME,
            count = rows.len(),
            sort_by = ?options.sort_by,
            sort_type = ?options.sort_type,
            "Queried"
        );
        Ok(rows)
    }

    /// One row by id. A missing row is `Ok(None)`, not an error.
    pub async fn get_by_id(
        &self,
        id: i32,
        fields: Option<FieldSet<R::Field>>,
    ) -> Result<Option<R::View>, DomainError> {
        let fields = fields.filter(|f| !f.is_empty()).unwrap_or_else(FieldSet::all);
        self.find(id, &fields).await
    }

    /// Confirm the row exists, then apply `patch`.
    pub async fn update_by_id(
        &self,
        id: i32,
        patch: R::Patch,
        fields: Option<FieldSet<R::Field>>,
    ) -> Result<R::View, DomainError> {
        self.ensure_exists(id, &FieldSet::from(R::UPDATE_CHECK_FIELDS))
            .await?;
        self.write_update(id, patch, fields).await
    }

    /// Confirm the row exists, delete it, and return it as it was.
    pub async fn delete_by_id(&self, id: i32) -> Result<R::View, DomainError> {
        let snapshot = self.ensure_exists(id, &FieldSet::all()).await?;
        self.remove(id).await?;
        Ok(snapshot)
    }

    async fn find(
        &self,
        id: i32,
        fields: &FieldSet<R::Field>,
    ) -> Result<Option<R::View>, DomainError> {
        self.retry
            .run("find_unique", || self.repo.find_unique(id, fields))
            .await
            .map_err(|e| e.into_domain(R::NAME, Some(id)))
    }

    pub(super) async fn ensure_exists(
        &self,
        id: i32,
        fields: &FieldSet<R::Field>,
    ) -> Result<R::View, DomainError> {
        self.find(id, fields)
            .await?
            .ok_or_else(|| DomainError::not_found(R::NAME, id))
    }

    pub(super) async fn write_update(
        &self,
        id: i32,
        patch: R::Patch,
        fields: Option<FieldSet<R::Field>>,
    ) -> Result<R::View, DomainError> {
        let fields = fields
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| FieldSet::from(R::UPDATE_RESULT_FIELDS));
        let updated = self
            .retry
            .run("update", || self.repo.update(id, patch.clone(), &fields))
            .await
            .map_err(|e| e.into_domain(R::NAME, Some(id)))?;

        tracing::debug!(entity = R::NAME, id, "Updated");
        Ok(updated)
    }

    pub(super) async fn remove(&self, id: i32) -> Result<(), DomainError> {
        self.retry
            .run("delete", || self.repo.delete(id))
            .await
            .map_err(|e| e.into_domain(R::NAME, Some(id)))?;

        tracing::debug!(entity = R::NAME, id, "Deleted");
        Ok(())
    }
}
