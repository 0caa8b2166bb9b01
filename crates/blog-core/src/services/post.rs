use crate::domain::{FieldSet, Post, PostView, Requester, Resource};
use crate::error::DomainError;
use crate::policy;

use super::entity::EntityService;

/// Post operations as seen by an authenticated requester.
impl EntityService<Post> {
    /// Fetch a post the requester owns. Someone else's post is
    /// [`DomainError::Unauthorized`] even though it exists.
    pub async fn get_post_for(
        &self,
        requester: &Requester,
        id: i32,
    ) -> Result<Option<PostView>, DomainError> {
        let Some(post) = self.get_by_id(id, None).await? else {
            return Ok(None);
        };
        policy::authorize_read(requester, post.user_id)?;
        Ok(Some(post))
    }

    /// Update a post. The update rule is checked against the owner read by
    /// the existence check, before anything is written.
    pub async fn update_post_for(
        &self,
        requester: &Requester,
        id: i32,
        patch: <Post as Resource>::Patch,
    ) -> Result<PostView, DomainError> {
        let current = self
            .ensure_exists(id, &FieldSet::from(Post::UPDATE_CHECK_FIELDS))
            .await?;
        policy::authorize_update(requester, current.user_id)?;
        self.write_update(id, patch, None).await
    }

    /// Delete a post. No ownership or role check applies.
    pub async fn delete_post_for(
        &self,
        requester: &Requester,
        id: i32,
    ) -> Result<PostView, DomainError> {
        let snapshot = self.ensure_exists(id, &FieldSet::all()).await?;
        policy::authorize_delete(requester, snapshot.user_id)?;
        self.remove(id).await?;
        Ok(snapshot)
    }
}
