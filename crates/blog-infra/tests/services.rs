//! Entity service and authorization behaviour over the in-memory repositories.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Barrier, Notify};

use blog_core::domain::{
    Category, CategoryField, CategoryPatch, FieldSet, NewCategory, NewPost, Post, PostField,
    PostPatch, PostView, QueryOptions, Requester, Role, SortOrder,
};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;
use blog_core::{CategoryService, DomainError, PostService, RetryPolicy};
use blog_infra::memory::{InMemoryDatabase, InMemoryPostRepository};

const OWNER: i32 = 10;
const STRANGER: i32 = 20;

fn new_post(user_id: i32, title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: format!("{title} body"),
        featured_image: "cover.png".to_string(),
        category_id: None,
        user_id,
    }
}

fn patch(title: &str) -> PostPatch {
    PostPatch {
        title: Some(title.to_string()),
        content: Some("edited".to_string()),
        featured_image: None,
        category_id: None,
    }
}

fn post_service() -> (PostService, Arc<InMemoryPostRepository>) {
    let repo = Arc::new(InMemoryDatabase::new().posts());
    let service = PostService::new(repo.clone()).with_retry(RetryPolicy::none());
    (service, repo)
}

fn category_service() -> CategoryService {
    CategoryService::new(Arc::new(InMemoryDatabase::new().categories()))
}

// --- Entity service lifecycle ---

#[tokio::test]
async fn create_then_get_returns_submitted_values_and_fresh_id() {
    let (posts, _) = post_service();

    let first = posts.create(new_post(OWNER, "first")).await.unwrap();
    let second = posts.create(new_post(OWNER, "second")).await.unwrap();
    assert_ne!(first.id, second.id);

    let fetched = posts.get_by_id(second.id, None).await.unwrap().unwrap();
    assert_eq!(fetched.id, Some(second.id));
    assert_eq!(fetched.title.as_deref(), Some("second"));
    assert_eq!(fetched.content.as_deref(), Some("second body"));
    assert_eq!(fetched.user_id, Some(OWNER));
    assert_eq!(fetched.category_id, Some(None));
    assert_eq!(fetched.created_at, Some(second.created_at));
}

#[tokio::test]
async fn missing_ids_are_absent_for_reads_and_not_found_for_writes() {
    let categories = category_service();

    assert_eq!(categories.get_by_id(99, None).await, Ok(None));
    assert_eq!(
        categories
            .update_by_id(99, CategoryPatch::default(), None)
            .await,
        Err(DomainError::not_found("Category", 99))
    );
    assert_eq!(
        categories.delete_by_id(99).await,
        Err(DomainError::not_found("Category", 99))
    );
}

#[tokio::test]
async fn query_defaults_to_descending_ids_and_honours_sort_by() {
    let categories = category_service();
    for name in ["news", "art", "travel"] {
        categories
            .create(NewCategory {
                category_name: name.to_string(),
            })
            .await
            .unwrap();
    }

    let default = categories
        .query(&QueryOptions::default(), None)
        .await
        .unwrap();
    let ids: Vec<_> = default.iter().filter_map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let by_name_asc = categories
        .query(
            &QueryOptions::sorted_by(CategoryField::CategoryName, SortOrder::Asc),
            None,
        )
        .await
        .unwrap();
    let names: Vec<_> = by_name_asc
        .iter()
        .filter_map(|c| c.category_name.as_deref())
        .collect();
    assert_eq!(names, vec!["art", "news", "travel"]);

    let by_name_desc = categories
        .query(
            &QueryOptions::sorted_by(CategoryField::CategoryName, SortOrder::Desc),
            Some(FieldSet::new([CategoryField::CategoryName])),
        )
        .await
        .unwrap();
    assert_eq!(by_name_desc[0].category_name.as_deref(), Some("travel"));
    assert!(by_name_desc[0].id.is_none());
}

#[tokio::test]
async fn update_returns_default_projection() {
    let categories = category_service();
    let created = categories
        .create(NewCategory {
            category_name: "old".into(),
        })
        .await
        .unwrap();

    let updated = categories
        .update_by_id(
            created.id,
            CategoryPatch {
                category_name: Some("new".into()),
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.id, Some(created.id));
    assert_eq!(updated.category_name.as_deref(), Some("new"));
    assert!(updated.created_at.is_none());
}

#[tokio::test]
async fn delete_returns_snapshot_taken_before_removal() {
    let (posts, repo) = post_service();
    let created = posts.create(new_post(OWNER, "doomed")).await.unwrap();

    let snapshot = posts.delete_by_id(created.id).await.unwrap();

    assert_eq!(snapshot.title.as_deref(), Some("doomed"));
    assert_eq!(snapshot.user_id, Some(OWNER));
    assert!(repo.snapshot(created.id).await.is_none());
}

// --- Authorization rules ---

#[tokio::test]
async fn read_rule_rejects_non_owner() {
    let (posts, _) = post_service();
    let post = posts.create(new_post(OWNER, "private")).await.unwrap();

    let owner = Requester::new(OWNER, Role::User);
    let stranger = Requester::new(STRANGER, Role::Admin);

    assert!(posts.get_post_for(&owner, post.id).await.unwrap().is_some());
    assert_eq!(
        posts.get_post_for(&stranger, post.id).await,
        Err(DomainError::Unauthorized)
    );
    assert_eq!(posts.get_post_for(&stranger, 404).await, Ok(None));
}

#[tokio::test]
async fn update_rule_rejects_ordinary_owner_without_writing() {
    let (posts, repo) = post_service();
    let post = posts.create(new_post(OWNER, "mine")).await.unwrap();

    let result = posts
        .update_post_for(&Requester::new(OWNER, Role::User), post.id, patch("hijacked"))
        .await;

    assert_eq!(result, Err(DomainError::Unauthorized));
    let stored: Post = repo.snapshot(post.id).await.unwrap();
    assert_eq!(stored.title, "mine");
    assert_eq!(stored.updated_at, post.updated_at);
}

#[tokio::test]
async fn update_rule_rejects_elevated_non_owner() {
    let (posts, _) = post_service();
    let post = posts.create(new_post(OWNER, "mine")).await.unwrap();

    let result = posts
        .update_post_for(&Requester::new(STRANGER, Role::Admin), post.id, patch("x"))
        .await;

    assert_eq!(result, Err(DomainError::Unauthorized));
}

#[tokio::test]
async fn update_rule_allows_elevated_owner() {
    let (posts, _) = post_service();
    let post = posts.create(new_post(OWNER, "mine")).await.unwrap();

    let updated: PostView = posts
        .update_post_for(&Requester::new(OWNER, Role::Admin), post.id, patch("renamed"))
        .await
        .unwrap();

    assert_eq!(updated.id, Some(post.id));
    assert_eq!(updated.title.as_deref(), Some("renamed"));
    assert_eq!(updated.content.as_deref(), Some("edited"));
    assert_eq!(updated.featured_image.as_deref(), Some("cover.png"));
    assert!(updated.user_id.is_none());
}

#[tokio::test]
async fn update_of_missing_post_is_not_found_before_policy() {
    let (posts, _) = post_service();

    let result = posts
        .update_post_for(&Requester::new(OWNER, Role::User), 77, patch("x"))
        .await;

    assert_eq!(result, Err(DomainError::not_found("Post", 77)));
}

/// Deleting someone else's post is allowed. This pins current behaviour.
#[tokio::test]
async fn delete_rule_allows_any_authenticated_requester() {
    let (posts, repo) = post_service();
    let post = posts.create(new_post(OWNER, "shared")).await.unwrap();

    let snapshot = posts
        .delete_post_for(&Requester::new(STRANGER, Role::User), post.id)
        .await
        .unwrap();

    assert_eq!(snapshot.user_id, Some(OWNER));
    assert!(repo.is_empty().await);
}

// --- Category references ---

fn blog_services() -> (PostService, CategoryService, Arc<InMemoryPostRepository>) {
    let db = InMemoryDatabase::new();
    let posts_repo = Arc::new(db.posts());
    let posts = PostService::new(posts_repo.clone()).with_retry(RetryPolicy::none());
    let categories =
        CategoryService::new(Arc::new(db.categories())).with_retry(RetryPolicy::none());
    (posts, categories, posts_repo)
}

#[tokio::test]
async fn post_cannot_reference_missing_category() {
    let (posts, _, repo) = blog_services();

    let created = posts
        .create(NewPost {
            category_id: Some(999),
            ..new_post(OWNER, "orphan")
        })
        .await;
    assert!(matches!(created, Err(DomainError::Conflict(_))));
    assert!(repo.is_empty().await);

    let post = posts.create(new_post(OWNER, "plain")).await.unwrap();
    let moved = posts
        .update_post_for(
            &Requester::new(OWNER, Role::Admin),
            post.id,
            PostPatch {
                category_id: Some(999),
                ..patch("moved")
            },
        )
        .await;
    assert!(matches!(moved, Err(DomainError::Conflict(_))));
    let stored = repo.snapshot(post.id).await.unwrap();
    assert_eq!(stored.title, "plain");
    assert_eq!(stored.category_id, None);
}

#[tokio::test]
async fn post_may_reference_existing_category() {
    let (posts, categories, _) = blog_services();
    let category = categories
        .create(NewCategory {
            category_name: "rust".into(),
        })
        .await
        .unwrap();

    let post = posts
        .create(NewPost {
            category_id: Some(category.id),
            ..new_post(OWNER, "filed")
        })
        .await
        .unwrap();

    assert_eq!(post.category_id, Some(category.id));
}

#[tokio::test]
async fn deleting_category_clears_it_from_posts() {
    let (posts, categories, repo) = blog_services();
    let doomed = categories
        .create(NewCategory {
            category_name: "doomed".into(),
        })
        .await
        .unwrap();
    let kept = categories
        .create(NewCategory {
            category_name: "kept".into(),
        })
        .await
        .unwrap();
    let in_doomed = posts
        .create(NewPost {
            category_id: Some(doomed.id),
            ..new_post(OWNER, "a")
        })
        .await
        .unwrap();
    let in_kept = posts
        .create(NewPost {
            category_id: Some(kept.id),
            ..new_post(OWNER, "b")
        })
        .await
        .unwrap();

    categories.delete_by_id(doomed.id).await.unwrap();

    let view = posts
        .get_by_id(in_doomed.id, Some(FieldSet::new([PostField::CategoryId])))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.category_id, Some(None));
    assert_eq!(repo.snapshot(in_kept.id).await.unwrap().category_id, Some(kept.id));
}

// --- Races between the existence check and the write ---

/// Delegates to an in-memory repository, pausing `find_unique` calls.
struct PausingRepo {
    inner: Arc<InMemoryPostRepository>,
    barrier: Option<Arc<Barrier>>,
    release: Option<Arc<Notify>>,
    armed: AtomicBool,
}

impl PausingRepo {
    fn with_barrier(inner: Arc<InMemoryPostRepository>, barrier: Arc<Barrier>) -> Self {
        Self {
            inner,
            barrier: Some(barrier),
            release: None,
            armed: AtomicBool::new(true),
        }
    }

    fn with_release(inner: Arc<InMemoryPostRepository>, release: Arc<Notify>) -> Self {
        Self {
            inner,
            barrier: None,
            release: Some(release),
            armed: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl BaseRepository<Post> for PausingRepo {
    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        self.inner.create(new).await
    }

    async fn find_many(
        &self,
        options: &QueryOptions<PostField>,
        fields: &FieldSet<PostField>,
    ) -> Result<Vec<PostView>, RepoError> {
        self.inner.find_many(options, fields).await
    }

    async fn find_unique(
        &self,
        id: i32,
        fields: &FieldSet<PostField>,
    ) -> Result<Option<PostView>, RepoError> {
        let found = self.inner.find_unique(id, fields).await;
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(release) = &self.release {
            if self.armed.swap(false, Ordering::SeqCst) {
                release.notified().await;
            }
        }
        found
    }

    async fn update(
        &self,
        id: i32,
        patch: PostPatch,
        fields: &FieldSet<PostField>,
    ) -> Result<PostView, RepoError> {
        self.inner.update(id, patch, fields).await
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn update_racing_a_delete_reports_not_found() {
    let inner = Arc::new(InMemoryDatabase::new().posts());
    let release = Arc::new(Notify::new());
    let paused = PostService::new(Arc::new(PausingRepo::with_release(
        inner.clone(),
        release.clone(),
    )));
    let direct = PostService::new(inner.clone());

    let post = direct.create(new_post(OWNER, "contested")).await.unwrap();
    let admin_owner = Requester::new(OWNER, Role::Admin);

    let (updated, deleted) = tokio::join!(
        paused.update_post_for(&admin_owner, post.id, patch("late")),
        async {
            let result = direct.delete_by_id(post.id).await;
            release.notify_one();
            result
        }
    );

    assert!(deleted.is_ok());
    assert_eq!(updated, Err(DomainError::not_found("Post", post.id)));
    assert!(inner.is_empty().await);
}

#[tokio::test]
async fn concurrent_deletes_succeed_exactly_once() {
    let inner = Arc::new(InMemoryDatabase::new().posts());
    let barrier = Arc::new(Barrier::new(2));
    let posts = PostService::new(Arc::new(PausingRepo::with_barrier(inner.clone(), barrier)));

    let post = posts.create(new_post(OWNER, "twice")).await.unwrap();

    let (a, b) = tokio::join!(posts.delete_by_id(post.id), posts.delete_by_id(post.id));

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| *r == Err(DomainError::not_found("Post", post.id)))
    );
}

#[tokio::test]
async fn category_lifecycle_round_trip() {
    let categories = category_service();
    let created: Category = categories
        .create(NewCategory {
            category_name: "rust".into(),
        })
        .await
        .unwrap();

    let fetched = categories
        .get_by_id(created.id, Some(FieldSet::new([CategoryField::CategoryName])))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.category_name.as_deref(), Some("rust"));
    assert!(fetched.id.is_none());

    let removed = categories.delete_by_id(created.id).await.unwrap();
    assert_eq!(removed.id, Some(created.id));
    assert_eq!(categories.get_by_id(created.id, None).await, Ok(None));
}
