//! Post handlers. Reads and updates by id go through the post policy.

use actix_web::{HttpResponse, web};
use validator::Validate;

use blog_core::domain::{NewPost, PostField, PostPatch};
use blog_shared::dto::{CreatePostRequest, ListPostsQuery, UpdatePostRequest};

use super::params;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
///
/// The requester becomes the owner.
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            content: req.content,
            featured_image: req.featured_image,
            category_id: req.category_id,
            user_id: identity.user_id,
        })
        .await?;

    tracing::info!(post_id = post.id, owner = %identity.email, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts
pub async fn query_posts(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let options =
        params::query_options::<PostField>(query.sort_by.as_deref(), query.sort_type.as_deref())?;
    let fields = params::projection::<PostField>(query.fields.as_deref())?;

    let posts = state.posts.query(&options, fields).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post_by_id(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_post_for(&identity.requester(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Post"))?;

    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /api/posts/{id}
pub async fn update_post_by_id(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let patch = PostPatch {
        title: Some(req.title),
        content: Some(req.content),
        featured_image: req.featured_image,
        category_id: Some(req.category_id),
    };
    let post = state
        .posts
        .update_post_for(&identity.requester(), path.into_inner(), patch)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post_by_id(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let deleted = state.posts.delete_post_for(&identity.requester(), id).await?;

    tracing::info!(
        post_id = id,
        owner = ?deleted.user_id,
        requester = identity.user_id,
        "Post deleted"
    );
    Ok(HttpResponse::NoContent().finish())
}
