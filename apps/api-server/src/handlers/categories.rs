//! Category handlers. Any authenticated caller may use them.

use actix_web::{HttpResponse, web};
use validator::Validate;

use blog_core::domain::{CategoryField, CategoryPatch, NewCategory};
use blog_shared::dto::{CreateCategoryRequest, ListCategoriesQuery, UpdateCategoryRequest};

use super::params;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/categories
pub async fn create_category(
    _identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let category = state
        .categories
        .create(NewCategory {
            category_name: req.category_name,
        })
        .await?;

    Ok(HttpResponse::Created().json(category))
}

/// GET /api/categories
pub async fn query_categories(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<ListCategoriesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let options =
        params::query_options::<CategoryField>(query.sort_by.as_deref(), query.sort_type.as_deref())?;
    let fields = params::projection::<CategoryField>(query.fields.as_deref())?;

    let categories = state.categories.query(&options, fields).await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id}
pub async fn get_category_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .get_by_id(path.into_inner(), None)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    Ok(HttpResponse::Ok().json(category))
}

/// PATCH /api/categories/{id}
pub async fn update_category_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let patch = CategoryPatch {
        category_name: Some(req.category_name),
    };
    let category = state
        .categories
        .update_by_id(path.into_inner(), patch, None)
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/categories/{id}
pub async fn delete_category_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.categories.delete_by_id(id).await?;

    tracing::info!(category_id = id, "Category deleted");
    Ok(HttpResponse::NoContent().finish())
}
