//! PostgreSQL repository implementations.

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DbErr, QueryResult};

use blog_core::domain::{
    Category, CategoryField, CategoryPatch, CategoryView, Field, FieldSet, NewCategory, NewPost,
    Post, PostField, PostPatch, PostView,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, ProjectedEntity};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

fn timestamp(row: &QueryResult, column: &str) -> Result<chrono::DateTime<chrono::Utc>, DbErr> {
    row.try_get::<DateTimeWithTimeZone>("", column)
        .map(Into::into)
}

impl ProjectedEntity for PostEntity {
    type Resource = Post;

    fn column(field: PostField) -> post::Column {
        match field {
            PostField::Id => post::Column::Id,
            PostField::Title => post::Column::Title,
            PostField::Content => post::Column::Content,
            PostField::FeaturedImage => post::Column::FeaturedImage,
            PostField::CategoryId => post::Column::CategoryId,
            PostField::UserId => post::Column::UserId,
            PostField::CreatedAt => post::Column::CreatedAt,
            PostField::UpdatedAt => post::Column::UpdatedAt,
        }
    }

    fn view_from_row(row: &QueryResult, fields: &FieldSet<PostField>) -> Result<PostView, DbErr> {
        let mut view = PostView::default();
        for field in fields.iter() {
            let column = field.column_name();
            match field {
                PostField::Id => view.id = Some(row.try_get("", column)?),
                PostField::Title => view.title = Some(row.try_get("", column)?),
                PostField::Content => view.content = Some(row.try_get("", column)?),
                PostField::FeaturedImage => view.featured_image = Some(row.try_get("", column)?),
                PostField::CategoryId => {
                    view.category_id = Some(row.try_get::<Option<i32>>("", column)?)
                }
                PostField::UserId => view.user_id = Some(row.try_get("", column)?),
                PostField::CreatedAt => view.created_at = Some(timestamp(row, column)?),
                PostField::UpdatedAt => view.updated_at = Some(timestamp(row, column)?),
            }
        }
        Ok(view)
    }

    fn insert_model(new: NewPost, now: DateTimeWithTimeZone) -> post::ActiveModel {
        post::insert_model(new, now)
    }

    fn patch_model(id: i32, patch: PostPatch, now: DateTimeWithTimeZone) -> post::ActiveModel {
        post::patch_model(id, patch, now)
    }
}

impl ProjectedEntity for CategoryEntity {
    type Resource = Category;

    fn column(field: CategoryField) -> category::Column {
        match field {
            CategoryField::Id => category::Column::Id,
            CategoryField::CategoryName => category::Column::CategoryName,
            CategoryField::CreatedAt => category::Column::CreatedAt,
            CategoryField::UpdatedAt => category::Column::UpdatedAt,
        }
    }

    fn view_from_row(
        row: &QueryResult,
        fields: &FieldSet<CategoryField>,
    ) -> Result<CategoryView, DbErr> {
        let mut view = CategoryView::default();
        for field in fields.iter() {
            let column = field.column_name();
            match field {
                CategoryField::Id => view.id = Some(row.try_get("", column)?),
                CategoryField::CategoryName => view.category_name = Some(row.try_get("", column)?),
                CategoryField::CreatedAt => view.created_at = Some(timestamp(row, column)?),
                CategoryField::UpdatedAt => view.updated_at = Some(timestamp(row, column)?),
            }
        }
        Ok(view)
    }

    fn insert_model(new: NewCategory, now: DateTimeWithTimeZone) -> category::ActiveModel {
        category::insert_model(new, now)
    }

    fn patch_model(
        id: i32,
        patch: CategoryPatch,
        now: DateTimeWithTimeZone,
    ) -> category::ActiveModel {
        category::patch_model(id, patch, now)
    }
}
