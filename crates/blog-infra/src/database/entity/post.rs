//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use blog_core::domain::{NewPost, PostPatch};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub featured_image: String,
    pub category_id: Option<i32>,
    pub user_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for blog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            featured_image: model.featured_image,
            category_id: model.category_id,
            user_id: model.user_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Insert model for a new post. The id is generated by the database.
pub(crate) fn insert_model(new: NewPost, now: DateTimeWithTimeZone) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        title: Set(new.title),
        content: Set(new.content),
        featured_image: Set(new.featured_image),
        category_id: Set(new.category_id),
        user_id: Set(new.user_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Update model touching only the columns present in the patch.
pub(crate) fn patch_model(id: i32, patch: PostPatch, now: DateTimeWithTimeZone) -> ActiveModel {
    let mut model = ActiveModel {
        id: Unchanged(id),
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(title) = patch.title {
        model.title = Set(title);
    }
    if let Some(content) = patch.content {
        model.content = Set(content);
    }
    if let Some(featured_image) = patch.featured_image {
        model.featured_image = Set(featured_image);
    }
    if let Some(category_id) = patch.category_id {
        model.category_id = Set(Some(category_id));
    }
    model
}
