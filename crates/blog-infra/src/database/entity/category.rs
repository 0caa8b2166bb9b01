//! Category entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use blog_core::domain::{CategoryPatch, NewCategory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Category.
impl From<Model> for blog_core::domain::Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category_name: model.category_name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

pub(crate) fn insert_model(new: NewCategory, now: DateTimeWithTimeZone) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        category_name: Set(new.category_name),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub(crate) fn patch_model(
    id: i32,
    patch: CategoryPatch,
    now: DateTimeWithTimeZone,
) -> ActiveModel {
    let mut model = ActiveModel {
        id: Unchanged(id),
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(name) = patch.category_name {
        model.category_name = Set(name);
    }
    model
}
