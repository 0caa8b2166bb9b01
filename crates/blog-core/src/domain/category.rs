use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::projection::{Field, FieldSet};
use super::resource::Resource;

/// Category entity - a named bucket posts may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub category_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Id,
    CategoryName,
    CreatedAt,
    UpdatedAt,
}

impl Field for CategoryField {
    const ID: Self = CategoryField::Id;

    const ALL: &'static [Self] = &[
        CategoryField::Id,
        CategoryField::CategoryName,
        CategoryField::CreatedAt,
        CategoryField::UpdatedAt,
    ];

    fn wire_name(self) -> &'static str {
        match self {
            CategoryField::Id => "id",
            CategoryField::CategoryName => "category_name",
            CategoryField::CreatedAt => "createdAt",
            CategoryField::UpdatedAt => "updatedAt",
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            CategoryField::Id => "id",
            CategoryField::CategoryName => "category_name",
            CategoryField::CreatedAt => "created_at",
            CategoryField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Category {
    type Field = CategoryField;
    type View = CategoryView;
    type New = NewCategory;
    type Patch = CategoryPatch;

    const NAME: &'static str = "Category";

    const UPDATE_CHECK_FIELDS: &'static [CategoryField] =
        &[CategoryField::Id, CategoryField::CategoryName];

    const UPDATE_RESULT_FIELDS: &'static [CategoryField] =
        &[CategoryField::Id, CategoryField::CategoryName];

    fn id(&self) -> i32 {
        self.id
    }

    fn project(&self, fields: &FieldSet<CategoryField>) -> CategoryView {
        let mut view = CategoryView::default();
        for field in fields.iter() {
            match field {
                CategoryField::Id => view.id = Some(self.id),
                CategoryField::CategoryName => view.category_name = Some(self.category_name.clone()),
                CategoryField::CreatedAt => view.created_at = Some(self.created_at),
                CategoryField::UpdatedAt => view.updated_at = Some(self.updated_at),
            }
        }
        view
    }

    fn from_new(id: i32, new: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id,
            category_name: new.category_name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: CategoryPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.category_name {
            self.category_name = name;
        }
        self.updated_at = now;
    }

    fn compare_by(&self, other: &Self, field: CategoryField) -> Ordering {
        match field {
            CategoryField::Id => self.id.cmp(&other.id),
            CategoryField::CategoryName => self.category_name.cmp(&other.category_name),
            CategoryField::CreatedAt => self.created_at.cmp(&other.created_at),
            CategoryField::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }
}
