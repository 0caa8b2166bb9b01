use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::projection::{Field, FieldSet};
use super::resource::Resource;

/// Post entity - a blog post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub featured_image: String,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i32>,
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post. The owner is always the requesting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub category_id: Option<i32>,
    pub user_id: i32,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Id,
    Title,
    Content,
    FeaturedImage,
    CategoryId,
    UserId,
    CreatedAt,
    UpdatedAt,
}

impl Field for PostField {
    const ID: Self = PostField::Id;

    const ALL: &'static [Self] = &[
        PostField::Id,
        PostField::Title,
        PostField::Content,
        PostField::FeaturedImage,
        PostField::CategoryId,
        PostField::UserId,
        PostField::CreatedAt,
        PostField::UpdatedAt,
    ];

    fn wire_name(self) -> &'static str {
        match self {
            PostField::Id => "id",
            PostField::Title => "title",
            PostField::Content => "content",
            PostField::FeaturedImage => "featured_image",
            PostField::CategoryId => "categoryId",
            PostField::UserId => "userId",
            PostField::CreatedAt => "createdAt",
            PostField::UpdatedAt => "updatedAt",
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            PostField::Id => "id",
            PostField::Title => "title",
            PostField::Content => "content",
            PostField::FeaturedImage => "featured_image",
            PostField::CategoryId => "category_id",
            PostField::UserId => "user_id",
            PostField::CreatedAt => "created_at",
            PostField::UpdatedAt => "updated_at",
        }
    }
}

/// A post restricted to a projection. Unselected fields are `None` and are
/// left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(
        rename = "categoryId",
        default,
        skip_serializing_if = "Option::is_none",
        with = "nullable"
    )]
    pub category_id: Option<Option<i32>>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Keeps an explicit `null` distinct from a missing key.
mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Option<i32>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<i32>>, D::Error> {
        Option::<i32>::deserialize(d).map(Some)
    }
}

impl Resource for Post {
    type Field = PostField;
    type View = PostView;
    type New = NewPost;
    type Patch = PostPatch;

    const NAME: &'static str = "Post";

    const UPDATE_CHECK_FIELDS: &'static [PostField] = &[
        PostField::Id,
        PostField::Title,
        PostField::Content,
        PostField::UserId,
    ];

    const UPDATE_RESULT_FIELDS: &'static [PostField] = &[
        PostField::Id,
        PostField::Title,
        PostField::Content,
        PostField::FeaturedImage,
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn project(&self, fields: &FieldSet<PostField>) -> PostView {
        let mut view = PostView::default();
        for field in fields.iter() {
            match field {
                PostField::Id => view.id = Some(self.id),
                PostField::Title => view.title = Some(self.title.clone()),
                PostField::Content => view.content = Some(self.content.clone()),
                PostField::FeaturedImage => view.featured_image = Some(self.featured_image.clone()),
                PostField::CategoryId => view.category_id = Some(self.category_id),
                PostField::UserId => view.user_id = Some(self.user_id),
                PostField::CreatedAt => view.created_at = Some(self.created_at),
                PostField::UpdatedAt => view.updated_at = Some(self.updated_at),
            }
        }
        view
    }

    fn from_new(id: i32, new: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            featured_image: new.featured_image,
            category_id: new.category_id,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = Some(category_id);
        }
        self.updated_at = now;
    }

    fn compare_by(&self, other: &Self, field: PostField) -> Ordering {
        match field {
            PostField::Id => self.id.cmp(&other.id),
            PostField::Title => self.title.cmp(&other.title),
            PostField::Content => self.content.cmp(&other.content),
            PostField::FeaturedImage => self.featured_image.cmp(&other.featured_image),
            PostField::CategoryId => self.category_id.cmp(&other.category_id),
            PostField::UserId => self.user_id.cmp(&other.user_id),
            PostField::CreatedAt => self.created_at.cmp(&other.created_at),
            PostField::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }
}
