use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::projection::{Field, FieldSet};

/// A persisted resource type handled by the generic entity service.
///
/// Ties a model to its field enum, its projected view and the inputs used
/// to create and patch it.
pub trait Resource: Clone + Send + Sync + 'static {
    type Field: Field;
    type View: Serialize + Clone + Send + Sync + 'static;
    type New: Clone + Send + Sync + 'static;
    type Patch: Clone + Send + Sync + 'static;

    /// Human readable name used in error messages ("Post", "Category").
    const NAME: &'static str;

    /// Fields read to confirm existence before an update.
    const UPDATE_CHECK_FIELDS: &'static [Self::Field];

    /// Fields returned by an update when the caller does not choose.
    const UPDATE_RESULT_FIELDS: &'static [Self::Field];

    fn id(&self) -> i32;

    /// Keep only the selected fields.
    fn project(&self, fields: &FieldSet<Self::Field>) -> Self::View;

    /// Build a fresh model from creation input.
    fn from_new(id: i32, new: Self::New, now: DateTime<Utc>) -> Self;

    /// Apply a partial patch in place and bump `updated_at`.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// Compare two models on one field.
    fn compare_by(&self, other: &Self, field: Self::Field) -> Ordering;
}
