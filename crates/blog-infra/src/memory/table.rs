//! One in-memory table: rows keyed by id plus the id sequence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use blog_core::domain::{FieldSet, QueryOptions, Resource, SortOrder};
use blog_core::error::RepoError;

pub(crate) struct Table<R> {
    rows: BTreeMap<i32, R>,
    next_id: i32,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<R: Resource> Table<R> {
    pub(crate) fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn get(&self, id: i32) -> Option<&R> {
        self.rows.get(&id)
    }

    /// Ids are never reused, even after a delete.
    pub(crate) fn insert(&mut self, new: R::New, now: DateTime<Utc>) -> R {
        let id = self.next_id;
        self.next_id += 1;

        let row = R::from_new(id, new, now);
        self.rows.insert(id, row.clone());
        row
    }

    pub(crate) fn select(
        &self,
        options: &QueryOptions<R::Field>,
        fields: &FieldSet<R::Field>,
    ) -> Vec<R::View> {
        let mut rows: Vec<&R> = self.rows.values().collect();

        let field = options.order_field();
        rows.sort_by(|a, b| match options.sort_type {
            SortOrder::Asc => a.compare_by(b, field),
            SortOrder::Desc => b.compare_by(a, field),
        });

        rows.into_iter().map(|row| row.project(fields)).collect()
    }

    pub(crate) fn patch(
        &mut self,
        id: i32,
        patch: R::Patch,
        now: DateTime<Utc>,
    ) -> Result<&R, RepoError> {
        let row = self.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.apply_patch(patch, now);
        Ok(row)
    }

    pub(crate) fn remove(&mut self, id: i32) -> Result<R, RepoError> {
        self.rows.remove(&id).ok_or(RepoError::NotFound)
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.rows.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{Category, CategoryField, CategoryPatch, NewCategory};

    fn seeded(names: &[&str]) -> Table<Category> {
        let mut table = Table::default();
        for name in names {
            table.insert(
                NewCategory {
                    category_name: name.to_string(),
                },
                Utc::now(),
            );
        }
        table
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut table = seeded(&["a", "b"]);
        table.remove(2).unwrap();
        let next = table.insert(
            NewCategory {
                category_name: "c".into(),
            },
            Utc::now(),
        );
        assert_eq!(next.id, 3);
    }

    #[test]
    fn select_sorts_by_requested_field() {
        let table = seeded(&["beta", "alpha", "gamma"]);
        let fields = FieldSet::new([CategoryField::CategoryName]);

        let asc = table.select(
            &QueryOptions::sorted_by(CategoryField::CategoryName, SortOrder::Asc),
            &fields,
        );
        let names: Vec<_> = asc.iter().filter_map(|c| c.category_name.clone()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);

        let default = table.select(&QueryOptions::default(), &FieldSet::all());
        let ids: Vec<_> = default.iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn patch_and_remove_of_missing_row_fail() {
        let mut table = seeded(&[]);
        let patch = CategoryPatch {
            category_name: Some("x".into()),
        };
        assert!(matches!(table.patch(1, patch, Utc::now()), Err(RepoError::NotFound)));
        assert!(matches!(table.remove(1), Err(RepoError::NotFound)));
    }
}
