//! Column projection and ordering options shared by every resource.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A selectable column of a resource.
///
/// Each field has a wire name (the JSON key clients see) and a column name
/// (the snake_case name used in storage). Both spellings parse.
pub trait Field: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The primary key field.
    const ID: Self;

    /// Every field, in declaration order.
    const ALL: &'static [Self];

    fn wire_name(self) -> &'static str;

    fn column_name(self) -> &'static str;

    /// Look a field up by either of its names.
    fn parse(name: &str) -> Result<Self, ParseFieldError> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.wire_name() == name || f.column_name() == name)
            .ok_or_else(|| ParseFieldError(name.to_string()))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown field `{0}`")]
pub struct ParseFieldError(pub String);

/// An ordered, duplicate-free selection of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<F: Field> {
    fields: Vec<F>,
}

impl<F: Field> FieldSet<F> {
    pub fn new(fields: impl IntoIterator<Item = F>) -> Self {
        let mut selected: Vec<F> = Vec::new();
        for field in fields {
            if !selected.contains(&field) {
                selected.push(field);
            }
        }
        Self { fields: selected }
    }

    pub fn all() -> Self {
        Self::new(F::ALL.iter().copied())
    }

    pub fn contains(&self, field: F) -> bool {
        self.fields.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a comma separated list such as `id,title,createdAt`.
    pub fn parse_list(list: &str) -> Result<Self, ParseFieldError> {
        let fields = list
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(F::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(fields))
    }
}

impl<F: Field> From<&[F]> for FieldSet<F> {
    fn from(fields: &[F]) -> Self {
        Self::new(fields.iter().copied())
    }
}

/// Sort direction. Descending unless asked otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ParseFieldError(other.to_string())),
        }
    }
}

/// Options accepted by `query`. Only ordering; there is no filtering and no
/// pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions<F: Field> {
    pub sort_by: Option<F>,
    pub sort_type: SortOrder,
}

impl<F: Field> Default for QueryOptions<F> {
    fn default() -> Self {
        Self {
            sort_by: None,
            sort_type: SortOrder::default(),
        }
    }
}

impl<F: Field> QueryOptions<F> {
    pub fn sorted_by(field: F, order: SortOrder) -> Self {
        Self {
            sort_by: Some(field),
            sort_type: order,
        }
    }

    /// The column rows are ordered by. Falls back to the primary key so that
    /// an unsorted listing is still deterministic.
    pub fn order_field(&self) -> F {
        self.sort_by.unwrap_or(F::ID)
    }
}
