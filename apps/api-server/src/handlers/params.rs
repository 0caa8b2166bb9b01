//! Turning raw `sortBy` / `sortType` / `fields` query values into typed
//! query options.

use blog_core::domain::{Field, FieldSet, QueryOptions, SortOrder};

use crate::middleware::error::{AppError, AppResult};

pub fn query_options<F: Field>(
    sort_by: Option<&str>,
    sort_type: Option<&str>,
) -> AppResult<QueryOptions<F>> {
    let sort_by = sort_by
        .map(F::parse)
        .transpose()
        .map_err(|e| AppError::Validation(vec![format!("sortBy: {e}")]))?;
    let sort_type = sort_type
        .map(str::parse::<SortOrder>)
        .transpose()
        .map_err(|_| AppError::Validation(vec!["sortType: must be `asc` or `desc`".to_string()]))?
        .unwrap_or_default();

    Ok(QueryOptions { sort_by, sort_type })
}

/// `None` means the default projection.
pub fn projection<F: Field>(fields: Option<&str>) -> AppResult<Option<FieldSet<F>>> {
    let Some(list) = fields else {
        return Ok(None);
    };
    let set = FieldSet::parse_list(list)
        .map_err(|e| AppError::Validation(vec![format!("fields: {e}")]))?;
    Ok((!set.is_empty()).then_some(set))
}
