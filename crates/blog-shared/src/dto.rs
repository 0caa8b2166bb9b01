//! Data Transfer Objects - request types for the API, with the rules each
//! endpoint enforces.
//!
//! Unknown keys are rejected. Query parameters such as `limit` and `page`
//! are accepted and type checked but do not change the result.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Body of `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category_name: String,
}

/// Body of `PATCH /categories/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category_name: String,
}

/// Query of `GET /categories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ListCategoriesQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortType")]
    pub sort_type: Option<String>,
    /// Comma separated projection, e.g. `id,category_name`.
    pub fields: Option<String>,
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
}

/// Body of `POST /posts`. The owner is taken from the token, never the body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(rename = "categoryId", default)]
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
}

/// Body of `PATCH /posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(rename = "categoryId")]
    #[validate(range(min = 1))]
    pub category_id: i32,
}

/// Query of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ListPostsQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortType")]
    pub sort_type: Option<String>,
    /// Comma separated projection, e.g. `id,title,userId`.
    pub fields: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
}

/// Flatten validator output into `field: message` lines, sorted by field.
pub fn describe_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(failures) => failures
                .iter()
                .map(|failure| match &failure.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: failed `{}`", failure.code),
                })
                .collect::<Vec<_>>(),
            _ => vec![format!("{field}: invalid")],
        })
        .collect();
    lines.sort();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_name_is_rejected() {
        let req = CreateCategoryRequest {
            category_name: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(describe_errors(&errors), vec!["category_name: must not be empty"]);
    }

    #[test]
    fn create_post_defaults_optional_fields() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert_eq!(req.featured_image, "");
        assert_eq!(req.category_id, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_post_rejects_owner_in_body() {
        let result =
            serde_json::from_str::<CreatePostRequest>(r#"{"title":"t","content":"c","userId":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_post_requires_category() {
        let result =
            serde_json::from_str::<UpdatePostRequest>(r#"{"title":"t","content":"c"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_post_reports_every_failure() {
        let req = UpdatePostRequest {
            title: String::new(),
            content: String::new(),
            featured_image: None,
            category_id: 0,
        };
        let lines = describe_errors(&req.validate().unwrap_err());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("categoryId") || lines[0].starts_with("category_id"));
    }

    #[test]
    fn list_query_rejects_zero_page() {
        let query = ListPostsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
