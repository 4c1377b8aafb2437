//! API request and response models for news.
//!
//! Field names are PascalCase on the wire (`Id`, `Title`, `Content`, `Categories`).

use crate::{
    db::models::news::NewsDBResponse,
    errors::Error,
    services::news::{CreateNews, UpdateNews},
    types::{CategoryId, NewsId},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn validate_text(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::BadRequest {
            message: format!("{field} is required"),
        });
    }
    Ok(())
}

fn validate_categories(categories: &[CategoryId]) -> Result<(), Error> {
    if let Some(bad) = categories.iter().find(|&&id| id <= 0) {
        return Err(Error::BadRequest {
            message: format!("category ids must be positive, got {bad}"),
        });
    }
    Ok(())
}

/// Request body for `POST /api/v1/news/create`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct NewsCreate {
    pub title: String,
    pub content: String,
    /// Category ids to attach, in order. Must be positive and distinct.
    pub categories: Vec<CategoryId>,
}

impl NewsCreate {
    pub fn validate(&self) -> Result<(), Error> {
        validate_text("Title", &self.title)?;
        validate_text("Content", &self.content)?;
        validate_categories(&self.categories)
    }
}

impl From<NewsCreate> for CreateNews {
    fn from(request: NewsCreate) -> Self {
        Self {
            title: request.title,
            content: request.content,
            categories: request.categories,
        }
    }
}

/// Request body for `POST /api/v1/news/edit/{id}`.
///
/// Absent fields are left unchanged. `Categories` replaces the whole list when
/// present; `[]` removes every category.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Option<Vec<CategoryId>>,
}

impl NewsUpdate {
    /// Fields that are present follow the same rules as on create.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(title) = &self.title {
            validate_text("Title", title)?;
        }
        if let Some(content) = &self.content {
            validate_text("Content", content)?;
        }
        match &self.categories {
            Some(categories) => validate_categories(categories),
            None => Ok(()),
        }
    }

    pub fn into_service_request(self, id: NewsId) -> UpdateNews {
        UpdateNews {
            id,
            title: self.title,
            content: self.content,
            categories: self.categories,
        }
    }
}

/// A news item as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct NewsResponse {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub categories: Vec<CategoryId>,
}

impl From<NewsDBResponse> for NewsResponse {
    fn from(news: NewsDBResponse) -> Self {
        Self {
            id: news.id,
            title: news.title,
            content: news.content,
            categories: news.categories,
        }
    }
}

/// Response for a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct NewsCreatedResponse {
    pub id: NewsId,
}

/// Response for `GET /api/v1/news/list`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct NewsListResponse {
    pub success: bool,
    pub news: Vec<NewsResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_uses_pascal_case() {
        let request: NewsCreate = serde_json::from_value(json!({
            "Title": "Hello",
            "Content": "World",
            "Categories": [1, 2]
        }))
        .unwrap();
        assert_eq!(request.title, "Hello");
        assert_eq!(request.categories, vec![1, 2]);
        assert!(request.validate().is_ok());

        // every field is required
        assert!(serde_json::from_value::<NewsCreate>(json!({"Title": "Hello", "Content": "World"})).is_err());
    }

    #[test]
    fn test_create_validation() {
        let mut request = NewsCreate {
            title: "  ".to_string(),
            content: "World".to_string(),
            categories: vec![1],
        };
        assert!(request.validate().is_err());

        request.title = "Hello".to_string();
        request.categories = vec![1, 0];
        assert!(request.validate().is_err());

        request.categories = vec![];
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_distinguishes_absent_and_empty_categories() {
        let absent: NewsUpdate = serde_json::from_value(json!({"Title": "New"})).unwrap();
        assert_eq!(absent.title.as_deref(), Some("New"));
        assert!(absent.categories.is_none());

        let empty: NewsUpdate = serde_json::from_value(json!({"Categories": []})).unwrap();
        assert_eq!(empty.categories, Some(vec![]));

        let negative: NewsUpdate = serde_json::from_value(json!({"Categories": [3, -1]})).unwrap();
        assert!(negative.validate().is_err());

        let blank_title: NewsUpdate = serde_json::from_value(json!({"Title": ""})).unwrap();
        assert!(blank_title.validate().is_err());

        let blank_content: NewsUpdate = serde_json::from_value(json!({"Content": "   "})).unwrap();
        assert!(blank_content.validate().is_err());

        // absent fields are never checked
        assert!(NewsUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_response_shape() {
        let response = NewsListResponse {
            success: true,
            news: vec![NewsResponse {
                id: 1,
                title: "Hello".to_string(),
                content: "World".to_string(),
                categories: vec![1, 2],
            }],
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "Success": true,
                "News": [{"Id": 1, "Title": "Hello", "Content": "World", "Categories": [1, 2]}]
            })
        );
    }
}
