//! Database models for news items and their category links.

use crate::types::{CategoryId, NewsId};
use serde::{Deserialize, Serialize};

/// A news row joined with its category ids, in attachment order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct NewsWithCategories {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub categories: Vec<CategoryId>,
}

/// Request to create a news row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCreateDBRequest {
    pub title: String,
    pub content: String,
}

/// Partial update of a news row; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsUpdateDBRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NewsUpdateDBRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Response from database when reading news
pub type NewsDBResponse = NewsWithCategories;
