//! Database repository for the news-to-category links.

use crate::{
    db::{
        errors::{ConstraintViolation, DbError, Result},
        executor::Executor,
    },
    types::{CategoryId, NewsId},
};
use anyhow::Context as _;
use tracing::instrument;

/// How a failed link insert reads to callers: a missing parent news row and a
/// repeated category are both expected outcomes.
fn link_violation(violation: ConstraintViolation) -> Option<DbError> {
    match violation {
        ConstraintViolation::ForeignKey => Some(DbError::NotFound),
        ConstraintViolation::Unique => Some(DbError::AlreadyExists),
    }
}

pub struct Categories<'c, E: Executor> {
    db: &'c mut E,
}

impl<'c, E: Executor> Categories<'c, E> {
    /// Create a new Categories repository instance
    pub fn new(db: &'c mut E) -> Self {
        Self { db }
    }

    /// Attach every category in `categories` to a news item with one statement.
    ///
    /// Either all links are written or none are. Attachment order follows the
    /// slice. A missing news item is [`DbError::NotFound`]; a category already
    /// linked, or repeated within the slice, is [`DbError::AlreadyExists`].
    #[instrument(skip(self, categories), fields(count = categories.len()), err)]
    pub async fn create_all(&mut self, news_id: NewsId, categories: &[CategoryId]) -> Result<()> {
        if categories.is_empty() {
            return Ok(());
        }

        self.db
            .execute(
                sqlx::query(
                    r#"
                    INSERT INTO news_categories (news_id, category_id)
                    SELECT $1, category_id
                    FROM unnest($2::BIGINT[]) WITH ORDINALITY AS input(category_id, ord)
                    ORDER BY ord
                    "#,
                )
                .bind(news_id)
                .bind(categories),
            )
            .await
            .map_err(|e| DbError::translate(e, "insert news categories", link_violation))?;

        Ok(())
    }

    /// Remove every category link of a news item, returning how many were removed.
    /// Deleting from an item with no links, or from a missing item, removes nothing.
    #[instrument(skip(self), err)]
    pub async fn delete_all(&mut self, news_id: NewsId) -> Result<u64> {
        let result = self
            .db
            .execute(sqlx::query("DELETE FROM news_categories WHERE news_id = $1").bind(news_id))
            .await
            .context("delete news categories")?;

        Ok(result.rows_affected())
    }
}
