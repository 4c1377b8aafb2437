//! Database repository for news items.

use crate::{
    db::{
        errors::{DbError, Result},
        executor::Executor,
        models::news::{NewsCreateDBRequest, NewsDBResponse, NewsUpdateDBRequest, NewsWithCategories},
    },
    types::NewsId,
};
use anyhow::Context as _;
use sqlx::{FromRow, Row};
use tracing::instrument;

/// Select list shared by every read: the news columns plus category ids in the
/// order they were attached.
const SELECT_WITH_CATEGORIES: &str = r#"
    SELECT n.id, n.title, n.content,
           COALESCE(
               array_agg(nc.category_id ORDER BY nc.position) FILTER (WHERE nc.category_id IS NOT NULL),
               '{}'
           ) AS categories
    FROM news n
    LEFT JOIN news_categories nc ON nc.news_id = n.id
"#;

pub struct News<'c, E: Executor> {
    db: &'c mut E,
}

impl<'c, E: Executor> News<'c, E> {
    /// Create a new News repository instance
    pub fn new(db: &'c mut E) -> Self {
        Self { db }
    }

    /// Insert a news row and return its assigned id
    #[instrument(skip(self, request), fields(title = %request.title), err)]
    pub async fn create(&mut self, request: &NewsCreateDBRequest) -> Result<NewsId> {
        let row = self
            .db
            .fetch_one(
                sqlx::query("INSERT INTO news (title, content) VALUES ($1, $2) RETURNING id")
                    .bind(&request.title)
                    .bind(&request.content),
            )
            .await
            .context("insert news")?;

        Ok(row.try_get("id").context("read inserted news id")?)
    }

    /// Overwrite the fields present in `request`.
    ///
    /// An empty request touches nothing and succeeds without checking that the
    /// row exists. Otherwise a missing row is [`DbError::NotFound`].
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, id: NewsId, request: &NewsUpdateDBRequest) -> Result<()> {
        let Some(sql) = update_statement(request) else {
            return Ok(());
        };

        let mut statement = sqlx::query(&sql);
        if let Some(title) = &request.title {
            statement = statement.bind(title);
        }
        if let Some(content) = &request.content {
            statement = statement.bind(content);
        }
        let result = self
            .db
            .execute(statement.bind(id))
            .await
            .context("update news")?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Fetch one news item with its categories
    #[instrument(skip(self), err)]
    pub async fn get(&mut self, id: NewsId) -> Result<Option<NewsDBResponse>> {
        let sql = format!("{SELECT_WITH_CATEGORIES} WHERE n.id = $1 GROUP BY n.id");
        let rows = self
            .db
            .fetch_all(sqlx::query(&sql).bind(id))
            .await
            .context("fetch news")?;

        match rows.first() {
            Some(row) => Ok(Some(NewsWithCategories::from_row(row).context("decode news row")?)),
            None => Ok(None),
        }
    }

    /// Page through news ordered by id, each with its categories.
    ///
    /// The page is taken over news rows, never over joined rows, so an item with
    /// many categories still counts once against `limit`.
    #[instrument(skip(self), err)]
    pub async fn list_with_categories(&mut self, limit: i64, offset: i64) -> Result<Vec<NewsDBResponse>> {
        let sql = format!("{SELECT_WITH_CATEGORIES} GROUP BY n.id ORDER BY n.id LIMIT $1 OFFSET $2");
        let rows = self
            .db
            .fetch_all(sqlx::query(&sql).bind(limit).bind(offset))
            .await
            .context("list news")?;

        rows.iter()
            .map(|row| NewsWithCategories::from_row(row).context("decode news row").map_err(DbError::from))
            .collect()
    }
}

/// Build the UPDATE for the fields present, numbering placeholders in the order
/// title, content, id. Returns `None` when there is nothing to set.
fn update_statement(request: &NewsUpdateDBRequest) -> Option<String> {
    if request.is_empty() {
        return None;
    }

    let mut assignments = Vec::new();
    if request.title.is_some() {
        assignments.push(format!("title = ${}", assignments.len() + 1));
    }
    if request.content.is_some() {
        assignments.push(format!("content = ${}", assignments.len() + 1));
    }

    Some(format!(
        "UPDATE news SET {} WHERE id = ${}",
        assignments.join(", "),
        assignments.len() + 1
    ))
}
