//! News workflows: create and update run in one transaction each, reads go
//! straight to the pool.

use crate::{
    db::{
        errors::DbError,
        handlers::{Categories, News},
        models::news::{NewsCreateDBRequest, NewsDBResponse, NewsUpdateDBRequest},
        transaction::TxManager,
    },
    services::errors::{Result, ServiceError},
    types::{CategoryId, NewsId},
};
use anyhow::Context as _;
use tracing::{info, instrument};

/// A news item to create, with the categories to attach in order
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub categories: Vec<CategoryId>,
}

/// Changes to an existing news item.
///
/// `categories: None` leaves the links alone; `Some(list)` replaces them, and
/// `Some(vec![])` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateNews {
    pub id: NewsId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Option<Vec<CategoryId>>,
}

/// Domain meaning of a failed link insert on an existing news item
fn link_error(err: DbError) -> ServiceError {
    match err {
        DbError::AlreadyExists => ServiceError::CategoriesAlreadyExists,
        DbError::NotFound => ServiceError::NewsNotFound,
        other => ServiceError::Other(anyhow::Error::new(other).context("attach news categories")),
    }
}

/// Same as [`link_error`], except the parent row was inserted in this very
/// transaction, so it cannot be missing unless something is badly wrong.
fn create_link_error(id: NewsId, err: DbError) -> ServiceError {
    match err {
        DbError::NotFound => ServiceError::Other(anyhow::anyhow!("news {id} vanished inside its own transaction")),
        other => link_error(other),
    }
}

#[derive(Debug, Clone)]
pub struct NewsService {
    tx: TxManager,
}

impl NewsService {
    pub fn new(tx: TxManager) -> Self {
        Self { tx }
    }

    /// Create a news item and attach its categories atomically.
    #[instrument(skip(self, request), fields(title = %request.title, categories = request.categories.len()), err)]
    pub async fn create(&self, request: CreateNews) -> Result<NewsId> {
        let CreateNews {
            title,
            content,
            categories,
        } = request;

        let id = self
            .tx
            .run_in_scope(move |tx| {
                Box::pin(async move {
                    let id = News::new(&mut *tx)
                        .create(&NewsCreateDBRequest { title, content })
                        .await
                        .context("create news")?;

                    Categories::new(&mut *tx)
                        .create_all(id, &categories)
                        .await
                        .map_err(|e| create_link_error(id, e))?;

                    Ok::<_, ServiceError>(id)
                })
            })
            .await?;

        info!(news_id = id, "news created");
        Ok(id)
    }

    /// Apply `request` atomically: either every change lands or none does.
    ///
    /// Updating a missing item is [`ServiceError::NewsNotFound`], whether the
    /// change is to its fields or to its categories.
    #[instrument(skip(self, request), fields(news_id = request.id), err)]
    pub async fn update(&self, request: UpdateNews) -> Result<()> {
        let UpdateNews {
            id,
            title,
            content,
            categories,
        } = request;

        self.tx
            .run_in_scope(move |tx| {
                Box::pin(async move {
                    News::new(&mut *tx)
                        .update(id, &NewsUpdateDBRequest { title, content })
                        .await
                        .map_err(|e| match e {
                            DbError::NotFound => ServiceError::NewsNotFound,
                            other => ServiceError::Other(anyhow::Error::new(other).context("update news")),
                        })?;

                    if let Some(categories) = categories {
                        let mut links = Categories::new(&mut *tx);
                        links.delete_all(id).await.context("clear news categories")?;
                        links.create_all(id, &categories).await.map_err(link_error)?;
                    }

                    Ok::<_, ServiceError>(())
                })
            })
            .await?;

        info!(news_id = id, "news updated");
        Ok(())
    }

    /// Page of news ordered by id, each with its categories.
    #[instrument(skip(self), err)]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<NewsDBResponse>> {
        let mut db = self.tx.db();
        let news = News::new(&mut db)
            .list_with_categories(limit, offset)
            .await
            .context("list news")?;
        Ok(news)
    }

    /// A single news item with its categories.
    #[instrument(skip(self), err)]
    pub async fn get(&self, id: NewsId) -> Result<NewsDBResponse> {
        let mut db = self.tx.db();
        News::new(&mut db)
            .get(id)
            .await
            .context("get news")?
            .ok_or(ServiceError::NewsNotFound)
    }
}
