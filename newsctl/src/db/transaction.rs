//! Transaction management.
//!
//! [`TxManager`] owns the pool and hands out two kinds of [`Executor`]: a
//! [`PoolExecutor`] for single statements and a [`Transaction`] for work that
//! must commit or roll back as a unit. [`TxManager::run_in_scope`] is the usual
//! entry point:
//!
//! ```ignore
//! let id = tx_manager
//!     .run_in_scope(move |tx| {
//!         Box::pin(async move {
//!             let id = News::new(&mut *tx).create(&request).await?;
//!             Categories::new(&mut *tx).create_all(id, &categories).await?;
//!             Ok::<_, DbError>(id)
//!         })
//!     })
//!     .await?;
//! ```
//!
//! A [`Transaction`] that is dropped without `commit` (early return, panic,
//! cancelled request future) is rolled back by the driver when its connection
//! is returned to the pool.

use anyhow::Context as _;
use async_trait::async_trait;
use futures::future::BoxFuture;
use sqlx::{
    PgPool, Postgres,
    postgres::{PgQueryResult, PgRow},
};
use tracing::{debug, error, instrument};

use crate::db::{
    errors::{DbError, Result},
    executor::{Executor, PoolExecutor, Statement},
};

/// An open database transaction.
///
/// `commit` and `rollback` consume the value, so a finished transaction cannot
/// be used again.
pub struct Transaction {
    inner: sqlx::Transaction<'static, Postgres>,
}

impl Transaction {
    #[instrument(skip(self), err)]
    pub async fn commit(self) -> Result<()> {
        self.inner.commit().await.context("commit transaction")?;
        debug!("transaction committed");
        Ok(())
    }

    #[instrument(skip(self), err)]
    pub async fn rollback(self) -> Result<()> {
        self.inner.rollback().await.context("roll back transaction")?;
        debug!("transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl Executor for Transaction {
    async fn execute<'q>(&mut self, statement: Statement<'q>) -> std::result::Result<PgQueryResult, sqlx::Error> {
        statement.execute(&mut *self.inner).await
    }

    async fn fetch_one<'q>(&mut self, statement: Statement<'q>) -> std::result::Result<PgRow, sqlx::Error> {
        statement.fetch_one(&mut *self.inner).await
    }

    async fn fetch_all<'q>(&mut self, statement: Statement<'q>) -> std::result::Result<Vec<PgRow>, sqlx::Error> {
        statement.fetch_all(&mut *self.inner).await
    }
}

/// Entry point for all database work. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TxManager {
    pool: PgPool,
}

impl TxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-transactional executor: every statement autocommits on its own.
    pub fn db(&self) -> PoolExecutor {
        PoolExecutor::new(self.pool.clone())
    }

    /// Start a transaction at the database's default isolation level.
    #[instrument(skip(self), err)]
    pub async fn begin(&self) -> Result<Transaction> {
        let inner = self.pool.begin().await.context("begin transaction")?;
        Ok(Transaction { inner })
    }

    /// Run `work` inside a fresh transaction.
    ///
    /// Commits when `work` returns `Ok`, rolls back when it returns `Err` and
    /// hands back that same error. A failed rollback is logged and does not
    /// replace the original error. A failed begin or commit surfaces as `E`.
    pub async fn run_in_scope<T, E, F>(&self, work: F) -> std::result::Result<T, E>
    where
        F: for<'t> FnOnce(&'t mut Transaction) -> BoxFuture<'t, std::result::Result<T, E>> + Send,
        T: Send,
        E: From<DbError> + std::fmt::Display + Send,
    {
        let mut tx = self.begin().await?;

        match work(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, cause = %err, "failed to roll back transaction");
                }
                Err(err)
            }
        }
    }
}
