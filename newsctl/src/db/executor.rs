//! The capability every repository runs its statements through.
//!
//! Repositories are written once against [`Executor`] and do not know whether
//! they are talking to the pool directly or to an open transaction. Both
//! implementations live here and in [`crate::db::transaction`].

use async_trait::async_trait;
use sqlx::{
    PgPool, Postgres,
    postgres::{PgArguments, PgQueryResult, PgRow},
};

/// A bound SQL statement ready to run.
pub type Statement<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

#[async_trait]
pub trait Executor: Send {
    /// Run a statement that returns no rows.
    async fn execute<'q>(&mut self, statement: Statement<'q>) -> Result<PgQueryResult, sqlx::Error>;

    /// Run a statement that must return exactly one row.
    async fn fetch_one<'q>(&mut self, statement: Statement<'q>) -> Result<PgRow, sqlx::Error>;

    /// Run a statement and collect every row.
    async fn fetch_all<'q>(&mut self, statement: Statement<'q>) -> Result<Vec<PgRow>, sqlx::Error>;
}

/// Executes each statement on a fresh pooled connection, outside any transaction.
#[derive(Debug, Clone)]
pub struct PoolExecutor {
    pool: PgPool,
}

impl PoolExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Executor for PoolExecutor {
    async fn execute<'q>(&mut self, statement: Statement<'q>) -> Result<PgQueryResult, sqlx::Error> {
        statement.execute(&self.pool).await
    }

    async fn fetch_one<'q>(&mut self, statement: Statement<'q>) -> Result<PgRow, sqlx::Error> {
        statement.fetch_one(&self.pool).await
    }

    async fn fetch_all<'q>(&mut self, statement: Statement<'q>) -> Result<Vec<PgRow>, sqlx::Error> {
        statement.fetch_all(&self.pool).await
    }
}
