//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern, with every repository running its
//! statements through an [`executor::Executor`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Services   │  (services - workflows and domain errors)
//! └──────┬──────┘
//!        │  TxManager::run_in_scope / TxManager::db
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries over an Executor)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`executor`]: the statement-running capability and its pool-backed implementation
//! - [`transaction`]: transactions and the [`transaction::TxManager`] scope helper
//! - [`handlers`]: repository implementations
//! - [`models`]: database record structures
//! - [`errors`]: database-specific error types and constraint translation
//!
//! # Transactions
//!
//! Multi-statement writes go through [`transaction::TxManager::run_in_scope`], which
//! commits on success and rolls back on error. Single reads use the pool directly:
//!
//! ```ignore
//! let mut db = manager.db();
//! let page = News::new(&mut db).list_with_categories(20, 0).await?;
//! ```
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/` directory.
//! The [`crate::migrator`] function provides access to the migrator:
//!
//! ```ignore
//! newsctl::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod transaction;
