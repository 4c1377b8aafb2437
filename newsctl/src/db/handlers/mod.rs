//! Repository implementations for database access.
//!
//! Each repository borrows an [`Executor`](crate::db::executor::Executor) for
//! its lifetime and exposes strongly-typed operations over one table. The same
//! repository code runs against the pool or inside a transaction; callers pick
//! by what they pass to `new`.
//!
//! # Available Repositories
//!
//! - [`News`]: news items and the joined category reads
//! - [`Categories`]: the news-to-category links
//!
//! # Common Pattern
//!
//! ```ignore
//! use newsctl::db::{handlers::{Categories, News}, transaction::TxManager};
//!
//! async fn example(manager: &TxManager) -> anyhow::Result<()> {
//!     // Start a transaction
//!     let mut tx = manager.begin().await?;
//!
//!     // Create repositories from the transaction
//!     let id = News::new(&mut tx).create(&request).await?;
//!     Categories::new(&mut tx).create_all(id, &[1, 2]).await?;
//!
//!     // Commit or drop to roll back
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod news;

pub use categories::Categories;
pub use news::News;
