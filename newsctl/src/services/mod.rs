//! Workflows that span several repositories.
//!
//! Services own a [`TxManager`](crate::db::transaction::TxManager), run
//! multi-statement writes inside one transaction, and translate storage
//! outcomes into [`errors::ServiceError`] for the HTTP layer.

pub mod errors;
pub mod news;

pub use news::NewsService;
