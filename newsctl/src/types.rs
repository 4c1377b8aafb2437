//! Identifier aliases shared by the storage, service and API layers.
//!
//! News rows are keyed by the database-assigned `BIGSERIAL`. Category ids are
//! free-standing integers supplied by clients; there is no categories table.

pub type NewsId = i64;
pub type CategoryId = i64;
