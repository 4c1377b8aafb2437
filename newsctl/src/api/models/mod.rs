//! API request and response data models.
//!
//! These structures define the public API contract. They are distinct from the
//! database models in [`crate::db::models`], and all of them carry `utoipa`
//! annotations for the generated OpenAPI document.
//!
//! - [`news`]: news create/update payloads and responses
//! - [`auth`]: the token issued by `/authorize`
//! - [`pagination`]: `limit`/`offset` query parameters

pub mod auth;
pub mod news;
pub mod pagination;
