//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request deserialization and validation (rejections become 400s)
//! - Calling into [`crate::services`]
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`auth`]: session token issuance
//! - [`news`]: news create, edit, list and fetch
//!
//! # Authentication
//!
//! The news handlers are mounted behind
//! [`crate::auth::middleware::require_session_middleware`], so they never see
//! an unauthenticated request.

pub mod auth;
pub mod news;
