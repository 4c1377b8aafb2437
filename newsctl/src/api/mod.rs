//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - **Health** (`/ping`): liveness check
//! - **Authentication** (`/authorize`): issues session tokens
//! - **News** (`/api/v1/news/*`): create, edit, list and fetch news, bearer token required
//!
//! # OpenAPI Documentation
//!
//! Endpoints are documented with `utoipa`; the document is served at
//! `/api-docs/openapi.json`.

pub mod handlers;
pub mod models;
