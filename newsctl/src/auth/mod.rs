//! Authentication for the news API.
//!
//! Access is token based with no user accounts:
//! - `GET /authorize` issues an HS256 JWT signed with `secret_key`, valid for
//!   `auth.jwt_expiry` (7 days by default)
//! - every `/api/v1/*` request must carry it as `Authorization: Bearer <token>`
//!
//! A missing or malformed header yields 401; a token that fails verification
//! (bad signature, expired, wrong algorithm) yields 403.
//!
//! # Modules
//!
//! - [`session`]: token creation and verification
//! - [`middleware`]: the route layer enforcing the bearer token

pub mod middleware;
pub mod session;
