//! Authentication payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A freshly issued session token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
