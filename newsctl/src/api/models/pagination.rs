//! Pagination parameters for list endpoints.
//!
//! List endpoints use offset-based pagination with `limit` and `offset` query
//! parameters. Out-of-range values are rejected rather than clamped.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::Error;

/// Default number of items to return per page.
pub const DEFAULT_LIMIT: i64 = 20;

/// Maximum number of items that can be requested per page.
pub const MAX_LIMIT: i64 = 20;

/// Standard pagination parameters for list endpoints.
///
/// - `limit`: Maximum items to return (default: 20, range 0..=20)
/// - `offset`: Number of items to skip (default: 0)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Maximum number of items to return (default: 20, max: 20)
    #[param(default = 20, minimum = 0, maximum = 20)]
    pub limit: Option<i64>,

    /// Number of items to skip (default: 0)
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

impl Pagination {
    /// Get `(limit, offset)`, applying defaults and rejecting out-of-range values.
    pub fn params(&self) -> Result<(i64, i64), Error> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(0..=MAX_LIMIT).contains(&limit) {
            return Err(Error::BadRequest {
                message: format!("limit must be between 0 and {MAX_LIMIT}"),
            });
        }

        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(Error::BadRequest {
                message: "offset must not be negative".to_string(),
            });
        }

        Ok((limit, offset))
    }
}
