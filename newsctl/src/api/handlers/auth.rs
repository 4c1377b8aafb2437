use axum::{Json, extract::State};

use crate::{AppState, api::models::auth::TokenResponse, auth::session, errors::Error};

/// Issue a session token
#[utoipa::path(
    get,
    path = "/authorize",
    tag = "authentication",
    summary = "Issue a session token",
    description = "Returns a signed token to send as `Authorization: Bearer <token>` on the news API",
    responses(
        (status = 200, description = "Session token", body = TokenResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn authorize(State(state): State<AppState>) -> Result<Json<TokenResponse>, Error> {
    let token = session::create_session_token(&state.config)?;
    Ok(Json(TokenResponse { token }))
}
