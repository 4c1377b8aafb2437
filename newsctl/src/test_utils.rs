//! Test utilities shared by the HTTP and service tests.

use crate::{
    auth::session,
    config::{AuthConfig, Config, DatabaseConfig, PoolSettings},
};
use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use sqlx::PgPool;
use std::time::Duration;

/// Build the full router on top of a pool prepared by `#[sqlx::test]` (migrations already applied)
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    crate::Application::new_with_pool(config, pool).into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        database_url: None,
        database: DatabaseConfig {
            // Will get overridden by the pool handed to new_with_pool
            url: "Something".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                ..Default::default()
            },
            ..Default::default()
        },
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        auth: AuthConfig {
            jwt_expiry: Duration::from_secs(3600),
        },
        ..Default::default()
    }
}

/// `Authorization: Bearer <token>` for the test config's secret key
pub fn auth_header() -> (HeaderName, HeaderValue) {
    let token = session::create_session_token(&create_test_config()).expect("Failed to create session token");
    let value = HeaderValue::from_str(&format!("Bearer {token}")).expect("Token is not a valid header value");
    (AUTHORIZATION, value)
}
