//! OpenAPI documentation for the news API, served at `/api-docs/openapi.json`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Security scheme for the news API (session token from `/authorize`).
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token authentication. Fetch a token from `GET /authorize` and send it as:\n\n\
                            ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "newsctl",
        description = "News items with ordered category lists"
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::authorize,
        api::handlers::news::create_news,
        api::handlers::news::update_news,
        api::handlers::news::list_news,
        api::handlers::news::get_news,
    ),
    components(
        schemas(
            api::models::auth::TokenResponse,
            api::models::news::NewsCreate,
            api::models::news::NewsUpdate,
            api::models::news::NewsResponse,
            api::models::news::NewsCreatedResponse,
            api::models::news::NewsListResponse,
        )
    ),
    tags(
        (name = "authentication", description = "Session token issuance"),
        (name = "news", description = "News items and their categories"),
    )
)]
pub struct ApiDoc;
