//! News endpoints. All of them sit behind the bearer-token middleware.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::instrument;

use crate::{
    AppState,
    api::models::{
        news::{NewsCreate, NewsCreatedResponse, NewsListResponse, NewsResponse, NewsUpdate},
        pagination::Pagination,
    },
    errors::{Error, Result},
    types::NewsId,
};

fn bad_request(message: String) -> Error {
    Error::BadRequest { message }
}

/// Positive news id from the path
fn news_id(path: std::result::Result<Path<NewsId>, PathRejection>) -> Result<NewsId> {
    let Path(id) = path.map_err(|e| bad_request(e.body_text()))?;
    if id <= 0 {
        return Err(bad_request(format!("invalid news id {id}")));
    }
    Ok(id)
}

#[utoipa::path(
    post,
    path = "/api/v1/news/create",
    tag = "news",
    summary = "Create a news item",
    description = "Create a news item and attach its categories in one transaction",
    request_body = NewsCreate,
    responses(
        (status = 200, description = "News created", body = NewsCreatedResponse),
        (status = 400, description = "Invalid body, or duplicate categories"),
        (status = 401, description = "Missing bearer token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("BearerAuth" = [])
    )
)]
#[instrument(skip_all)]
pub async fn create_news(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewsCreate>, JsonRejection>,
) -> Result<Json<NewsCreatedResponse>> {
    let Json(request) = payload.map_err(|e| bad_request(e.body_text()))?;
    request.validate()?;

    let id = state.news.create(request.into()).await?;
    Ok(Json(NewsCreatedResponse { id }))
}

#[utoipa::path(
    post,
    path = "/api/v1/news/edit/{id}",
    tag = "news",
    summary = "Edit a news item",
    description = "Overwrite the fields present in the body. `Categories`, when present, replaces the whole list.",
    params(
        ("id" = i64, Path, description = "News id"),
    ),
    request_body = NewsUpdate,
    responses(
        (status = 200, description = "News updated"),
        (status = 400, description = "Invalid id or body, or duplicate categories"),
        (status = 401, description = "Missing bearer token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "News not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("BearerAuth" = [])
    )
)]
#[instrument(skip_all)]
pub async fn update_news(
    State(state): State<AppState>,
    path: std::result::Result<Path<NewsId>, PathRejection>,
    payload: std::result::Result<Json<NewsUpdate>, JsonRejection>,
) -> Result<(StatusCode, &'static str)> {
    let id = news_id(path)?;
    let Json(request) = payload.map_err(|e| bad_request(e.body_text()))?;
    request.validate()?;

    state.news.update(request.into_service_request(id)).await?;
    Ok((StatusCode::OK, "OK"))
}

#[utoipa::path(
    get,
    path = "/api/v1/news/list",
    tag = "news",
    summary = "List news",
    description = "Page through news ordered by id, each with its categories",
    params(Pagination),
    responses(
        (status = 200, description = "A page of news", body = NewsListResponse),
        (status = 400, description = "limit or offset out of range"),
        (status = 401, description = "Missing bearer token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("BearerAuth" = [])
    )
)]
#[instrument(skip_all)]
pub async fn list_news(
    State(state): State<AppState>,
    query: std::result::Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<NewsListResponse>> {
    let Query(pagination) = query.map_err(|e| bad_request(e.body_text()))?;
    let (limit, offset) = pagination.params()?;

    let news = state.news.list(limit, offset).await?;
    Ok(Json(NewsListResponse {
        success: true,
        news: news.into_iter().map(NewsResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/news/{id}",
    tag = "news",
    summary = "Get a news item",
    params(
        ("id" = i64, Path, description = "News id"),
    ),
    responses(
        (status = 200, description = "The news item", body = NewsResponse),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Missing bearer token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "News not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("BearerAuth" = [])
    )
)]
#[instrument(skip_all)]
pub async fn get_news(
    State(state): State<AppState>,
    path: std::result::Result<Path<NewsId>, PathRejection>,
) -> Result<Json<NewsResponse>> {
    let id = news_id(path)?;
    let news = state.news.get(id).await?;
    Ok(Json(news.into()))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::news::{NewsCreatedResponse, NewsListResponse, NewsResponse},
        test_utils::*,
    };
    use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_news_requires_token(pool: PgPool) {
        let app = create_test_app(pool).await;

        app.get("/api/v1/news/list").await.assert_status(StatusCode::UNAUTHORIZED);

        app.get("/api/v1/news/list")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Token abc"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        app.get("/api/v1/news/list")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.token"))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_then_list(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (name, value) = auth_header();

        let response = app
            .post("/api/v1/news/create")
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "Hello", "Content": "World", "Categories": [1, 2]}))
            .await;
        response.assert_status(StatusCode::OK);
        let created: NewsCreatedResponse = response.json();

        let response = app.get("/api/v1/news/list").add_header(name, value).await;
        response.assert_status(StatusCode::OK);
        let body: NewsListResponse = response.json();
        assert!(body.success);
        assert_eq!(
            body.news,
            vec![NewsResponse {
                id: created.id,
                title: "Hello".to_string(),
                content: "World".to_string(),
                categories: vec![1, 2],
            }]
        );
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_rejects_bad_input(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (name, value) = auth_header();

        for body in [
            json!({"Title": "Hello", "Content": "World"}),
            json!({"Title": "", "Content": "World", "Categories": [1]}),
            json!({"Title": "Hello", "Content": "World", "Categories": [0]}),
            json!({"Title": "Hello", "Content": "World", "Categories": "1,2"}),
        ] {
            app.post("/api/v1/news/create")
                .add_header(name.clone(), value.clone())
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        app.post("/api/v1/news/create")
            .add_header(name, value)
            .text("{not json")
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_with_duplicate_categories(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (name, value) = auth_header();

        let response = app
            .post("/api/v1/news/create")
            .add_header(name, value)
            .json(&json!({"Title": "Hello", "Content": "World", "Categories": [1, 1]}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("categories already exists");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_edit_title_only(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (name, value) = auth_header();

        let created: NewsCreatedResponse = app
            .post("/api/v1/news/create")
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "Hello", "Content": "World", "Categories": [1, 2]}))
            .await
            .json();

        app.post(&format!("/api/v1/news/edit/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "Changed"}))
            .await
            .assert_status(StatusCode::OK);

        let news: NewsResponse = app
            .get(&format!("/api/v1/news/{}", created.id))
            .add_header(name, value)
            .await
            .json();
        assert_eq!(news.title, "Changed");
        assert_eq!(news.content, "World");
        assert_eq!(news.categories, vec![1, 2]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_edit_replaces_categories(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (name, value) = auth_header();

        let created: NewsCreatedResponse = app
            .post("/api/v1/news/create")
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "Hello", "Content": "World", "Categories": [1, 2]}))
            .await
            .json();

        app.post(&format!("/api/v1/news/edit/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({"Categories": [9]}))
            .await
            .assert_status(StatusCode::OK);

        let news: NewsResponse = app
            .get(&format!("/api/v1/news/{}", created.id))
            .add_header(name, value)
            .await
            .json();
        assert_eq!(news.categories, vec![9]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_edit_missing_or_invalid_id(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (name, value) = auth_header();

        let response = app
            .post("/api/v1/news/edit/999999")
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "x"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_text("news not found");

        app.post("/api/v1/news/edit/abc")
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "x"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        app.get("/api/v1/news/999999")
            .add_header(name.clone(), value.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // blank fields are rejected on edit just as on create
        let created: NewsCreatedResponse = app
            .post("/api/v1/news/create")
            .add_header(name.clone(), value.clone())
            .json(&json!({"Title": "Hello", "Content": "World", "Categories": []}))
            .await
            .json();
        let edit = format!("/api/v1/news/edit/{}", created.id);
        for body in [json!({"Title": ""}), json!({"Content": "   "})] {
            app.post(&edit)
                .add_header(name.clone(), value.clone())
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        let news: NewsResponse = app
            .get(&format!("/api/v1/news/{}", created.id))
            .add_header(name, value)
            .await
            .json();
        assert_eq!(news.title, "Hello");
        assert_eq!(news.content, "World");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_pagination_bounds(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (name, value) = auth_header();

        for i in 0..3 {
            app.post("/api/v1/news/create")
                .add_header(name.clone(), value.clone())
                .json(&json!({"Title": format!("n{i}"), "Content": "c", "Categories": []}))
                .await
                .assert_status(StatusCode::OK);
        }

        let page: NewsListResponse = app
            .get("/api/v1/news/list?limit=2&offset=1")
            .add_header(name.clone(), value.clone())
            .await
            .json();
        let titles: Vec<_> = page.news.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["n1", "n2"]);

        for query in ["limit=21", "limit=-1", "offset=-1", "limit=abc"] {
            app.get(&format!("/api/v1/news/list?{query}"))
                .add_header(name.clone(), value.clone())
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
    }
}
