// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction for the HTTP
//! facade.
//!
//! This module is `pub` so that integration tests can build a test router
//! directly without starting the full binary.

use crate::models::movie::{ActorRef, MovieDocument, WriterRef};
use crate::models::search::{MovieListItem, MovieListParams};
use crate::models::version::VersionResponse;
use crate::services::search::SearchClient;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `MOVIES_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("MOVIES_VERSION");

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via
/// `State<AppState>`. The search client is the only long-lived resource; it
/// is never mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub search_client: Arc<SearchClient>,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Static liveness token", body = String))
)]
pub async fn index_handler() -> &'static str {
    "worked"
}

#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, description = "Service name and version", body = VersionResponse))
)]
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "movies-search".to_string(),
        version: VERSION.to_string(),
    })
}

/// List movies: defaults merged with the recognized query parameters, one
/// search-engine request, results relayed as a plain JSON array.
#[utoipa::path(
    get,
    path = "/api/movies/",
    params(MovieListParams),
    responses(
        (status = 200, description = "Matched movies, projected to id/title/rating", body = [MovieListItem]),
        (status = 500, description = "Search engine error", body = String)
    )
)]
pub async fn list_movies_handler(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> Result<Json<Vec<MovieListItem>>, (StatusCode, String)> {
    state
        .search_client
        .list_movies(&params)
        .await
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Search error: {e}"),
            )
        })
}

/// Fetch one movie document by id.
#[utoipa::path(
    get,
    path = "/api/movies/{movie_id}",
    params(("movie_id" = String, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The full stored document", body = MovieDocument),
        (status = 404, description = "No movie with this id"),
        (status = 500, description = "Search engine error", body = String)
    )
)]
pub async fn get_movie_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<MovieDocument>, (StatusCode, String)> {
    let movie = state
        .search_client
        .get_movie(&movie_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Search error: {e}"),
            )
        })?;

    movie.map(Json).ok_or((
        StatusCode::NOT_FOUND,
        format!("Movie '{movie_id}' not found"),
    ))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        index_handler,
        version_handler,
        list_movies_handler,
        get_movie_handler
    ),
    components(schemas(
        MovieDocument,
        MovieListItem,
        ActorRef,
        WriterRef,
        VersionResponse
    ))
)]
pub struct MoviesApiDoc;

/// Build the Axum application router, with Swagger UI mounted at
/// `/swagger-ui`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/version", get(version_handler))
        .route("/api/movies/", get(list_movies_handler))
        .route("/api/movies/{movie_id}", get(get_movie_handler))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", MoviesApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::search::MOVIES_INDEX;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    // The client does not open a connection until a request is issued, so
    // these tests run without a live Meilisearch.
    async fn create_test_app() -> Router {
        let search_client = SearchClient::new("http://127.0.0.1:7700", MOVIES_INDEX.to_string())
            .await
            .expect("Failed to create search client");

        create_router(AppState {
            search_client: Arc::new(search_client),
        })
    }

    #[tokio::test]
    async fn test_index_returns_liveness_token() {
        let app = create_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"worked");
    }

    #[tokio::test]
    async fn test_version_endpoint_response() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/version")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let version_response: VersionResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(version_response.service, "movies-search");
        assert_eq!(version_response.version, VERSION);
    }

    #[test]
    fn test_version_follows_semver_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<u32>().is_ok());
        assert!(parts[1].parse::<u32>().is_ok());
        assert!(parts[2].parse::<u32>().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_route_returns_404() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/invalid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_concurrent_requests_succeed() {
        let app = create_test_app().await;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let app_clone = app.clone();
                tokio::spawn(async move {
                    let response = app_clone
                        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                        .await
                        .unwrap();
                    response.status()
                })
            })
            .collect();

        for handle in handles {
            let status = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
        }
    }
}
