use axum::{
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use course_site_core::{ResolvedRoute, Route, Target};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Public content routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/content.json", get(content_document))
        .route("/v1/export", get(export))
        .route("/v1/resolve", get(resolve))
        .route("/v1/reload", post(reload))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    path: String,
}

fn json_response(body: String) -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "application/json"),
            (CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

/// The published document, never cached.
async fn content_document(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.store().read().await;
    if store.is_loading() {
        return Err(ApiError::Unavailable("content is still loading".to_string()));
    }
    Ok(json_response(store.export_json(&Target::Full)?))
}

/// Export per target: `full`, `main` (default) or a page slug.
async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let target = Target::parse(query.target.as_deref());
    let store = state.store().read().await;
    Ok(json_response(store.export_json(&target)?))
}

/// Resolve a site path to what it renders.
async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> ApiResult<Json<Value>> {
    if !query.path.starts_with('/') {
        return Err(ApiError::BadRequest(format!(
            "path must start with `/`: {}",
            query.path
        )));
    }

    let route = Route::parse(&query.path, &state.config().store.editor_segment);
    let store = state.store().read().await;

    let body = match store.content().resolve_route(&route) {
        ResolvedRoute::Home(page) | ResolvedRoute::Page(page) => {
            json!({ "route": "page", "page": page })
        }
        ResolvedRoute::Legal(page) => json!({ "route": "legal", "legalPage": page }),
        ResolvedRoute::Tutorial => json!({ "route": "tutorial" }),
        ResolvedRoute::Editor => json!({ "route": "editor" }),
        ResolvedRoute::Redirect(location) => json!({ "route": "redirect", "location": location }),
        ResolvedRoute::NotFound => return Err(ApiError::NotFound(query.path)),
    };
    Ok(Json(body))
}

/// Re-read the published document from disk.
async fn reload(State(state): State<AppState>) -> Json<Value> {
    let mut store = state.store().write().await;
    store.initialize(state.source()).await;

    let content = store.content();
    tracing::info!(pages = content.pages.len(), "content reloaded");
    Json(json!({
        "status": "ok",
        "pages": content.pages.len(),
        "courses": content.courses.len(),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use course_site_core::{
        ContentStore, FileSource, MemoryStorage, Mode, StoreConfig, StoreOptions, SyncBus,
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::routes::build_router;

    fn write_content(path: &Path, value: &Value) {
        std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
    }

    async fn app(dir: &TempDir) -> (Router, AppState) {
        let content_path = dir.path().join("content.json");
        write_content(
            &content_path,
            &json!({
                "pageTitle": "Top courses",
                "introText": "Root intro",
                "courses": [{ "id": 1, "school": "Skillbox" }],
                "pages": [{ "slug": "python", "introText": "Python intro" }]
            }),
        );

        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            content_path: content_path.clone(),
            sync_capacity: 8,
            log_level: "debug".to_string(),
            store: StoreConfig::default(),
        };
        let bus = SyncBus::new(config.sync_capacity);
        let mut store = ContentStore::new(
            StoreOptions::for_mode(Mode::Public, &config.store),
            Arc::new(MemoryStorage::new()),
            bus.clone(),
        );
        store.initialize(&FileSource::new(&content_path)).await;

        let state = AppState::new(config, store, bus);
        (build_router(state.clone()), state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn serves_content_document_uncached() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let response = app
            .oneshot(Request::get("/content.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["pageTitle"], "Top courses");
        // Defaults are filled in for keys the file omits.
        assert_eq!(body["legalPages"][0]["slug"], "privacy");
    }

    #[tokio::test]
    async fn export_main_strips_pages() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let (status, body) = get_json(app, "/v1/export?target=main").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("pages").is_none());
        assert_eq!(body["introText"], "Root intro");
    }

    #[tokio::test]
    async fn resolves_pages_with_fallback() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let (status, body) = get_json(app, "/v1/resolve?path=/python").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "page");
        assert_eq!(body["page"]["introText"], "Python intro");
        assert_eq!(body["page"]["pageTitle"], "Top courses");
        assert_eq!(body["page"]["schoolsCount"], 1);
    }

    #[tokio::test]
    async fn unknown_page_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let (status, body) = get_json(app.clone(), "/v1/resolve?path=/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "notFound");

        let (status, body) = get_json(app, "/v1/resolve?path=/privacy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"], "/legal/privacy");
    }

    #[tokio::test]
    async fn reload_picks_up_new_file() {
        let dir = TempDir::new().unwrap();
        let (app, state) = app(&dir).await;
        write_content(
            &state.config().content_path,
            &json!({ "pageTitle": "Republished" }),
        );

        let response = app
            .clone()
            .oneshot(Request::post("/v1/reload").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (_, body) = get_json(app, "/content.json").await;
        assert_eq!(body["pageTitle"], "Republished");
    }
}
