use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Reports whether the content document is loaded, with document counts.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let store = state.store().read().await;
    let content = store.content();

    Json(json!({
        "status": if store.is_loading() { "loading" } else { "ok" },
        "pages": content.pages.len(),
        "legalPages": content.legal_pages.len(),
        "courses": content.courses.len(),
        "issues": store.issues().len(),
        "subscribers": state.sync_bus().subscriber_count(),
    }))
}

/// Liveness probe without store access.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use course_site_core::{
        ContentStore, InlineSource, MemoryStorage, Mode, StoreConfig, StoreOptions, SyncBus,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::routes::build_router;

    fn new_store(bus: &SyncBus) -> ContentStore {
        ContentStore::new(
            StoreOptions::for_mode(Mode::Public, &StoreConfig::default()),
            Arc::new(MemoryStorage::new()),
            bus.clone(),
        )
    }

    async fn health(store: ContentStore, bus: SyncBus) -> Value {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            content_path: "content.json".into(),
            sync_capacity: 8,
            log_level: "debug".to_string(),
            store: StoreConfig::default(),
        };
        let response = build_router(AppState::new(config, store, bus))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn reports_loading_before_initialize() {
        let bus = SyncBus::new(8);
        let body = health(new_store(&bus), bus).await;
        assert_eq!(body["status"], "loading");
    }

    #[tokio::test]
    async fn reports_document_counts() {
        let bus = SyncBus::new(8);
        let mut store = new_store(&bus);
        store
            .initialize(&InlineSource::new(json!({ "courses": [{ "id": 1 }, { "id": 2 }] })))
            .await;

        let body = health(store, bus).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["courses"], 2);
        assert_eq!(body["issues"], 0);
        assert_eq!(body["subscribers"], 1);
    }
}
