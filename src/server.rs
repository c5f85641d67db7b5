//! HTTP JSON API.
//!
//! The only wire contract: read the whole document, replace the whole
//! document, fetch the daily quote. The retired `/checklist` path answers
//! 410 so stale clients learn where to go.

use crate::document::Document;
use crate::error::Result;
use crate::quote::daily_quote;
use crate::store::Store;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: String,
}

#[derive(Debug, Serialize)]
pub struct GoneResponse {
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/data", get(get_data).post(save_data))
        .route("/quote", get(get_quote))
        .route("/checklist", get(legacy_checklist))
        .with_state(state)
}

/// `GET /data` — the full document, falling back to the built-in default
/// when nothing is persisted or the file is unreadable.
async fn get_data(State(state): State<AppState>) -> Json<Document> {
    Json(state.store.read())
}

/// `POST /data` — overwrite the persisted document with exactly the body.
async fn save_data(
    State(state): State<AppState>,
    Json(doc): Json<Document>,
) -> (StatusCode, Json<SaveResponse>) {
    match state.store.replace(&doc) {
        Ok(()) => (
            StatusCode::OK,
            Json(SaveResponse {
                success: true,
                message: "Data saved successfully".to_string(),
            }),
        ),
        Err(e) => {
            error!(error = %e, "failed to persist document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse {
                    success: false,
                    message: "Failed to save data".to_string(),
                }),
            )
        }
    }
}

async fn get_quote() -> Json<QuoteResponse> {
    Json(QuoteResponse {
        quote: daily_quote().to_string(),
    })
}

async fn legacy_checklist() -> (StatusCode, Json<GoneResponse>) {
    (
        StatusCode::GONE,
        Json(GoneResponse {
            message: "Endpoint deprecated. Use /data".to_string(),
        }),
    )
}

/// Bind the API and serve until the process is stopped.
pub async fn serve(store: Store, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(AppState::new(store))).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::default_document;
    use tempfile::TempDir;

    fn temp_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path().to_path_buf());
        (dir, AppState::new(store))
    }

    #[tokio::test]
    async fn test_get_data_serves_default_when_empty() {
        let (_dir, state) = temp_state();
        let Json(doc) = get_data(State(state)).await;
        assert_eq!(doc, default_document());
    }

    #[tokio::test]
    async fn test_post_then_get_round_trips() {
        let (_dir, state) = temp_state();
        let mut doc = default_document();
        doc.projects[0].title = "KERNEL HACKING 2027".to_string();

        let (status, Json(resp)) = save_data(State(state.clone()), Json(doc.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);
        assert_eq!(resp.message, "Data saved successfully");

        let Json(read_back) = get_data(State(state)).await;
        assert_eq!(read_back, doc);
    }

    #[tokio::test]
    async fn test_quote_matches_todays_rotation() {
        let Json(resp) = get_quote().await;
        assert_eq!(resp.quote, daily_quote());
    }

    #[tokio::test]
    async fn test_legacy_checklist_is_gone() {
        let (status, Json(resp)) = legacy_checklist().await;
        assert_eq!(status, StatusCode::GONE);
        assert!(resp.message.contains("/data"));
    }
}
