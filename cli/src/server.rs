//! HTTP endpoint: `POST /html_converter`.
//!
//! Request body `{"html": "<p>...</p>"}`, response `{"data": [...]}`. A
//! missing or non-string `html` field is answered with 400 and an `errors`
//! list; every other route answers 404.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

use htmlblocks::{render, Converter, OutputShape};

/// Default request body limit (50 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// State shared by all requests.
#[derive(Clone)]
pub struct AppState {
    converter: Arc<Converter>,
    shape: OutputShape,
    body_limit: usize,
}

impl AppState {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter: Arc::new(converter),
            shape: OutputShape::Blocks,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_shape(mut self, shape: OutputShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}

#[derive(Deserialize)]
struct ConvertRequest {
    html: Option<Value>,
}

/// One failed validation, in the shape clients of this endpoint expect.
#[derive(Serialize)]
struct ValidationError {
    location: &'static str,
    param: &'static str,
    msg: &'static str,
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/html_converter", post(convert).fallback(not_found))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

async fn convert(State(state): State<AppState>, body: Bytes) -> Response {
    let html = serde_json::from_slice::<ConvertRequest>(&body)
        .ok()
        .and_then(|request| request.html);
    let Some(Value::String(html)) = html else {
        log::debug!("rejected request without an html string");
        return invalid_html();
    };

    let blocks = state.converter.convert(&html);
    match render::to_value(&blocks, state.shape) {
        Ok(data) => Json(json!({ "data": data })).into_response(),
        Err(e) => {
            log::error!("failed to render blocks: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "errors": [{ "msg": e.to_string() }] })),
            )
                .into_response()
        }
    }
}

fn invalid_html() -> Response {
    let errors = vec![ValidationError {
        location: "body",
        param: "html",
        msg: "Invalid value",
    }];
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
