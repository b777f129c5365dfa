#![allow(dead_code)]

//! 测试用的假裁剪服务，记录收到的 multipart 字段

use axum::{
    extract::{multipart::Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use image_trim_client::{FileSelection, SelectedFile, TrimClient};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::Notify;

pub const ZIP_BYTES: &[u8] = b"PK\x03\x04fake-zip-archive";
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-png";

/// 假服务的响应方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Ok,
    ServerError,
    MalformedBody,
    EmptyZip,
    /// 收到请求后一直等待，直到调用 `release`
    Hold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedField {
    pub name: String,
    pub file_name: String,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub focus: Option<String>,
    pub fields: Vec<RecordedField>,
}

#[derive(Clone)]
struct ServiceState {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    health_checks: Arc<AtomicUsize>,
    arrived: Arc<Notify>,
    release: Arc<Notify>,
}

pub struct FakeTrimService {
    pub base_url: String,
    state: ServiceState,
}

impl FakeTrimService {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = ServiceState {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            health_checks: Arc::new(AtomicUsize::new(0)),
            arrived: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };

        let app = Router::new()
            .route("/", get(root))
            .route("/trim-single/", post(trim_single))
            .route("/batch-trim-zip/", post(batch_trim_zip))
            .route("/static/:name", get(static_file))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> TrimClient {
        TrimClient::with_base_url(&self.base_url, None).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// `GET /` 被调用的次数
    pub fn health_checks(&self) -> usize {
        self.state.health_checks.load(Ordering::SeqCst)
    }

    /// 等待服务收到一个请求
    pub async fn wait_for_request(&self) {
        self.state.arrived.notified().await;
    }

    /// 放行被 `Hold` 挂起的请求
    pub fn release(&self) {
        self.state.release.notify_one();
    }
}

pub fn selection(names: &[&str]) -> FileSelection {
    names
        .iter()
        .map(|name| SelectedFile::new(*name, PNG_BYTES.to_vec()))
        .collect::<Vec<_>>()
        .into()
}

async fn root(State(state): State<ServiceState>) -> impl IntoResponse {
    state.health_checks.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "message": "✅ Image Trim API is running!" }))
}

async fn static_file(Path(name): Path<String>) -> Response {
    if name.ends_with(".png") {
        ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn trim_single(
    State(state): State<ServiceState>,
    Query(query): Query<HashMap<String, String>>,
    multipart: Multipart,
) -> Response {
    if let Err(status) = record(&state, "/trim-single/", &query, multipart).await {
        return status.into_response();
    }

    match settle(&state).await {
        Behavior::Ok | Behavior::EmptyZip | Behavior::Hold => {
            Json(json!({ "image_url": "/static/out1.png" })).into_response()
        }
        Behavior::ServerError => server_error(),
        Behavior::MalformedBody => (StatusCode::OK, "<html>not json</html>").into_response(),
    }
}

async fn batch_trim_zip(
    State(state): State<ServiceState>,
    Query(query): Query<HashMap<String, String>>,
    multipart: Multipart,
) -> Response {
    if let Err(status) = record(&state, "/batch-trim-zip/", &query, multipart).await {
        return status.into_response();
    }

    match settle(&state).await {
        Behavior::Ok | Behavior::Hold => {
            ([(header::CONTENT_TYPE, "application/zip")], ZIP_BYTES).into_response()
        }
        Behavior::ServerError => server_error(),
        Behavior::EmptyZip => ([(header::CONTENT_TYPE, "application/zip")], Vec::<u8>::new()).into_response(),
        Behavior::MalformedBody => {
            ([(header::CONTENT_TYPE, "text/html")], "<html>oops</html>").into_response()
        }
    }
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "boom" })),
    )
        .into_response()
}

async fn record(
    state: &ServiceState,
    path: &str,
    query: &HashMap<String, String>,
    mut multipart: Multipart,
) -> Result<(), StatusCode> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        fields.push(RecordedField {
            name,
            file_name,
            size: data.len(),
        });
    }

    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.to_string(),
        focus: query.get("focus").cloned(),
        fields,
    });
    state.arrived.notify_one();
    Ok(())
}

async fn settle(state: &ServiceState) -> Behavior {
    if state.behavior == Behavior::Hold {
        state.release.notified().await;
    }
    state.behavior
}
