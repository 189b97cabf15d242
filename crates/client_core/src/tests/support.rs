//! In-process stand-in for the remote prediction service.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    routing::post,
    Router,
};
use shared::domain::PredictionKind;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    Json(serde_json::Value),
    Raw(Vec<u8>),
    Multipart(Vec<RecordedPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: RecordedBody,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Option<std::time::Duration>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockService {
    pub server_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl MockState {
    async fn reply(&self) -> impl IntoResponse {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body.clone(),
        )
    }
}

async fn handle_numeric(State(state): State<MockState>, uri: Uri, body: Bytes) -> impl IntoResponse {
    let recorded = match serde_json::from_slice(&body) {
        Ok(value) => RecordedBody::Json(value),
        Err(_) => RecordedBody::Raw(body.to_vec()),
    };
    state.requests.lock().await.push(RecordedRequest {
        path: uri.path().to_string(),
        body: recorded,
    });
    state.reply().await
}

async fn handle_upload(
    State(state): State<MockState>,
    uri: Uri,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let len = field.bytes().await.map(|bytes| bytes.len()).unwrap_or_default();
        parts.push(RecordedPart {
            name,
            file_name,
            content_type,
            len,
        });
    }
    state.requests.lock().await.push(RecordedRequest {
        path: uri.path().to_string(),
        body: RecordedBody::Multipart(parts),
    });
    state.reply().await
}

/// Serves every prediction route, answering each call with `status` and `body`.
pub async fn spawn_mock_service(status: StatusCode, body: impl Into<String>) -> MockService {
    spawn_mock_service_with_delay(status, body, None).await
}

pub async fn spawn_mock_service_with_delay(
    status: StatusCode,
    body: impl Into<String>,
    delay: Option<std::time::Duration>,
) -> MockService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body: body.into(),
        delay,
        requests: requests.clone(),
    };

    let mut app: Router<MockState> = Router::new();
    for kind in PredictionKind::ALL {
        app = if kind.takes_image() {
            app.route(kind.path(), post(handle_upload))
        } else {
            app.route(kind.path(), post(handle_numeric))
        };
    }
    let app = app.with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockService {
        server_url: format!("http://{addr}"),
        requests,
    }
}

/// An address nothing is listening on.
pub async fn unreachable_server_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
