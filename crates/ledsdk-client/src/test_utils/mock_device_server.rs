use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the mock gateway saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub raw_body: String,
    /// Body parsed as JSON, `Value::Null` for non-JSON uploads.
    pub body: Value,
    pub sdk_key: Option<String>,
    pub date: Option<String>,
    pub sign: Option<String>,
    pub checksum: Option<String>,
}

#[derive(Clone)]
struct MockServerState {
    responses: Arc<Mutex<VecDeque<Value>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

async fn record_handler(
    State(state): State<MockServerState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, StatusCode> {
    let raw_body = String::from_utf8_lossy(&body).into_owned();
    let request = RecordedRequest {
        path: uri.path().to_string(),
        body: serde_json::from_str(&raw_body).unwrap_or(Value::Null),
        raw_body,
        sdk_key: header(&headers, "sdkkey"),
        date: header(&headers, "date"),
        sign: header(&headers, "sign"),
        checksum: header(&headers, "checksum"),
    };
    log::debug!("Mock device server received {} {:?}", request.path, request.body);
    state.requests.lock().unwrap().push(request);

    match state.responses.lock().unwrap().pop_front() {
        Some(response) => Ok(Json(response)),
        None => {
            log::error!("Mock device server ran out of responses!");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}

/// Local stand-in for the device gateway, bound to an ephemeral port.
pub struct MockDeviceServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    pub recorded_requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockDeviceServer {
    /// Start the server; each recorded request pops the next queued response.
    pub async fn start(responses: Vec<Value>) -> Self {
        let state = MockServerState {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let recorded_requests = state.requests.clone();

        let app = Router::new()
            .route("/api/health", get(health_handler))
            .route("/api/device/{ids}", post(record_handler))
            .route("/api/file/{name}", post(record_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock device server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock device server error: {}", e);
                });
        });

        MockDeviceServer {
            addr,
            shutdown_tx,
            recorded_requests,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock device server already stopped.");
        }
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.recorded_requests.lock().unwrap().clone()
    }
}
