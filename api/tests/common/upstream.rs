use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

#[derive(Debug, Clone)]
pub enum UpstreamReply {
    Json(StatusCode, Value),
    Text(StatusCode, String),
}

impl UpstreamReply {
    pub fn ok(body: Value) -> Self {
        UpstreamReply::Json(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        UpstreamReply::Text(status, body.to_string())
    }
}

impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        match self {
            UpstreamReply::Json(status, body) => (status, Json(body)).into_response(),
            UpstreamReply::Text(status, body) => (status, body).into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub workspace: String,
    pub workflow: String,
    pub body: Value,
}

#[derive(Clone, Default)]
struct UpstreamState {
    hits: Arc<AtomicUsize>,
    replies: Arc<Mutex<VecDeque<UpstreamReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local stand-in for the hosted workflow endpoint. Replies are served in
/// order and the last one repeats once the script runs out.
pub struct MockUpstream {
    pub base_url: String,
    state: UpstreamState,
    task: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start(replies: Vec<UpstreamReply>) -> Self {
        let state = UpstreamState::default();
        state.replace(replies);

        let app = Router::new()
            .route("/{workspace}/workflows/{workflow}", post(run_workflow))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Mock upstream has no address");

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock upstream crashed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            task,
        }
    }

    pub fn set_replies(&self, replies: Vec<UpstreamReply>) {
        self.state.replace(replies);
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl UpstreamState {
    fn replace(&self, replies: Vec<UpstreamReply>) {
        *self.replies.lock().unwrap() = replies.into();
    }

    fn next_reply(&self) -> UpstreamReply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or_else(|| UpstreamReply::status(StatusCode::NOT_FOUND, "no reply scripted"))
        }
    }
}

async fn run_workflow(
    State(state): State<UpstreamState>,
    Path((workspace, workflow)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> UpstreamReply {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(RecordedRequest {
        workspace,
        workflow,
        body,
    });

    state.next_reply()
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port listener");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);

    format!("http://{}", addr)
}
