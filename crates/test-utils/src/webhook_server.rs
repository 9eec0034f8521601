use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Captured {
    bodies: Arc<Mutex<Vec<Value>>>,
    reply: StatusCode,
}

/// A local HTTP endpoint that captures JSON bodies posted to `/`.
pub struct WebhookCapture {
    pub addr: SocketAddr,
    bodies: Arc<Mutex<Vec<Value>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl WebhookCapture {
    /// Start a capture server on an ephemeral port answering `reply`.
    pub async fn start(reply: StatusCode) -> anyhow::Result<Self> {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let state = Captured {
            bodies: Arc::clone(&bodies),
            reply,
        };

        let app = Router::new().route("/", post(capture)).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            bodies,
            handle,
        })
    }

    /// Address without scheme, as operators usually configure it.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

impl Drop for WebhookCapture {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn capture(State(state): State<Captured>, Json(body): Json<Value>) -> StatusCode {
    state.bodies.lock().unwrap().push(body);
    state.reply
}

/// An endpoint that accepts connections and never answers.
pub struct SilentEndpoint {
    pub addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl SilentEndpoint {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        Ok(Self { addr, handle })
    }

    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for SilentEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
