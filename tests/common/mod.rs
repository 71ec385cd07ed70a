//! A local stand-in for the Memobird API.
//!
//! Records every form it receives and answers with canned JSON per endpoint.

#![allow(dead_code)]

use axum::{
    Form, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::post,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PRINT_OK: &str = r#"{"showapi_res_code":1,"showapi_res_error":"","printcontentID":555,"result":1,"smartGuid":"ABC123"}"#;
pub const BIND_OK: &str = r#"{"showapi_res_code":1,"showapi_res_error":"","showapi_userid":77}"#;

#[derive(Debug, Clone)]
pub struct Received {
    pub func: String,
    pub form: HashMap<String, String>,
}

#[derive(Default)]
struct Inner {
    received: Vec<Received>,
    replies: HashMap<String, String>,
    delay: Option<Duration>,
}

#[derive(Clone)]
pub struct MockVendor {
    pub addr: SocketAddr,
    inner: Arc<Mutex<Inner>>,
}

impl MockVendor {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));
        {
            let mut guard = inner.lock().unwrap();
            guard.replies.insert("printpaper".into(), PRINT_OK.into());
            guard.replies.insert("setuserbind".into(), BIND_OK.into());
        }

        let app = Router::new()
            .route("/home/:func", post(handle))
            .with_state(inner.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, inner }
    }

    pub fn api_prefix(&self) -> String {
        format!("http://{}/home", self.addr)
    }

    pub fn reply_with(&self, func: &str, body: &str) {
        self.inner
            .lock()
            .unwrap()
            .replies
            .insert(func.to_string(), body.to_string());
    }

    pub fn delay_replies(&self, delay: Duration) {
        self.inner.lock().unwrap().delay = Some(delay);
    }

    pub fn received(&self) -> Vec<Received> {
        self.inner.lock().unwrap().received.clone()
    }
}

async fn handle(
    State(inner): State<Arc<Mutex<Inner>>>,
    Path(func): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let (reply, delay) = {
        let mut guard = inner.lock().unwrap();
        guard.received.push(Received {
            func: func.clone(),
            form,
        });
        (guard.replies.get(&func).cloned().unwrap_or_default(), guard.delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    ([(header::CONTENT_TYPE, "application/json")], reply)
}
