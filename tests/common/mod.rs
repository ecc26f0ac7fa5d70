#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A fake remote collection: `GET`/`POST` on `/quotes`, `PUT`/`DELETE` on
/// `/quotes/{id}`, and `/broken` which always answers 500.
#[derive(Clone, Default)]
pub struct FakeRemote {
    pub items: Arc<Mutex<Vec<Value>>>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FakeRemote {
    pub fn with_items(items: Vec<Value>) -> Self {
        let remote = Self::default();
        *remote.items.lock().unwrap() = items;
        remote
    }

    pub fn items(&self) -> Vec<Value> {
        self.items.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn log(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

async fn list(State(remote): State<FakeRemote>) -> Json<Vec<Value>> {
    remote.log("GET".to_string());
    Json(remote.items())
}

async fn create(State(remote): State<FakeRemote>, Json(body): Json<Value>) -> StatusCode {
    remote.log(format!("POST {}", body["id"]));
    remote.items.lock().unwrap().push(body);
    StatusCode::CREATED
}

async fn update(
    State(remote): State<FakeRemote>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    remote.log(format!("PUT {}", id));
    let mut items = remote.items.lock().unwrap();
    match items.iter_mut().find(|item| item["id"].as_i64() == Some(id)) {
        Some(existing) => *existing = body,
        None => items.push(body),
    }
    StatusCode::OK
}

async fn remove(State(remote): State<FakeRemote>, Path(id): Path<i64>) -> StatusCode {
    remote.log(format!("DELETE {}", id));
    remote
        .items
        .lock()
        .unwrap()
        .retain(|item| item["id"].as_i64() != Some(id));
    StatusCode::NO_CONTENT
}

pub fn router(remote: FakeRemote) -> Router {
    Router::new()
        .route("/quotes", get(list).post(create))
        .route("/quotes/{id}", axum::routing::put(update).delete(remove))
        .route(
            "/broken",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
                .post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .with_state(remote)
}

/// Serves `remote` on an ephemeral port and returns the base address,
/// e.g. "http://127.0.0.1:41234".
pub async fn serve(remote: FakeRemote) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(remote)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Like [`serve`], but on its own runtime thread so blocking tests (the CLI
/// binary) can talk to it.
pub fn serve_in_background(remote: FakeRemote) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            tx.send(serve(remote).await).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}
