//! Shared helpers for client integration tests.
#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use codequest_app::clients::http::HttpBackend;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Backend pointed at `base` with a short timeout.
pub fn backend(base: &str) -> HttpBackend {
    HttpBackend::new(base, Duration::from_secs(2)).unwrap()
}

/// Base URL of a port nothing listens on.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
