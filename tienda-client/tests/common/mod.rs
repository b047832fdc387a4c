//! In-process mock backend for integration tests

#![allow(dead_code)]

use axum::Router;
use tienda_client::{ClientConfig, HttpClient};

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn http(base_url: &str) -> HttpClient {
    HttpClient::new(&ClientConfig::new(base_url).with_timeout(5)).unwrap()
}

/// A base URL nothing listens on
pub fn unreachable() -> HttpClient {
    http("http://127.0.0.1:9")
}
