/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::Value;
use simapi::{Client, ClientConfig};
use std::time::Duration;

/// Serves `router` on a random local port from a background thread and returns
/// the base url.
#[allow(dead_code)]
pub(crate) fn serve(router: Router) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Serves a single canned JSON response at `path`
#[allow(dead_code)]
pub(crate) fn serve_json(path: &str, status: StatusCode, body: Value) -> String {
    let router = Router::new().route(
        path,
        get(move || {
            let body = body.clone();
            async move { (status, axum::Json(body)) }
        }),
    );
    serve(router)
}

/// Unauthenticated client for a mock server
#[allow(dead_code)]
pub(crate) fn client(base_url: &str) -> Client {
    client_with_timeout(base_url, Duration::from_secs(5))
}

#[allow(dead_code)]
pub(crate) fn client_with_timeout(base_url: &str, timeout: Duration) -> Client {
    Client::new(ClientConfig {
        base_url: base_url.to_string(),
        timeout,
        netrc_path: None,
        use_netrc: false,
    })
    .unwrap()
}
