//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use edge_router::{RouterServer, Shutdown, Upstreams};

/// Start a mock origin on an ephemeral port.
///
/// Every request is echoed back as `"{name} {METHOD} {path?query}\n{body}"`,
/// with `x-custom` copied to `x-echo-custom` and `host` to `x-echo-host`.
/// Two paths are special, both take the raw query string as the `Location` value:
/// - `.../redirect?<location>` answers `302 Found`
/// - `.../created?<location>` answers `201 Created`
pub async fn start_origin(name: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(move |req: Request<Body>| origin_handler(name, req));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

async fn origin_handler(name: &'static str, req: Request<Body>) -> Response {
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or_default().to_string();

    if path.ends_with("/redirect") {
        return (StatusCode::FOUND, [(header::LOCATION, query)], "").into_response();
    }
    if path.ends_with("/created") {
        return (StatusCode::CREATED, [(header::LOCATION, query)], "created").into_response();
    }

    let method = req.method().clone();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or(path);
    let custom = req
        .headers()
        .get("x-custom")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = to_bytes(req.into_body(), usize::MAX).await.unwrap();

    (
        [
            ("x-origin", name.to_string()),
            ("x-echo-custom", custom),
            ("x-echo-host", host),
        ],
        format!("{} {} {}\n{}", name, method, target, String::from_utf8_lossy(&body)),
    )
        .into_response()
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the router in front of the two origins. Returns its address.
pub async fn start_router(
    primary: SocketAddr,
    secondary: SocketAddr,
    shutdown: &Shutdown,
) -> SocketAddr {
    let upstreams = Upstreams::new(
        Url::parse(&format!("http://{}", primary)).unwrap(),
        Url::parse(&format!("http://{}", secondary)).unwrap(),
        "/painrelief",
    );
    let server = RouterServer::new(upstreams);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Send `GET {target}` over a raw connection, so the request line reaches
/// the router exactly as written. Returns the response head and body.
pub async fn raw_get(addr: SocketAddr, target: &str, host: &str) -> (String, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target, host
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    (head.to_string(), body.to_string())
}
