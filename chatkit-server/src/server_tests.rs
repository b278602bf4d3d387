#![allow(clippy::unwrap_used, reason = "test assertions")]

use chatkit_types::RelayConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use super::*;

fn state_on(bind_address: &str, port: u16) -> AppState {
    let config = RelayConfig { bind_address: bind_address.to_string(), port, ..RelayConfig::default() };
    AppState::new_with_components(config, None, None)
}

#[tokio::test]
async fn test_bind_listener_uses_configured_address() {
    let listener = bind_listener(&state_on("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    assert!(addr.ip().is_loopback());
    assert_ne!(addr.port(), 0);
}

#[tokio::test]
async fn test_bind_listener_reports_unresolvable_host() {
    let err = bind_listener(&state_on("no such host.invalid", 0)).await.unwrap_err();
    assert!(err.to_string().starts_with("Failed to bind no such host.invalid:0"), "got {}", err);
}

#[tokio::test]
async fn test_serve_until_answers_then_drains() {
    let listener = bind_listener(&state_on("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_until(listener, state_on("127.0.0.1", 0), async {
        let _ = stopped.await;
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "got {}", response);
    assert!(response.contains(r#""openai":"not_configured""#));

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
