//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use session_router::config::{
    BrowserConfig, HostConfig, RegionConfig, RouterConfig, StrategyKind, UserConfig, VersionConfig,
};

/// Start a programmable mock backend on an ephemeral port.
///
/// The responder gets the 0-based call number and returns (status, body).
/// Returns the bound address and a counter of received requests.
pub async fn spawn_backend<F, Fut>(responder: F) -> (SocketAddr, Arc<AtomicU32>)
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let call_counter = calls.clone();
    let responder = Arc::new(responder);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let responder = responder.clone();
                    let call = call_counter.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let (status, body) = responder(call).await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls)
}

/// Read the request head and as much body as Content-Length announces, so
/// the client never sees a reset while still writing.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => return,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
            Err(_) => return,
        }
        if let Some(head_end) = find_head_end(&buffer) {
            let content_length = content_length(&buffer[..head_end]);
            if buffer.len() >= head_end + content_length {
                return;
            }
        }
    }
}

fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|i| i + 4)
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())?
        })
        .unwrap_or(0)
}

/// An address nothing listens on; connections are refused immediately.
pub async fn dead_backend_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Quota config for user "bob", browser "chrome" version "40.0.2", with the
/// given regions. Selection is round-robin so tests are deterministic.
pub fn router_config(regions: &[(&str, Vec<(SocketAddr, &str)>)]) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.selection.strategy = StrategyKind::RoundRobin;
    config.users.push(UserConfig {
        name: "bob".into(),
        browsers: vec![BrowserConfig {
            name: "chrome".into(),
            default_version: "40".into(),
            versions: vec![VersionConfig {
                number: "40.0.2".into(),
                regions: regions
                    .iter()
                    .map(|(name, hosts)| RegionConfig {
                        name: name.to_string(),
                        hosts: hosts
                            .iter()
                            .map(|(addr, route_id)| HostConfig {
                                host: addr.ip().to_string(),
                                port: addr.port(),
                                route_id: route_id.to_string(),
                            })
                            .collect(),
                    })
                    .collect(),
            }],
        }],
    });
    config
}
