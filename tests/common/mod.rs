//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::net::TcpListener;

use adskip_api::{AppConfig, HttpServer, Shutdown};

/// The shared key used by default test configs.
pub const SECRET: &str = "adskip_plugin_2024_secure_key";

/// A config suitable for most tests: signatures off, limits too high to
/// interfere. Individual tests tighten what they exercise.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.signature_required = false;
    config.rate_limit.global_limit = 10_000;
    config.rate_limit.per_ip_limit = 10_000;
    config.rate_limit.per_user_limit = 10_000;
    config.rate_limit.result_per_ip_limit = 10_000;
    config
}

/// Boot the real server on an ephemeral loopback port.
///
/// Returns the bound address and the shutdown handle keeping it alive.
pub async fn spawn_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the acceptor a moment to come up.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Wall clock in milliseconds, as a browser client would send it.
pub fn client_now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

/// Client-side replica of the signature scheme: sorted-key JSON over
/// {clientVersion, timestamp, videoId}, then base64(payload + secret).
#[allow(dead_code)]
pub fn sign(video_id: &str, client_version: &str, timestamp: i64) -> String {
    let canonical = format!(
        r#"{{"clientVersion":"{}","timestamp":{},"videoId":"{}"}}"#,
        client_version, timestamp, video_id
    );
    BASE64.encode(format!("{}{}", canonical, SECRET))
}
