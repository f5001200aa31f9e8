//! End-to-end tests for the detection API.

use serde_json::{json, Value};

mod common;

async fn post_detect(addr: std::net::SocketAddr, body: &Value) -> (u16, Value) {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/api/detect", addr))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn get_json(addr: std::net::SocketAddr, path: &str) -> (u16, Value) {
    let response = reqwest::get(format!("http://{}{}", addr, path))
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_detect_flags_keyword_entries() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let body = json!({
        "videoId": "BV1xx411c7mD",
        "subtitles": [
            {"content": "今天的教程正式开始", "from": 0.0},
            {"content": "感谢本期赞助商的支持", "from": 42.0},
            {"content": "我们继续看代码", "from": 70.0},
        ],
    });
    let (status, response) = post_detect(addr, &body).await;

    assert_eq!(status, 200);
    assert_eq!(response["success"], true);
    assert_eq!(response["hasAds"], true);
    assert_eq!(response["adTimestamps"][0]["start"], 42.0);
    assert_eq!(response["adTimestamps"][0]["end"], 57.0);
    assert_eq!(response["confidence"], 0.95);
}

#[tokio::test]
async fn test_detect_without_keywords_is_clean() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let body = json!({
        "videoId": "BV1clean",
        "subtitles": [
            {"content": "这是一段普通的解说", "from": 3.0},
        ],
    });
    let (status, response) = post_detect(addr, &body).await;

    assert_eq!(status, 200);
    assert_eq!(response["success"], true);
    assert_eq!(response["hasAds"], false);
    assert_eq!(response["adTimestamps"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_result_roundtrip_and_overwrite() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let with_ads = json!({
        "videoId": "BV1rt",
        "subtitles": [{"content": "广告时间", "from": 10.0}],
    });
    post_detect(addr, &with_ads).await;

    let (status, stored) = get_json(addr, "/api/result/BV1rt").await;
    assert_eq!(status, 200);
    assert_eq!(stored["success"], true);
    assert_eq!(stored["hasAds"], true);
    assert_eq!(stored["adTimestamps"][0]["start"], 10.0);
    assert!(stored["detectedAt"].is_string());

    // A second detect for the same id replaces the result outright.
    let without_ads = json!({
        "videoId": "BV1rt",
        "subtitles": [{"content": "正常内容", "from": 10.0}],
    });
    post_detect(addr, &without_ads).await;

    let (_, overwritten) = get_json(addr, "/api/result/BV1rt").await;
    assert_eq!(overwritten["hasAds"], false);
    assert_eq!(overwritten["adTimestamps"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_result_id_is_handled() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let (status, response) = get_json(addr, "/api/result/never-seen").await;
    assert_eq!(status, 200);
    assert_eq!(response["success"], false);
    assert!(response["message"].is_string());
}

#[tokio::test]
async fn test_malformed_body_returns_handled_failure() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/api/detect", addr))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_signed_request_accepted() {
    let mut config = common::test_config();
    config.security.signature_required = true;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let timestamp = common::client_now_millis();
    let body = json!({
        "videoId": "BV1sig",
        "subtitles": [],
        "clientVersion": "1.4.0",
        "timestamp": timestamp,
        "signature": common::sign("BV1sig", "1.4.0", timestamp),
    });
    let (status, response) = post_detect(addr, &body).await;

    assert_eq!(status, 200);
    assert_eq!(response["success"], true);
}

#[tokio::test]
async fn test_stale_signature_rejected() {
    let mut config = common::test_config();
    config.security.signature_required = true;
    let (addr, _shutdown) = common::spawn_server(config).await;

    // Ten minutes old; the encoding itself is correct.
    let timestamp = common::client_now_millis() - 600_000;
    let body = json!({
        "videoId": "BV1old",
        "subtitles": [],
        "clientVersion": "1.4.0",
        "timestamp": timestamp,
        "signature": common::sign("BV1old", "1.4.0", timestamp),
    });
    let (status, response) = post_detect(addr, &body).await;

    assert_eq!(status, 200);
    assert_eq!(response["success"], false);
}

#[tokio::test]
async fn test_tampered_signature_rejected() {
    let mut config = common::test_config();
    config.security.signature_required = true;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let timestamp = common::client_now_millis();
    let body = json!({
        "videoId": "BV1bad",
        "subtitles": [],
        "clientVersion": "1.4.0",
        "timestamp": timestamp,
        // Signed for a different video id.
        "signature": common::sign("BV1other", "1.4.0", timestamp),
    });
    let (_, response) = post_detect(addr, &body).await;
    assert_eq!(response["success"], false);
}

#[tokio::test]
async fn test_unsigned_request_rejected_when_required() {
    let mut config = common::test_config();
    config.security.signature_required = true;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let body = json!({
        "videoId": "BV1nosig",
        "subtitles": [],
    });
    let (status, response) = post_detect(addr, &body).await;

    assert_eq!(status, 200);
    assert_eq!(response["success"], false);
}

#[tokio::test]
async fn test_per_user_rate_limit() {
    let mut config = common::test_config();
    config.rate_limit.per_user_limit = 3;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let body = json!({
        "videoId": "BV1rate",
        "subtitles": [],
        "user": {"uid": 10086, "username": "tester"},
    });

    for _ in 0..3 {
        let (_, response) = post_detect(addr, &body).await;
        assert_eq!(response["success"], true);
    }

    let (status, rejected) = post_detect(addr, &body).await;
    assert_eq!(status, 200);
    assert_eq!(rejected["success"], false);
    assert!(rejected["message"].as_str().unwrap().contains("try again later"));

    // A different user on the same IP still gets through.
    let other = json!({
        "videoId": "BV1rate",
        "subtitles": [],
        "user": {"uid": 424242, "username": "someone-else"},
    });
    let (_, response) = post_detect(addr, &other).await;
    assert_eq!(response["success"], true);
}

#[tokio::test]
async fn test_result_endpoint_rate_limit() {
    let mut config = common::test_config();
    config.rate_limit.result_per_ip_limit = 2;
    let (addr, _shutdown) = common::spawn_server(config).await;

    let (_, first) = get_json(addr, "/api/result/whatever").await;
    assert_eq!(first["success"], false); // not found, but allowed
    let (_, second) = get_json(addr, "/api/result/whatever").await;
    assert_eq!(second["success"], false);

    let (status, third) = get_json(addr, "/api/result/whatever").await;
    assert_eq!(status, 200);
    assert_eq!(third["success"], false);
    assert!(third["message"].as_str().unwrap().contains("try again later"));
}

#[tokio::test]
async fn test_shutdown_trigger_stops_the_server() {
    let (addr, shutdown) = common::spawn_server(common::test_config()).await;

    let (status, _) = get_json(addr, "/").await;
    assert_eq!(status, 200);

    shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // The listener is gone; new connections must be refused.
    let result = reqwest::Client::new()
        .get(format!("http://{}/", addr))
        .send()
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let (status, body) = get_json(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let client = reqwest::Client::new();
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/api/detect", addr),
        )
        .header("Origin", "https://www.bilibili.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://www.bilibili.com")
    );
}

#[tokio::test]
async fn test_cors_preflight_for_unknown_origin_gets_no_allowance() {
    let (addr, _shutdown) = common::spawn_server(common::test_config()).await;

    let client = reqwest::Client::new();
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/api/detect", addr),
        )
        .header("Origin", "https://evil.example")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
