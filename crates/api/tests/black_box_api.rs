use std::io::Write;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use tempfile::NamedTempFile;

use kart_api::config::AppConfig;

const API_KEY: &str = "test-key";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    _coupon_files: Vec<NamedTempFile>,
}

impl TestServer {
    async fn spawn() -> Self {
        // HAPPYHRS is in two files, BIRTHDAY in one.
        let coupon_files = vec![
            coupon_file(&["WELCOMEX", "HAPPYHRS", "BIRTHDAY"]),
            coupon_file(&["HAPPYHRS", "FIFTYOFF"]),
            coupon_file(&["FIFTYOFF", "SPRINGSALE"]),
        ];

        let config = AppConfig {
            api_key: API_KEY.to_string(),
            coupon_files: coupon_files.iter().map(|f| f.path().to_path_buf()).collect(),
            promo_timeout: Some(Duration::from_secs(5)),
            ..AppConfig::default()
        };

        // Same router as prod, bound to an ephemeral port.
        let app = kart_api::app::build_app(&config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            _coupon_files: coupon_files,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn coupon_file(codes: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for code in codes {
        writeln!(file, "{code}").unwrap();
    }
    file.flush().unwrap();
    file
}

async fn post_order(
    client: &reqwest::Client,
    srv: &TestServer,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(srv.url("/order"))
        .header("api_key", API_KEY)
        .json(&body)
        .send()
        .await
        .unwrap()
}

fn assert_close(actual: &serde_json::Value, expected: f64) {
    let actual = actual.as_f64().expect("expected a number");
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_and_fetches_products() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/product")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0]["id"], "10");

    let res = client.get(srv.url("/product/12")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "iPad Pro 12.9");
    assert_eq!(body["category"], "Tablet");
    assert!(body["image"]["tablet"].is_string());
}

#[tokio::test]
async fn product_lookup_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/product/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(body["error"]["type"], "Bad Request");

    let res = client.get(srv.url("/product/999")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn api_key_required_for_orders() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let order = json!({"items": [{"productId": "10", "quantity": 1}]});

    let res = client
        .post(srv.url("/order"))
        .json(&order)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"]["message"], "missing API key");

    let res = client
        .post(srv.url("/order"))
        .header("api_key", "wrong")
        .json(&order)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"]["message"], "invalid API key");
}

#[tokio::test]
async fn order_without_coupon_is_priced() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = post_order(
        &client,
        &srv,
        json!({"items": [{"productId": "10", "quantity": 2}]}),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_close(&body["total"], 1999.98);
    assert_close(&body["discount"], 0.0);
    assert_eq!(body["items"][0]["productId"], "10");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["products"][0]["name"], "iPhone 15 Pro");
    assert!(body["placedAt"].is_string());
}

#[tokio::test]
async fn coupon_in_two_files_applies_discount() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = post_order(
        &client,
        &srv,
        json!({
            "couponCode": "HAPPYHRS",
            "items": [{"productId": "10", "quantity": 2}]
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_close(&body["discount"], 199.998);
    assert_close(&body["total"], 1799.982);
}

#[tokio::test]
async fn coupon_rejections_are_unprocessable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for code in ["BIRTHDAY", "NOWHERES", "short", "lowercase1", "  "] {
        let res = post_order(
            &client,
            &srv,
            json!({
                "couponCode": code,
                "items": [{"productId": "11", "quantity": 1}]
            }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "code {code:?}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"]["code"], 422);
        assert_eq!(body["error"]["type"], "Unprocessable Entity");
    }
}

#[tokio::test]
async fn bad_order_requests_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases = [
        json!({"items": []}),
        json!({}),
        json!({"items": [{"productId": "10", "quantity": 0}]}),
        json!({"items": [{"productId": "", "quantity": 1}]}),
        json!({"items": [{"productId": "999", "quantity": 1}]}),
    ];
    for order in cases {
        let res = post_order(&client, &srv, order.clone()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{order}");
    }

    let res = client
        .post(srv.url("/order"))
        .header("api_key", API_KEY)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn correlation_id_is_echoed_or_generated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/health"))
        .header("x-correlation-id", "trace-abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("x-correlation-id").unwrap(),
        "trace-abc-123"
    );

    let res = client.get(srv.url("/product")).send().await.unwrap();
    let generated = res.headers().get("x-correlation-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn cors_preflight_allows_order_posts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .request(reqwest::Method::OPTIONS, srv.url("/order"))
        .header("origin", "http://shop.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,api_key")
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
