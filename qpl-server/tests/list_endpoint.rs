use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use qpl_server::dataset::QplDataset;
use qpl_server::error::NOT_FOUND_MESSAGE;
use qpl_server::{build_router, with_middleware};
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;

fn get_test_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up one directory from qpl-server to root
    path.push("data");
    path.push(filename);
    path
}

fn load_dataset() -> QplDataset {
    QplDataset::load(&get_test_data_path("qpl-data.json")).expect("Failed to load qpl-data.json")
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(build_router(load_dataset()), Method::GET, uri).await;
    (status, serde_json::from_slice(&body).expect("body is not JSON"))
}

#[tokio::test]
async fn test_no_params_returns_full_collection() {
    let dataset = load_dataset();
    let (status, body) = get_json("/api/v1/qpl").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), dataset.len());
    assert_eq!(records.as_slice(), dataset.all());
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let (status, body) = get_json("/api/v1/qpl/?offset=0&pageSize=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), load_dataset().len());
}

#[tokio::test]
async fn test_offset_and_page_size_slice_the_collection() {
    let (_, full) = get_json("/api/v1/qpl").await;
    let (status, page) = get_json("/api/v1/qpl?offset=0&pageSize=2").await;

    assert_eq!(status, StatusCode::OK);
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0], full[0]);
    assert_eq!(page[1], full[1]);

    let (_, middle) = get_json("/api/v1/qpl?offset=3&pageSize=2").await;
    assert_eq!(middle[0], full[3]);
    assert_eq!(middle[1], full[4]);
}

#[tokio::test]
async fn test_slice_is_clamped_at_the_end() {
    let len = load_dataset().len();
    let (status, body) = get_json(&format!("/api/v1/qpl?offset={}&pageSize=5", len - 1)).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records.iter().all(|r| r.is_object()));

    let (_, past_end) = get_json(&format!("/api/v1/qpl?offset={}&pageSize=5", len + 10)).await;
    assert_eq!(past_end, Value::Array(vec![]));
}

#[tokio::test]
async fn test_invalid_params_are_rejected() {
    for uri in [
        "/api/v1/qpl?offset=abc&pageSize=2",
        "/api/v1/qpl?offset=-1&pageSize=2",
        "/api/v1/qpl?offset=0",
        "/api/v1/qpl?pageSize=10",
    ] {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert!(body["error"].is_string(), "uri {uri}");
    }
}

#[tokio::test]
async fn test_health_message() {
    let (status, body) = send(build_router(load_dataset()), Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Server works.");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = get_json("/api/v2/parts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_mutation_is_not_offered() {
    let (status, body) = send(build_router(load_dataset()), Method::POST, "/api/v1/qpl").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_panics_become_json_500() {
    async fn boom() -> &'static str {
        panic!("dataset exploded")
    }
    let router = with_middleware(Router::new().route("/boom", get(boom)));

    let (status, body) = send(router, Method::GET, "/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "dataset exploded");
}
