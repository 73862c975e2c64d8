use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use speechlens::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

fn echo_app() -> Router {
    Router::new()
        .route(
            "/",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[tokio::test]
async fn given_incoming_request_id_when_handled_then_handler_and_response_see_it() {
    let response = echo_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"abc-123");
}

#[tokio::test]
async fn given_no_request_id_when_handled_then_generates_uuid() {
    let response = echo_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
}

#[tokio::test]
async fn given_malformed_request_id_when_handled_then_replaces_it() {
    let response = echo_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "bad id with spaces")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_ne!(header, "bad id with spaces");
    assert!(uuid::Uuid::parse_str(&header).is_ok());
}
