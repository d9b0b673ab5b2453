//! End-to-end: header in, middleware, handler, chain out.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Json, Router, middleware as axum_mw};
use hopchain::{ForwardedContext, forwarded_context_middleware, parse_forwarded};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Handler in the shape a reverse proxy would use: report the client and
/// re-render the chain as it would be emitted downstream.
async fn inspect(Extension(ctx): Extension<ForwardedContext>) -> Json<Value> {
    Json(json!({
        "client": ctx.client(),
        "chain": &ctx.chain,
        "rendered": ctx.chain.to_string(),
    }))
}

fn app() -> Router {
    Router::new()
        .route("/inspect", get(inspect))
        .layer(axum_mw::from_fn(forwarded_context_middleware))
}

async fn send_request(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.expect("request failed");
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));
    (status, value)
}

#[tokio::test]
async fn test_full_chain_through_router() {
    let req = Request::builder()
        .uri("/inspect")
        .header(
            "Forwarded",
            r#"for=192.0.2.43,for="[2001:db8:cafe::17]";proto=https"#,
        )
        .header("Forwarded", "for=unknown")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_request(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client"], "192.0.2.43");
    assert_eq!(
        body["chain"],
        json!([
            {"for": "192.0.2.43"},
            {"for": "[2001:db8:cafe::17]", "proto": "https"},
            {"for": "unknown"},
        ])
    );
}

#[tokio::test]
async fn test_rendered_chain_reparses_to_same_hops() {
    let header = "for=192.0.2.60;proto=http;by=203.0.113.43, for=198.51.100.17";
    let req = Request::builder()
        .uri("/inspect")
        .header("Forwarded", header)
        .body(Body::empty())
        .unwrap();

    let (_, body) = send_request(req).await;
    let rendered = body["rendered"].as_str().expect("rendered chain");
    assert_eq!(parse_forwarded(rendered), parse_forwarded(header));
}

#[tokio::test]
async fn test_legacy_fallback_through_router() {
    let req = Request::builder()
        .uri("/inspect")
        .header("X-Forwarded-For", "1.2.3.4, 5.6.7.8")
        .body(Body::empty())
        .unwrap();

    let (_, body) = send_request(req).await;
    assert_eq!(body["client"], "1.2.3.4");
    assert_eq!(body["rendered"], "for=1.2.3.4, for=5.6.7.8");
}
