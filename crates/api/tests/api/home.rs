use crate::helpers::{dataset_bounds, spawn_app, MockClimateAccess};
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use hyper::{header, Method};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn index_lists_every_route() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_dataset_bounds()
        .times(1)
        .returning(dataset_bounds);

    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/api/v1.0/{start}"));
    assert!(html.contains("/api/v1.0/{start}/{end}"));
    assert!(html.contains("YYYY-MM-DD"));
    // Dataset coverage comes from the live bounds
    assert!(html.contains("2010-01-01"));
    assert!(html.contains("2017-08-23"));
}

#[tokio::test]
async fn docs_page_is_served() {
    let climate_data = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/docs")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
}
