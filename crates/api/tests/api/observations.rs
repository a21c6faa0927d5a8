use crate::helpers::{spawn_app, MockClimateAccess};
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use climate_api::{PrecipitationReading, TemperatureReading};
use hyper::{header, Method};
use serde_json::{from_slice, json, Value};
use std::{collections::HashMap, sync::Arc};
use tower::ServiceExt;

fn mock_precipitation_data() -> Vec<PrecipitationReading> {
    vec![
        PrecipitationReading {
            date: String::from("2016-08-24"),
            prcp: Some(0.08),
        },
        PrecipitationReading {
            date: String::from("2016-08-25"),
            prcp: None,
        },
        PrecipitationReading {
            date: String::from("2016-08-26"),
            prcp: Some(1.45),
        },
    ]
}

#[tokio::test]
async fn precipitation_returns_one_object_per_reading() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_all_precipitation()
        .times(1)
        .returning(|| Ok(mock_precipitation_data()));

    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/precipitation")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"2016-08-24": 0.08},
            {"2016-08-25": null},
            {"2016-08-26": 1.45},
        ])
    );
}

#[tokio::test]
async fn precipitation_round_trips_the_raw_pairs() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_all_precipitation()
        .times(1)
        .returning(|| Ok(mock_precipitation_data()));

    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/precipitation")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    // Parsing the response back should recover exactly the pairs the
    // store produced
    let parsed: Vec<HashMap<String, Option<f64>>> = from_slice(&body).unwrap();
    let pairs: Vec<(String, Option<f64>)> = parsed
        .into_iter()
        .flat_map(|entry| entry.into_iter())
        .collect();

    let expected: Vec<(String, Option<f64>)> = mock_precipitation_data()
        .into_iter()
        .map(|reading| (reading.date, reading.prcp))
        .collect();
    assert_eq!(pairs, expected);
}

#[tokio::test]
async fn stations_returns_plain_identifiers() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_distinct_stations().times(1).returning(|| {
        Ok(vec![
            String::from("USC00519397"),
            String::from("USC00513117"),
            String::from("USC00516128"),
        ])
    });

    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/stations")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Vec<String> = from_slice(&body).unwrap();
    assert_eq!(
        parsed,
        vec!["USC00519397", "USC00513117", "USC00516128"]
    );
}

#[tokio::test]
async fn tobs_returns_window_readings() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_last_year_observations()
        .times(1)
        .returning(|| {
            Ok(vec![
                TemperatureReading {
                    date: String::from("2016-08-24"),
                    tobs: 79.0,
                },
                TemperatureReading {
                    date: String::from("2016-08-25"),
                    tobs: 80.0,
                },
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/tobs")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("application/json"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: Value = from_slice(&body).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"2016-08-24": 79.0},
            {"2016-08-25": 80.0},
        ])
    );
}
