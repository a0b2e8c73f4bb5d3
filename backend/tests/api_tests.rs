//! HTTP API integration tests
//!
//! Drives the full router with collaborator doubles:
//! - Yield prediction, including weather fallback
//! - Crop image analysis
//! - Signup, login and the protected account route

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use crop_advisory::create_app;
use serde_json::{json, Value};
use shared::WeatherSnapshot;
use tower::ServiceExt; // for oneshot

use common::*;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_app(test_state());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_features"], 15);
}

#[tokio::test]
async fn test_handler_panic_becomes_error_body() {
    let app = axum::Router::new()
        .route(
            "/explode",
            axum::routing::get(|| async {
                let parts: Vec<&'static str> = Vec::new();
                parts[3]
            }),
        )
        .layer(tower_http::catch_panic::CatchPanicLayer::custom(
            crop_advisory::error::panic_response,
        ));

    let response = app
        .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Unable to process request" }));
}

// ============================================================================
// Yield prediction
// ============================================================================

#[tokio::test]
async fn test_predict_yield_with_supplied_climate() {
    let app = create_app(test_state());
    let input = serde_json::to_value(sample_input()).unwrap();

    let response = app
        .oneshot(json_request(Method::POST, "/predict_yield", &input))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["crop_name"], "Wheat");
    assert_eq!(body["location"], "Punjab");
    assert_eq!(body["predicted_yield_kgha"], 90.0);
    assert_eq!(body["total_production_tonnes"], 90.0);
    assert_eq!(body["crop_status"], "Excellent");
    assert_eq!(body["sowing_date"], "2024-11-05");
    assert_eq!(body["weather"]["temperature"], 25.0);
    assert_eq!(body["weather"]["description"], "Provided with request");
    // seven checks plus the status line
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_predict_yield_looks_up_missing_climate() {
    let app = create_app(test_state());
    let input = serde_json::to_value(input_without_climate()).unwrap();

    let response = app
        .oneshot(json_request(Method::POST, "/predict_yield", &input))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["weather"]["temperature"], 28.0);
    assert_eq!(body["weather"]["humidity"], 55.0);
    assert_eq!(body["weather"]["rainfall"], 300.0);
    assert_eq!(body["weather"]["description"], "Data from API");
}

#[tokio::test]
async fn test_request_values_override_looked_up_weather() {
    let app = create_app(test_state());
    let mut input = input_without_climate();
    input.temperature = Some(12.0);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/predict_yield",
            &serde_json::to_value(input).unwrap(),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["weather"]["temperature"], 12.0);
    assert_eq!(body["weather"]["humidity"], 55.0);
}

#[tokio::test]
async fn test_weather_error_falls_back_to_defaults() {
    let app = create_app(state_with(60.0, Arc::new(FailingWeather)));
    let input = serde_json::to_value(input_without_climate()).unwrap();

    let response = app
        .oneshot(json_request(Method::POST, "/predict_yield", &input))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["weather"]["temperature"], 25.0);
    assert_eq!(body["weather"]["humidity"], 60.0);
    assert_eq!(body["weather"]["rainfall"], 500.0);
    assert_eq!(
        body["weather"]["description"],
        "Default values (weather service unavailable)"
    );
    assert_eq!(body["crop_status"], "Moderate");
    assert_eq!(body["total_production_tonnes"], 60.0);
}

#[tokio::test]
async fn test_weather_timeout_falls_back_to_defaults() {
    let app = create_app(state_with(40.0, Arc::new(HangingWeather)));
    let input = serde_json::to_value(input_without_climate()).unwrap();

    let response = app
        .oneshot(json_request(Method::POST, "/predict_yield", &input))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["weather"]["rainfall"], 500.0);
    assert_eq!(body["crop_status"], "Poor");
}

fn hot_input_without_weather() -> shared::AgronomicInput {
    let mut input = input_without_climate();
    input.temperature = Some(40.0);
    input
}

async fn assert_supplied_temperature_survives(
    weather: Arc<dyn crop_advisory::external::WeatherSource>,
) {
    let input = hot_input_without_weather();
    let app = create_app(state_with(60.0, weather));

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/predict_yield",
            &serde_json::to_value(&input).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["weather"]["temperature"], 40.0);
    assert_eq!(body["weather"]["humidity"], 60.0);
    assert_eq!(body["weather"]["rainfall"], 500.0);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations
        .iter()
        .filter_map(Value::as_str)
        .any(|m| shared::Finding::TemperatureHot.matches(m, &input)));
}

#[tokio::test]
async fn test_weather_error_keeps_supplied_fields() {
    assert_supplied_temperature_survives(Arc::new(FailingWeather)).await;
}

#[tokio::test]
async fn test_weather_timeout_keeps_supplied_fields() {
    assert_supplied_temperature_survives(Arc::new(HangingWeather)).await;
}

#[tokio::test]
async fn test_fixed_seed_gives_identical_messages() {
    let input = serde_json::to_value(sample_input()).unwrap();

    let first = create_app(test_state())
        .oneshot(json_request(Method::POST, "/predict_yield", &input))
        .await
        .unwrap();
    let second = create_app(test_state())
        .oneshot(json_request(Method::POST, "/predict_yield", &input))
        .await
        .unwrap();

    assert_eq!(
        json_body(first).await["recommendations"],
        json_body(second).await["recommendations"]
    );
}

#[tokio::test]
async fn test_predict_yield_from_text() {
    let app = create_app(test_state());
    let text = "Crop: Rice, State: Kerala, Year: 2024, N: 20, P: 30, K: 40, pH: 6.5, \
                soil: Clay, Rainfall: 900, Temp: 30, Humidity: 85, Fertilizer: DAP, \
                Fertilizer_Amount: 30, Pesticide_Amount: 2, sowing_date: 2024-06-15, area: 2";

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/predict_yield/text",
            &json!({ "text": text }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["crop_name"], "Rice");
    assert_eq!(body["location"], "Kerala");
    // seven checks, low fertilizer, low pesticide, status
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_text_missing_field_is_bad_request() {
    let app = create_app(test_state());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/predict_yield/text",
            &json!({ "text": "Crop: Rice, N: 20" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_structured_error() {
    let app = create_app(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/predict_yield")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"Crop": "Wheat""#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_model_width_mismatch_is_generic_error() {
    let mut state = test_state();
    state.estimator = Arc::new(FixedEstimator {
        value: 50.0,
        width: 3,
    });
    let app = create_app(state);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/predict_yield",
            &serde_json::to_value(sample_input()).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Input does not match the yield model"
    );
}

// ============================================================================
// Image analysis
// ============================================================================

#[tokio::test]
async fn test_analyze_healthy_green_leaf() {
    let app = create_app(test_state());

    let response = app
        .oneshot(multipart_request(
            "/analyze_crop_image?crop_type=Rice",
            "file",
            &solid_png([30, 160, 40]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let result = &body["result"];
    assert_eq!(result["crop_type"], "Rice");
    assert_eq!(result["health_score_percent"], 100.0);
    assert_eq!(result["leaf_conditions"]["healthy_green_percent"], 100.0);
    // only the healthy category triggers
    assert_eq!(result["diagnosis"].as_array().unwrap().len(), 2);
    assert_eq!(result["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_defaults_crop_type() {
    let app = create_app(test_state());

    let response = app
        .oneshot(multipart_request(
            "/analyze_crop_image",
            "file",
            &solid_png([30, 160, 40]),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["result"]["crop_type"], "Wheat");
}

#[tokio::test]
async fn test_corrupt_image_is_image_not_found() {
    let app = create_app(test_state());

    let response = app
        .oneshot(multipart_request(
            "/analyze_crop_image",
            "file",
            b"\x89PNG but not really",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Image not found!");
}

#[tokio::test]
async fn test_missing_file_field_is_image_not_found() {
    let app = create_app(test_state());

    let response = app
        .oneshot(multipart_request(
            "/analyze_crop_image",
            "photo",
            &solid_png([30, 160, 40]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Image not found!");
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_signup_login_me_round_trip() {
    let app = create_app(test_state());

    let signup = json!({
        "username": "asha",
        "email": "asha@farm.in",
        "password": "s3cretpass"
    });
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/signup", &signup))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = json!({ "email": "asha@farm.in", "password": "s3cretpass" });
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/login", &login))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token: Value = json_body(response).await;
    assert_eq!(token["token_type"], "bearer");
    let access_token = token["access_token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = json_body(response).await;
    assert_eq!(me["username"], "asha");
    assert_eq!(me["email"], "asha@farm.in");
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let app = create_app(test_state());
    let signup = json!({
        "username": "asha",
        "email": "asha@farm.in",
        "password": "s3cretpass"
    });

    app.clone()
        .oneshot(json_request(Method::POST, "/signup", &signup))
        .await
        .unwrap();
    let response = app
        .oneshot(json_request(Method::POST, "/signup", &signup))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Email already registered");
}

#[tokio::test]
async fn test_bad_login_is_unauthorized() {
    let app = create_app(test_state());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/login",
            &json!({ "email": "nobody@farm.in", "password": "whatever1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_me_rejects_missing_and_bad_tokens() {
    let app = create_app(test_state());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await["error"],
        "Invalid or expired token"
    );
}

#[tokio::test]
async fn test_weather_snapshot_double_is_used_verbatim() {
    // Guards the StaticWeather double the other tests rely on
    let snapshot = WeatherSnapshot::from_api(1.0, 2.0, 3.0);
    let source = StaticWeather(snapshot);
    let got = tokio_test::assert_ok!(
        crop_advisory::external::WeatherSource::current(&source, "anywhere").await
    );
    assert_eq!(got, snapshot);
}
