//! End-to-end exercises of the screening API over an in-process router.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use vitalis::{
    animations::AnimationClient,
    api::{create_router, AppState},
    config::AnimationsConfig,
    ml::{Activation, DenseClassifier, DenseLayer},
    registry::{Disease, DiseaseEntry, ModelRegistry},
};

fn classifier(input_dim: usize, weight: f64) -> DenseClassifier {
    DenseClassifier {
        input_dim,
        input_mean: None,
        input_std: None,
        layers: vec![DenseLayer {
            weights: vec![vec![weight; input_dim]],
            bias: vec![0.0],
            activation: Activation::Sigmoid,
        }],
        threshold: 0.5,
        metadata: json!({}),
    }
}

/// Router over in-memory artifacts; `weight` controls which verdict fires.
fn test_router(weight: f64) -> Router {
    let entries = Disease::ALL
        .iter()
        .map(|d| DiseaseEntry::new(*d, classifier(d.schema().len(), weight).into()))
        .collect();
    let registry = Arc::new(ModelRegistry::from_entries(entries).unwrap());

    let animations = AnimationClient::new(AnimationsConfig {
        enabled: false,
        ..AnimationsConfig::default()
    })
    .unwrap();

    create_router(AppState::new(registry, Arc::new(animations)))
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn hypothyroid_body() -> Value {
    json!({
        "values": {
            "TSH": 1.0,
            "T3": 2.0,
            "TT4": 100.0,
            "T4U": 1.0,
            "FTI": 100.0
        }
    })
}

#[tokio::test]
async fn lists_all_five_diseases() {
    let router = test_router(10.0);
    let (status, body) = get(&router, "/api/diseases").await;
    assert_eq!(status, StatusCode::OK);

    let summaries: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(summaries.len(), 5);
    assert_eq!(summaries[0]["key"], "diabetes");
    let hypo = summaries.iter().find(|s| s["key"] == "hypothyroid").unwrap();
    assert_eq!(hypo["field_count"], 5);
}

#[tokio::test]
async fn disease_detail_renders_ordered_schema() {
    let router = test_router(10.0);
    let (status, body) = get(&router, "/api/diseases/hypothyroid").await;
    assert_eq!(status, StatusCode::OK);

    let detail: Value = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = detail["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["TSH", "T3", "TT4", "T4U", "FTI"]);
    assert_eq!(detail["fields"][0]["max"], 100.0);
}

#[tokio::test]
async fn unknown_disease_is_a_bad_request() {
    let router = test_router(10.0);
    let (status, _) = get(&router, "/api/diseases/gout").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&router, "/api/diseases/gout/predict", hypothyroid_body()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown disease"));
}

#[tokio::test]
async fn complete_submission_yields_exactly_one_canned_message() {
    let positive = test_router(10.0);
    let (status, body) =
        post_json(&positive, "/api/diseases/hypothyroid/predict", hypothyroid_body()).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["verdict"], "positive");
    assert_eq!(
        response["message"],
        "You may have Hypothyroid. Please consult a doctor."
    );
    assert!(response["animation"].is_null());

    let negative = test_router(-10.0);
    let (status, body) =
        post_json(&negative, "/api/diseases/hypothyroid/predict", hypothyroid_body()).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["verdict"], "negative");
    assert_eq!(response["message"], "You do NOT have Hypothyroid. Stay healthy!");
}

#[tokio::test]
async fn incomplete_submission_warns_and_never_predicts() {
    let router = test_router(10.0);
    let body = json!({ "values": { "TSH": 1.0, "T3": 2.0 } });

    let (status, text) = post_json(&router, "/api/diseases/hypothyroid/predict", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text.contains("Please complete all fields"));
    assert!(text.contains("TT4"));
}

#[tokio::test]
async fn non_numeric_value_is_a_bad_request() {
    let router = test_router(10.0);
    let mut body = hypothyroid_body();
    body["values"]["TSH"] = json!("elevated");

    let (status, text) = post_json(&router, "/api/diseases/hypothyroid/predict", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("TSH"));
}

#[tokio::test]
async fn predictor_failure_is_flat_error_and_service_survives() {
    let router = test_router(10.0);
    let mut body = hypothyroid_body();
    // Coerces to a float, then poisons the classifier's forward pass.
    body["values"]["TSH"] = json!("NaN");

    let (status, text) = post_json(&router, "/api/diseases/hypothyroid/predict", body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text.contains("Prediction failed"));

    // The process is still serving.
    let (status, _) = post_json(
        &router,
        "/api/diseases/hypothyroid/predict",
        hypothyroid_body(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let router = test_router(10.0);

    let (status, _) = get(&router, "/healthz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&router, "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["models_loaded"], 5);
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn index_page_is_served() {
    let router = test_router(10.0);
    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Health Predictor"));
    assert!(body.contains("Select Disease"));
}
