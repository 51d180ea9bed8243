use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use stockcast_api::config::ServiceConfig;
use stockcast_core::{DemandPredictor, FeatureVector, ServiceError, ServiceResult};
use stockcast_forecast::ForecastService;
use stockcast_model::TreeEnsemble;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(predictor: Arc<dyn DemandPredictor>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = stockcast_api::app::build_app(ForecastService::new(predictor), &ServiceConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Always predicts the same daily demand.
struct FixedDemand(f64);

impl DemandPredictor for FixedDemand {
    fn predict(&self, _features: &FeatureVector) -> ServiceResult<f64> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct RejectingPredictor;

impl DemandPredictor for RejectingPredictor {
    fn predict(&self, _features: &FeatureVector) -> ServiceResult<f64> {
        Err(ServiceError::predictor("columns are missing: {'Price'}"))
    }

    fn name(&self) -> &str {
        "rejecting"
    }
}

fn valid_body() -> Value {
    json!({
        "Target Date": "2024-03-15",
        "Store ID": "S001",
        "Product ID": "P0001",
        "Category": "Groceries",
        "Region": "North",
        "Inventory Level": 231,
        "Units Sold": 127,
        "Units Ordered": 55,
        "Price": 33.5,
        "Discount": 20,
        "Weather Condition": "Rainy",
        "Holiday/Promotion": 0,
        "Competitor Pricing": 29.69,
        "Seasonality": "Autumn"
    })
}

async fn post(srv: &TestServer, body: &Value) -> (StatusCode, String) {
    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .json(body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.text().await.unwrap())
}

#[tokio::test]
async fn successful_prediction_has_three_fields_in_order() {
    let srv = TestServer::spawn(Arc::new(FixedDemand(10.0))).await;

    let (status, text) = post(&srv, &valid_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, r#"{"PredictedDemand":10.0,"EOQ":427.2,"ROL":70.0}"#);
}

#[tokio::test]
async fn cost_overrides_are_applied() {
    let srv = TestServer::spawn(Arc::new(FixedDemand(10.0))).await;

    let mut body = valid_body();
    body["Ordering Cost"] = json!("100");
    body["Holding Cost"] = json!(4);
    body["Lead Time"] = json!(3);

    let (status, text) = post(&srv, &body).await;
    assert_eq!(status, StatusCode::OK);

    let v: Value = serde_json::from_str(&text).unwrap();
    // sqrt(2 * 3650 * 100 / 4) = sqrt(182500)
    assert_eq!(v["EOQ"], json!(427.2));
    assert_eq!(v["ROL"], json!(30.0));
}

#[tokio::test]
async fn identical_requests_give_byte_identical_responses() {
    let srv = TestServer::spawn(Arc::new(FixedDemand(12.345))).await;

    let (_, a) = post(&srv, &valid_body()).await;
    let (_, b) = post(&srv, &valid_body()).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn validation_failures_return_error_envelope() {
    let srv = TestServer::spawn(Arc::new(FixedDemand(10.0))).await;

    let mut missing_region = valid_body();
    missing_region.as_object_mut().unwrap().remove("Region");
    let (status, text) = post(&srv, &missing_region).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v, json!({ "error": "Missing required fields: ['Region']" }));

    let mut bad_date = valid_body();
    bad_date["Target Date"] = json!("15-03-2024");
    let (status, text) = post(&srv, &bad_date).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_str(&text).unwrap();
    assert!(v["error"].as_str().unwrap().contains("YYYY-MM-DD"));
    assert_eq!(v.as_object().unwrap().len(), 1);

    let mut zero_holding = valid_body();
    zero_holding["Holding Cost"] = json!(0);
    let (status, text) = post(&srv, &zero_holding).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, r#"{"error":"Holding Cost must be positive"}"#);
}

#[tokio::test]
async fn predictor_failure_is_reported_without_partial_results() {
    let srv = TestServer::spawn(Arc::new(RejectingPredictor)).await;

    let (status, text) = post(&srv, &valid_body()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v, json!({ "error": "columns are missing: {'Price'}" }));
}

#[tokio::test]
async fn malformed_body_still_gets_json_error() {
    let srv = TestServer::spawn(Arc::new(FixedDemand(10.0))).await;

    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let v: Value = res.json().await.unwrap();
    assert!(v["error"].as_str().unwrap().starts_with("Request body is not valid JSON"));
}

#[tokio::test]
async fn only_post_is_served() {
    let srv = TestServer::spawn(Arc::new(FixedDemand(10.0))).await;

    let res = reqwest::Client::new().get(srv.predict_url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    let v: Value = res.json().await.unwrap();
    assert!(v.get("error").is_some());

    let res = reqwest::Client::new()
        .post(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bundled_model_serves_finite_rounded_values() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/demand_forecast_model.json");
    let model = TreeEnsemble::load(path).unwrap();
    let srv = TestServer::spawn(Arc::new(model)).await;

    let (status, text) = post(&srv, &valid_body()).await;
    assert_eq!(status, StatusCode::OK, "{text}");

    let v: Value = serde_json::from_str(&text).unwrap();
    for key in ["PredictedDemand", "EOQ", "ROL"] {
        let x = v[key].as_f64().unwrap();
        assert!(x.is_finite());
        assert!(((x * 100.0).round() - x * 100.0).abs() < 1e-6, "{key}={x}");
    }
}
