//! HTTP API tests
//!
//! Drives the full router in-process:
//! - Anonymous requests get 401, under-privileged ones 403
//! - Predictions are cached per session and exported by educators
//! - Admin account management refuses self-deletion
//! - Error bodies are `{error, code}`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use scholaris::auth::{AuthService, InMemoryAccountStore, PasswordPolicy, SessionConfig};
use scholaris::http_server::{AppState, HttpServer, HttpServerConfig};
use scholaris::model::{DecisionTree, Predictor, RandomForest, TargetMapping, TreeNode};
use scholaris::preprocessing::FeatureSchema;
use scholaris::validation::Validator;

// =============================================================================
// Helper Functions
// =============================================================================

/// Debtors drop out, everyone else graduates
fn predictor() -> Predictor {
    let schema = FeatureSchema::new(vec![
        "Age at enrollment".to_string(),
        "Debtor_1".to_string(),
    ])
    .unwrap();

    let tree = DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature: 1,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf {
                value: vec![1.0, 1.0, 8.0],
            },
            TreeNode::Leaf {
                value: vec![9.0, 1.0, 0.0],
            },
        ],
    };
    let forest = RandomForest::new(2, 3, vec![tree]).unwrap();

    Predictor::new(
        Box::new(forest),
        schema,
        vec!["Debtor".to_string()],
        TargetMapping::default(),
    )
    .unwrap()
}

fn app() -> Router {
    let auth = AuthService::new(
        InMemoryAccountStore::new(),
        SessionConfig::default(),
        PasswordPolicy::default(),
    );
    let state = Arc::new(AppState::new(auth, predictor(), Validator::default()));
    HttpServer::new(HttpServerConfig::default(), state).router()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, _, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_user(app: &Router, admin: &str, username: &str, role: &str) {
    let (status, _, body) = send(
        app,
        "POST",
        "/admin/users",
        Some(admin),
        Some(json!({
            "username": username,
            "password": "correct horse",
            "role": role,
            "name": "Test Account"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], role);
}

// =============================================================================
// Access Tests
// =============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let app = app();
    let (status, _, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_features"], 2);
}

#[tokio::test]
async fn test_anonymous_gets_401() {
    let app = app();
    for (method, uri) in [
        ("GET", "/model/info"),
        ("GET", "/catalog/mappings"),
        ("GET", "/predict/export"),
        ("GET", "/admin/users"),
    ] {
        let (status, _, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["code"], 401);
    }

    let (status, _, _) = send(&app, "POST", "/predict", Some("forged"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_login_is_generic() {
    let app = app();
    let (status, _, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "admin", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_user_role_cannot_export_or_administer() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;
    create_user(&app, &admin, "viewer", "user").await;
    let viewer = login(&app, "viewer", "correct horse").await;

    let (status, _, _) = send(&app, "GET", "/predict/export", Some(&viewer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, body) = send(&app, "GET", "/admin/users", Some(&viewer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 403);

    let (status, _, _) = send(&app, "GET", "/model/info", Some(&viewer), None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Prediction Tests
// =============================================================================

#[tokio::test]
async fn test_predict_then_export() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;
    create_user(&app, &admin, "teacher", "educator").await;
    let teacher = login(&app, "teacher", "correct horse").await;

    let (status, _, _) = send(&app, "GET", "/predict/export", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let record = json!({"Age at enrollment": 30, "Debtor": 1, "Scholarship holder": 0});
    let (status, _, body) = send(&app, "POST", "/predict", Some(&teacher), Some(record)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "Dropout");
    assert_eq!(body["confidence_percent"], "90.0%");
    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Financial Counseling"));
    assert!(titles.contains(&"Flexible Scheduling"));

    let (status, headers, report) =
        send(&app, "GET", "/predict/export", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"student_prediction_"));
    assert_eq!(report["prediction"], "Dropout");
    assert_eq!(report["confidence"], "90.0%");
    assert_eq!(report["student_data"]["Debtor"], 1);
}

#[tokio::test]
async fn test_unknown_category_does_not_fail() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;

    let record = json!({"Age at enrollment": 19, "Debtor": 7});
    let (status, _, body) = send(&app, "POST", "/predict", Some(&admin), Some(record)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "Graduate");
    assert_eq!(body["dropped_categories"], json!(["Debtor_7"]));
}

#[tokio::test]
async fn test_validate_route() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;

    let record = json!({
        "Curricular units 1st sem (enrolled)": 5,
        "Curricular units 1st sem (approved)": 6
    });
    let (status, _, body) =
        send(&app, "POST", "/predict/validate", Some(&admin), Some(record)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_record_is_400() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/predict",
        Some(&admin),
        Some(json!({"Gender": "female"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

// =============================================================================
// Administration Tests
// =============================================================================

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;

    let (status, _, body) = send(&app, "DELETE", "/admin/users/admin", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _, body) = send(&app, "GET", "/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;
    create_user(&app, &admin, "teacher", "educator").await;

    let (status, _, _) = send(
        &app,
        "POST",
        "/admin/users",
        Some(&admin),
        Some(json!({
            "username": "teacher",
            "password": "another password",
            "role": "user",
            "name": "Someone Else"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = app();
    let admin = login(&app, "admin", "admin123").await;

    let (status, _, _) = send(&app, "POST", "/auth/logout", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, "GET", "/auth/session", Some(&admin), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
