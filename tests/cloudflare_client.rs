//! The REST adapter against an in-process fake control plane.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use secrecy::SecretString;
use tokio::net::TcpListener;

use edge_wizard::adapters::cloudflare::CloudflareControlPlane;
use edge_wizard::application::{DeployWorkerHandler, DEFAULT_WORKER_NAME};
use edge_wizard::domain::wizard::Session;
use edge_wizard::domain::worker::{render_worker, RoutingRule};
use edge_wizard::ports::{ApiCredentials, ControlPlane, RouteBinding, ScriptUpload};

// =============================================================================
// Fake server
// =============================================================================

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone, Default)]
struct FakeState {
    requests: Arc<Mutex<Vec<Captured>>>,
    route_status: Arc<Mutex<Option<(StatusCode, &'static str)>>>,
}

async fn record(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(Captured {
        method: method.clone(),
        path: path.clone(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if path.ends_with("/workers/routes") {
        if let Some((status, body)) = *state.route_status.lock().unwrap() {
            return (status, body.to_string());
        }
    }
    if method == Method::GET {
        return (
            StatusCode::OK,
            r#"{"success":true,"errors":[],"result":{"name":"example.com"}}"#.to_string(),
        );
    }
    (
        StatusCode::OK,
        r#"{"success":true,"errors":[],"result":{}}"#.to_string(),
    )
}

async fn spawn_fake(state: FakeState) -> String {
    let app = Router::new().fallback(record).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/client/v4", addr)
}

fn credentials() -> ApiCredentials {
    ApiCredentials {
        email: "a@b.com".to_string(),
        api_key: SecretString::new("key123".to_string()),
    }
}

fn header<'a>(captured: &'a Captured, name: &str) -> &'a str {
    captured
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// =============================================================================
// Adapter calls
// =============================================================================

#[tokio::test]
async fn get_zone_sends_auth_headers() {
    let state = FakeState::default();
    let base = spawn_fake(state.clone()).await;
    let client = CloudflareControlPlane::new(&base).unwrap();

    let response = client.get_zone(&credentials(), "zone1").await.unwrap();
    assert_eq!(response.status, 200);
    assert!(response.body.contains("example.com"));

    let requests = state.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/client/v4/zones/zone1");
    assert_eq!(header(&requests[0], "x-auth-email"), "a@b.com");
    assert_eq!(header(&requests[0], "x-auth-key"), "key123");
}

#[tokio::test]
async fn put_script_sends_module_multipart() {
    let state = FakeState::default();
    let base = spawn_fake(state.clone()).await;
    let client = CloudflareControlPlane::new(&base).unwrap();

    let upload = ScriptUpload {
        account_id: "acct1".to_string(),
        worker_name: "managed-worker".to_string(),
        main_module: "main.js".to_string(),
        source: "export default {};".to_string(),
    };
    let response = client.put_script(&credentials(), &upload).await.unwrap();
    assert!(response.is_created_or_ok());

    let requests = state.requests.lock().unwrap();
    let put = &requests[0];
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.path, "/client/v4/accounts/acct1/workers/scripts/managed-worker");
    assert!(header(put, "content-type").starts_with("multipart/form-data"));
    assert!(put.body.contains("name=\"metadata\""));
    assert!(put.body.contains(r#"{"main_module":"main.js"}"#));
    assert!(put.body.contains("name=\"script\"; filename=\"main.js\""));
    assert!(put.body.contains("application/javascript+module"));
    assert!(put.body.contains("export default {};"));
}

#[tokio::test]
async fn post_route_sends_json_binding() {
    let state = FakeState::default();
    let base = spawn_fake(state.clone()).await;
    let client = CloudflareControlPlane::new(&base).unwrap();

    let binding = RouteBinding {
        pattern: "example.com/*".to_string(),
        script: "managed-worker".to_string(),
    };
    client
        .post_route(&credentials(), "zone1", &binding)
        .await
        .unwrap();

    let requests = state.requests.lock().unwrap();
    let post = &requests[0];
    assert_eq!(post.method, Method::POST);
    assert_eq!(post.path, "/client/v4/zones/zone1/workers/routes");
    let body: serde_json::Value = serde_json::from_str(&post.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "pattern": "example.com/*", "script": "managed-worker" })
    );
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CloudflareControlPlane::new(&format!("http://{}", addr)).unwrap();
    let err = client.get_zone(&credentials(), "zone1").await.unwrap_err();
    assert!(err.to_string().starts_with("Network error"));
}

// =============================================================================
// Full pipeline over HTTP
// =============================================================================

async fn deploy_through(state: FakeState) -> edge_wizard::domain::worker::DeploymentResult {
    let base = spawn_fake(state).await;
    let client = CloudflareControlPlane::new(&base).unwrap();
    let deployer = DeployWorkerHandler::new(Arc::new(client), DEFAULT_WORKER_NAME);

    let mut session = Session::new();
    let mut config = None;
    for input in ["/start", "Geo Only", "a@b.com", "key123", "zone1", "acct1", "https://example.com", "UA"] {
        if let edge_wizard::domain::wizard::Advance::Deploy(c) = session.advance(input).unwrap() {
            config = Some(c);
        }
    }
    let config = config.expect("wizard should complete");
    let script = render_worker(&RoutingRule::from_config(&config, "https://logs.example.org/v"));
    deployer.deploy(&config, &script).await
}

#[tokio::test]
async fn pipeline_issues_three_calls_in_order() {
    let state = FakeState::default();
    let result = deploy_through(state.clone()).await;

    assert!(result.success);
    assert_eq!(result.domain_or_error, "example.com");

    let requests = state.requests.lock().unwrap();
    let order: Vec<_> = requests.iter().map(|r| r.method.clone()).collect();
    assert_eq!(order, vec![Method::GET, Method::PUT, Method::POST]);
}

#[tokio::test]
async fn pipeline_accepts_existing_route_conflict() {
    let state = FakeState::default();
    *state.route_status.lock().unwrap() = Some((
        StatusCode::CONFLICT,
        r#"{"success":false,"errors":[{"code":10020,"message":"A route with the same pattern already exists"}]}"#,
    ));

    let result = deploy_through(state).await;
    assert!(result.success);
}

#[tokio::test]
async fn pipeline_reports_route_rejection() {
    let state = FakeState::default();
    *state.route_status.lock().unwrap() = Some((
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"errors":[{"code":10021,"message":"Invalid route pattern"}]}"#,
    ));

    let result = deploy_through(state).await;
    assert!(!result.success);
    assert_eq!(result.domain_or_error, "Route Error: Invalid route pattern");
}
