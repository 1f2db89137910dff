use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use book_haven::infrastructure::{AppState, Config};
use book_haven::server;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup_app(backend_url: &str, production: bool) -> Router {
    let config = Config {
        backend_url: backend_url.to_string(),
        production,
        ..Config::default()
    };
    server::build_router(AppState::new(config).expect("valid backend url"))
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "username": username, "password": password })).unwrap(),
        ))
        .unwrap()
}

fn auth_check(method: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/auth_check").method(method);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_login_sets_http_only_cookie() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({ "username": "ada", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "jwt-abc",
            "refresh": "r"
        })))
        .expect(1)
        .mount(&backend)
        .await;
    let app = setup_app(&backend.uri(), false);

    let response = app.oneshot(login_request("ada", "hunter2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response).expect("login should set a cookie");
    assert!(cookie.starts_with("auth-token=jwt-abc"), "{}", cookie);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=2592000"));
    assert!(!cookie.contains("Secure"));

    assert_eq!(json_body(response).await, json!({ "loggedIn": true }));
}

#[tokio::test]
async fn test_production_cookie_is_secure() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "jwt-abc" })))
        .mount(&backend)
        .await;
    let app = setup_app(&backend.uri(), true);

    let response = app.oneshot(login_request("ada", "hunter2")).await.unwrap();
    let cookie = set_cookie(&response).expect("login should set a cookie");
    assert!(cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_failure_maps_detail() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&backend)
        .await;
    let app = setup_app(&backend.uri(), false);

    let response = app.oneshot(login_request("ada", "wrong")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    assert_eq!(
        json_body(response).await,
        json!({ "error": "No active account found with the given credentials" })
    );
}

#[tokio::test]
async fn test_login_failure_without_detail() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "password": ["required"] })))
        .mount(&backend)
        .await;
    let app = setup_app(&backend.uri(), false);

    let response = app.oneshot(login_request("ada", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid credentials" }));
}

#[tokio::test]
async fn test_auth_check_is_presence_only() {
    let backend = MockServer::start().await;
    let app = setup_app(&backend.uri(), false);

    let response = app.clone().oneshot(auth_check("GET", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "isAuthenticated": false }));

    let response = app
        .oneshot(auth_check("GET", Some("auth-token=anything")))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({ "isAuthenticated": true }));

    // The token is never checked with the backend
    assert!(backend.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let backend = MockServer::start().await;
    let app = setup_app(&backend.uri(), false);

    let response = app
        .clone()
        .oneshot(auth_check("POST", Some("auth-token=jwt-abc")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response).expect("logout should expire the cookie");
    assert!(cookie.starts_with("auth-token=;"), "{}", cookie);
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(json_body(response).await, json!({ "isAuthenticated": false }));

    // Browser dropped the cookie: next check reports logged out
    let response = app.oneshot(auth_check("GET", None)).await.unwrap();
    assert_eq!(json_body(response).await, json!({ "isAuthenticated": false }));
}

#[tokio::test]
async fn test_malformed_login_body_is_invalid_credentials() {
    let backend = MockServer::start().await;
    let app = setup_app(&backend.uri(), false);

    let request = Request::builder()
        .uri("/api/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"ada"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    assert_eq!(json_body(response).await, json!({ "error": "Invalid credentials" }));

    // No JSON content type at all
    let request = Request::builder()
        .uri("/api/login")
        .method("POST")
        .body(Body::from("username=ada&password=x"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid credentials" }));

    assert!(backend.received_requests().await.unwrap().is_empty());
}
