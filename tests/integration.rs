//! Integration tests: health, register/login, and tier-gated routes.
//!
//! Run with `cargo test`. Tests that need a database set:
//! - `TEST_DATABASE_URL` (Postgres, run migrations first)
//! and are skipped otherwise.

use authgate::auth::JwtSecret;
use authgate::{create_app, db, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

const TEST_JWT_SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

async fn test_state(database_url: &str) -> Result<AppState, Box<dyn std::error::Error>> {
    let db_pool = db::create_pool(database_url).await?;
    let jwt_secret = JwtSecret::new(TEST_JWT_SECRET.to_string(), 3600);
    Ok(AppState {
        db: db_pool,
        jwt_secret,
    })
}

async fn test_app() -> Option<axum::Router> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip integration test: set TEST_DATABASE_URL");
            return None;
        }
    };
    match test_state(&database_url).await {
        Ok(s) => Some(create_app(s)),
        Err(e) => {
            eprintln!("Skip integration test: {}", e);
            None
        }
    }
}

fn unique_username(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {}", t));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let Some(app) = test_app().await else { return };

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let Some(app) = test_app().await else { return };

    let username = unique_username("alice");
    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            serde_json::json!({ "username": username, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let json = json_body(res).await;
    assert_eq!(
        json.get("username").and_then(|v| v.as_str()),
        Some(username.as_str())
    );
    assert!(json.get("id").and_then(|v| v.as_str()).is_some());
    assert!(
        json.get("password_hash").is_none(),
        "hash must never leave the store"
    );

    let res = app
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "username": username, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    let token = json
        .get("access_token")
        .and_then(|v| v.as_str())
        .expect("response should contain access_token");

    // The issued token verifies and names the user as non-admin.
    let jwt = JwtSecret::new(TEST_JWT_SECRET.to_string(), 3600);
    let claims = jwt.verify(token).unwrap();
    assert_eq!(claims.sub, username);
    assert!(!claims.admin);
}

#[tokio::test]
async fn duplicate_register_is_conflict() {
    let Some(app) = test_app().await else { return };

    let username = unique_username("dup");
    let body = serde_json::json!({ "username": username, "password": "password123" });

    let res = app
        .clone()
        .oneshot(post_json("/auth/register", body.clone()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Same username, different password: still a conflict.
    let body = serde_json::json!({ "username": username, "password": "otherpass456" });
    let res = app
        .oneshot(post_json("/auth/register", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn concurrent_duplicate_register_one_winner() {
    let Some(app) = test_app().await else { return };

    let username = unique_username("race");
    let body = serde_json::json!({ "username": username, "password": "password123" });

    let (a, b) = tokio::join!(
        app.clone().oneshot(post_json("/auth/register", body.clone())),
        app.clone().oneshot(post_json("/auth/register", body.clone())),
    );
    let (a, b) = (a.unwrap().status(), b.unwrap().status());
    let mut statuses = [a, b];
    statuses.sort();
    assert_eq!(
        statuses,
        [StatusCode::CREATED, StatusCode::CONFLICT],
        "exactly one of two simultaneous registrations may win"
    );
}

#[tokio::test]
async fn login_failure_is_uniform() {
    let Some(app) = test_app().await else { return };

    let username = unique_username("uniform");
    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            serde_json::json!({ "username": username, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Wrong password for a real user.
    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "username": username, "password": "wrongpass1" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = json_body(res).await;

    // Unknown user entirely.
    let res = app
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "username": unique_username("ghost"), "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let unknown_user = json_body(res).await;

    assert_eq!(
        wrong_password, unknown_user,
        "login must not reveal which half of the credentials was wrong"
    );
}

#[tokio::test]
async fn tier_gates_protected_and_admin_routes() {
    let Some(app) = test_app().await else { return };

    // No token at all.
    let res = app
        .clone()
        .oneshot(get_with_token("/protected", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let res = app
        .clone()
        .oneshot(get_with_token("/protected", Some("garbage")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Register alice and log in.
    let username = unique_username("alice");
    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            serde_json::json!({ "username": username, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({ "username": username, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let token = json_body(res).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    // Authenticated tier passes, admin tier does not.
    let res = app
        .clone()
        .oneshot(get_with_token("/protected", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(get_with_token("/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(
        json.get("username").and_then(|v| v.as_str()),
        Some(username.as_str())
    );
    assert_eq!(json.get("admin").and_then(|v| v.as_bool()), Some(false));

    let res = app
        .clone()
        .oneshot(get_with_token("/admin", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // A token minted with the admin claim clears the admin gate.
    let jwt = JwtSecret::new(TEST_JWT_SECRET.to_string(), 3600);
    let admin_token = jwt.issue(&username, true).unwrap();
    let res = app
        .oneshot(get_with_token("/admin", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let Some(app) = test_app().await else { return };

    let res = app
        .oneshot(post_json(
            "/auth/register",
            serde_json::json!({ "username": unique_username("short"), "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
