//! Test helpers for web API integration tests.
//!
//! Builds a TestServer over an in-memory database with a recording
//! mailer, plus request helpers shared by the suites.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use custodia::auth::TokenIssuer;
use custodia::db::Database;
use custodia::notify::{ApprovalNotifier, RecordingMailer};
use custodia::web::handlers::AppState;
use custodia::web::router::create_router;

/// Signing secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Frontend origin used for review links in tests.
pub const TEST_FRONTEND_URL: &str = "http://localhost:5173";

/// A test application: HTTP harness plus handles for assertions.
pub struct TestApp {
    /// The axum-test server.
    pub server: TestServer,
    /// Recording mailer; every notification lands here.
    pub mailer: Arc<RecordingMailer>,
    /// Database handle.
    pub db: Arc<Database>,
    /// Token issuer sharing the server's secret.
    pub tokens: TokenIssuer,
}

/// Create a test application with an in-memory database.
pub async fn create_test_app() -> TestApp {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let mailer = Arc::new(RecordingMailer::default());
    let tokens = TokenIssuer::new(TEST_SECRET);

    let notifier = Arc::new(ApprovalNotifier::new(
        mailer.clone(),
        tokens.clone(),
        TEST_FRONTEND_URL,
        "ops@example.org",
    ));

    let app_state = Arc::new(AppState::new(db.clone(), tokens.clone(), notifier));
    let router = create_router(app_state, &[]);

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        mailer,
        db,
        tokens,
    }
}

/// Register a station admin.
pub async fn signup_admin(app: &TestApp, name: &str, email: &str, station: &str) -> Value {
    let response = app
        .server
        .post("/api/auth/signup/admin")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "password123",
            "policeStation": station
        }))
        .await;

    response.json::<Value>()
}

/// Register an officer with the given role.
pub async fn signup_officer(
    app: &TestApp,
    name: &str,
    email: &str,
    station: &str,
    role: &str,
) -> Value {
    let response = app
        .server
        .post("/api/auth/signup/officer")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "password123",
            "policeStation": station,
            "role": role
        }))
        .await;

    response.json::<Value>()
}

/// Log in and return the response body.
pub async fn login(app: &TestApp, email: &str, password: &str) -> Value {
    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;

    response.json::<Value>()
}

/// Look up a user id by email, bypassing the API.
pub async fn user_id_by_email(app: &TestApp, email: &str) -> i64 {
    custodia::UserRepository::new(app.db.pool())
        .find_by_email(email)
        .await
        .expect("user lookup")
        .expect("user exists")
        .id
}
