mod common;

use cheapdata_client::http::ApiError;
use cheapdata_client::session::core::SessionEvent;
use cheapdata_client::session::{evaluate, Access, GuardDecision};
use cheapdata_client::store::{PrefStore as _, TOKEN_KEY};
use common::{build_test_context, build_test_context_from};
use mockito::Server;
use serde_json::Value;

const LOGIN_OK: &str = r#"{
    "access_token": "tok1",
    "user": {"id": 1, "email": "a@x.com", "full_name": "Ada X", "is_admin": false}
}"#;

const ME_OK: &str = r#"{"id": 1, "email": "a@x.com", "full_name": "Ada X", "is_admin": false}"#;

/// Config with a file-backed store so two contexts ("before reload" and
/// "after reload") share persisted state.
fn persistent_config(dir: &tempfile::TempDir) -> String {
    format!(
        r#"
version: "1.0.0"
api:
  base_url: "http://placeholder.invalid"
  timeout_in_ms: 5000
store:
  enabled: true
  type: "file"
  path: "{}"
platform:
  enabled: true
  type: "plain"
  permission: "granted"
notifications:
  poll_interval_secs: 1
logging:
  level: "debug"
  format: "console"
"#,
        dir.path().join("prefs.json").to_string_lossy()
    )
}

/// Login, then simulate a reload by building a second context over the same
/// store: restore must reproduce the originally returned user.
#[tokio::test]
async fn integration_login_then_restore_roundtrip() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = persistent_config(&dir);

    let login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_OK)
        .create_async()
        .await;

    let context = build_test_context_from(&config, &server.url()).await;
    context.session.restore().await;
    let logged_in = context
        .session
        .login("a@x.com", "secret")
        .await
        .expect("login should succeed");
    login_mock.assert_async().await;

    // "Reload": fresh context over the same preference file.
    let me_mock = server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer tok1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ME_OK)
        .create_async()
        .await;

    let reloaded = build_test_context_from(&config, &server.url()).await;
    assert!(reloaded.session.is_loading());
    reloaded.session.restore().await;
    me_mock.assert_async().await;

    let restored = reloaded.session.current_user().expect("restored user");
    assert_eq!(restored, logged_in);
    assert!(reloaded.session.is_authenticated());
    assert!(!reloaded.session.is_loading());
}

/// A stale persisted token rejected on restore leaves a clean logged-out
/// state with storage wiped.
#[tokio::test]
async fn integration_restore_stale_token_logs_out() {
    let mut server = Server::new_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = persistent_config(&dir);

    {
        let seeding = build_test_context_from(&config, &server.url()).await;
        seeding
            .store
            .put(TOKEN_KEY, "stale")
            .await
            .expect("seed stale token");
    }

    let _me_mock = server
        .mock("GET", "/auth/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Could not validate credentials"}"#)
        .create_async()
        .await;

    let context = build_test_context_from(&config, &server.url()).await;
    context.session.restore().await;

    assert!(!context.session.is_loading());
    assert!(!context.session.is_authenticated());
    assert!(context.session.current_user().is_none());
    assert_eq!(context.store.get(TOKEN_KEY).await.unwrap(), None);
}

/// Three concurrent requests all failing with 401 produce exactly one
/// logged-out transition and one expiry event.
#[tokio::test]
async fn integration_concurrent_401_single_expiry() {
    let mut server = Server::new_async().await;
    let login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_OK)
        .create_async()
        .await;
    let wallet_mock = server
        .mock("GET", "/wallet")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Token expired"}"#)
        .expect(3)
        .create_async()
        .await;

    let context = build_test_context(&server.url()).await;
    context.session.restore().await;
    context
        .session
        .login("a@x.com", "secret")
        .await
        .expect("login should succeed");
    login_mock.assert_async().await;

    let mut events = context.session.subscribe();
    let (a, b, c) = tokio::join!(
        context.api.get_json::<Value>("/wallet"),
        context.api.get_json::<Value>("/wallet"),
        context.api.get_json::<Value>("/wallet"),
    );
    wallet_mock.assert_async().await;

    for result in [a, b, c] {
        assert!(matches!(
            result.expect_err("401 should error"),
            ApiError::Unauthorized { .. }
        ));
    }

    assert!(!context.session.is_authenticated());
    assert_eq!(context.store.get(TOKEN_KEY).await.unwrap(), None);

    // Exactly one transition: the first change is Expired, nothing follows.
    events.changed().await.expect("one expiry event");
    assert_eq!(*events.borrow_and_update(), SessionEvent::Expired);
    assert!(!events.has_changed().expect("channel alive"));
}

/// Guard behavior across the session lifecycle: Wait while restoring, then
/// redirect or render according to capability.
#[tokio::test]
async fn integration_guard_lifecycle() {
    let mut server = Server::new_async().await;
    let _login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_OK)
        .create_async()
        .await;

    let context = build_test_context(&server.url()).await;

    // Restore still outstanding: no redirect, whatever the gate.
    assert_eq!(
        evaluate(&context.session.snapshot(), Access::Authenticated),
        GuardDecision::Wait
    );
    assert_eq!(
        evaluate(&context.session.snapshot(), Access::Admin),
        GuardDecision::Wait
    );

    context.session.restore().await;
    assert_eq!(
        evaluate(&context.session.snapshot(), Access::Authenticated),
        GuardDecision::RedirectToLogin
    );

    context
        .session
        .login("a@x.com", "secret")
        .await
        .expect("login should succeed");
    assert_eq!(
        evaluate(&context.session.snapshot(), Access::Authenticated),
        GuardDecision::Render
    );
    // Not an admin: the admin console bounces to the standard dashboard.
    assert_eq!(
        evaluate(&context.session.snapshot(), Access::Admin),
        GuardDecision::RedirectToDashboard
    );

    context.session.logout().await;
    assert_eq!(
        evaluate(&context.session.snapshot(), Access::Authenticated),
        GuardDecision::RedirectToLogin
    );
}

/// A network-level failure must not log the user out; only an explicit 401
/// does.
#[tokio::test]
async fn integration_network_failure_keeps_session() {
    let mut server = Server::new_async().await;
    let _login_mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_OK)
        .create_async()
        .await;

    let context = build_test_context(&server.url()).await;
    context.session.restore().await;
    context
        .session
        .login("a@x.com", "secret")
        .await
        .expect("login should succeed");

    // A client pointed at a dead port over the same store: the request
    // never reaches a backend, so nothing may touch the persisted token.
    let dead = cheapdata_client::http::ApiClient::new(
        &cheapdata_client::config::ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_in_ms: 1_000,
        },
        std::sync::Arc::new(cheapdata_client::session::core::SessionCore::new(
            context.store.clone(),
        )),
    );
    let err = dead
        .get_json::<Value>("/wallet")
        .await
        .expect_err("request should fail");
    assert!(err.is_network());

    assert!(context.session.is_authenticated());
    assert_eq!(
        context.store.get(TOKEN_KEY).await.unwrap(),
        Some("tok1".to_string())
    );
}
