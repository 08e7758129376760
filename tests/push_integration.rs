mod common;

use common::{build_test_context, build_test_context_from};
use mockito::{Matcher, Server};

const VAPID_BODY: &str = r#"{"public_key": "BGEqwzRXLTSTPCnlVIsPYTyvtLWVTLSC37usFMzUAHuAL25dIvmneEpCIhkFQqQpJGGRKAfYZpGyMuu3DHZJdkM"}"#;

const DENIED_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "http://placeholder.invalid"
  timeout_in_ms: 5000
store:
  enabled: false
platform:
  enabled: true
  type: "plain"
  permission: "denied"
notifications:
  poll_interval_secs: 1
logging:
  level: "debug"
  format: "console"
"#;

const UNSUPPORTED_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "http://placeholder.invalid"
  timeout_in_ms: 5000
store:
  enabled: false
platform:
  enabled: false
notifications:
  poll_interval_secs: 1
logging:
  level: "debug"
  format: "console"
"#;

/// Full enable/disable cycle: subscribe mirrors the subscription to the
/// backend and flips status to true; unsubscribe deregisters and flips it
/// back.
#[tokio::test]
async fn integration_subscribe_unsubscribe_cycle() {
    let mut server = Server::new_async().await;
    let key_mock = server
        .mock("GET", "/notifications/push/vapid-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VAPID_BODY)
        .create_async()
        .await;
    let subscribe_mock = server
        .mock("POST", "/notifications/push/subscribe")
        .match_body(Matcher::PartialJsonString(r#"{"keys": {}}"#.to_string()))
        .with_status(201)
        .create_async()
        .await;
    let unsubscribe_mock = server
        .mock("POST", "/notifications/push/unsubscribe")
        .with_status(200)
        .create_async()
        .await;

    let context = build_test_context(&server.url()).await;
    assert!(!context.push.check_status().await);

    assert!(context.push.subscribe().await);
    assert!(context.push.check_status().await);
    key_mock.assert_async().await;
    subscribe_mock.assert_async().await;

    assert!(context.push.unsubscribe().await);
    assert!(!context.push.check_status().await);
    unsubscribe_mock.assert_async().await;
}

/// Permission denied aborts at step one: no VAPID fetch, no backend
/// registration.
#[tokio::test]
async fn integration_denied_permission_reaches_no_endpoint() {
    let mut server = Server::new_async().await;
    let key_mock = server
        .mock("GET", "/notifications/push/vapid-key")
        .expect(0)
        .create_async()
        .await;
    let subscribe_mock = server
        .mock("POST", "/notifications/push/subscribe")
        .expect(0)
        .create_async()
        .await;

    let context = build_test_context_from(DENIED_CONFIG, &server.url()).await;
    assert!(!context.push.subscribe().await);
    assert!(!context.push.check_status().await);

    key_mock.assert_async().await;
    subscribe_mock.assert_async().await;
}

/// With the platform disabled, everything fails soft to false.
#[tokio::test]
async fn integration_unsupported_platform_fails_soft() {
    let mut server = Server::new_async().await;
    let subscribe_mock = server
        .mock("POST", "/notifications/push/subscribe")
        .expect(0)
        .create_async()
        .await;

    let context = build_test_context_from(UNSUPPORTED_CONFIG, &server.url()).await;
    assert!(!context.push.check_status().await);
    assert!(!context.push.subscribe().await);
    assert!(!context.push.unsubscribe().await);

    subscribe_mock.assert_async().await;
}
