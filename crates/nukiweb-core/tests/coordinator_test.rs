#![allow(clippy::unwrap_used)]
// Integration tests for `Coordinator` against a wiremock Nuki Web API.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nukiweb_core::{
    Command, ConfigUpdate, Coordinator, CoordinatorConfig, CoreError, DeviceIdentifier,
    DeviceInfo, DeviceRegistry, LockAction, MemoryDeviceRegistry,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> CoordinatorConfig {
    CoordinatorConfig::new(SecretString::from("test-token".to_owned()))
        .with_base_url(Url::parse(&server.uri()).unwrap())
        .with_timeout(Duration::from_secs(5))
}

async fn setup() -> (MockServer, Coordinator, Arc<MemoryDeviceRegistry>) {
    let server = MockServer::start().await;
    let registry = Arc::new(MemoryDeviceRegistry::new());
    let coordinator = Coordinator::new(config_for(&server), registry.clone()).unwrap();
    (server, coordinator, registry)
}

fn lock_json(id: i64, brightness: i64) -> serde_json::Value {
    json!({
        "smartlockId": id,
        "type": 4,
        "name": format!("Lock {id}"),
        "state": { "state": 1, "batteryCritical": false },
        "config": { "ledBrightness": brightness }
    })
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn registry_entry(domain: &str, id: &str) -> DeviceInfo {
    DeviceInfo {
        identifier: DeviceIdentifier::new(domain, id),
        name: format!("device {id}"),
        manufacturer: "Nuki".into(),
        model: "Smart Lock".into(),
        sw_version: None,
    }
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_keys_snapshot_by_id() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(7, 2), lock_json(3, 1)])).await;

    assert!(coordinator.snapshot().is_empty());
    coordinator.refresh().await.unwrap();

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec![3, 7]);
    for id in snapshot.ids() {
        assert_eq!(snapshot.get(id).unwrap().id, id);
    }
    assert!(coordinator.last_update_success());
    assert!(coordinator.status().borrow().last_success_at.is_some());
}

#[tokio::test]
async fn test_refresh_is_idempotent_for_unchanged_data() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(1, 2), lock_json(2, 3)])).await;

    coordinator.refresh().await.unwrap();
    let first = coordinator.snapshot();
    coordinator.refresh().await.unwrap();
    let second = coordinator.snapshot();

    assert_eq!(first.as_map(), second.as_map());
}

#[tokio::test]
async fn test_empty_list_yields_empty_snapshot() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([])).await;

    coordinator.refresh().await.unwrap();
    assert!(coordinator.snapshot().is_empty());
    assert!(coordinator.last_update_success());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(1, 2)])).await;
    coordinator.refresh().await.unwrap();
    let before = coordinator.snapshot();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::UpdateFailed { .. }), "got: {err:?}");
    assert!(err.to_string().starts_with("Error communicating with API"));

    assert_eq!(coordinator.snapshot().as_map(), before.as_map());
    assert!(!coordinator.last_update_success());
    assert!(coordinator.status().borrow().last_error.is_some());
}

#[tokio::test]
async fn test_malformed_body_is_an_update_failure() {
    let (server, coordinator, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = coordinator.refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::UpdateFailed { .. }));
}

#[tokio::test]
async fn test_success_after_failure_restores_status() {
    let (server, coordinator, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_list(&server, json!([lock_json(1, 2)])).await;

    assert!(coordinator.refresh().await.is_err());
    assert!(!coordinator.last_update_success());

    coordinator.refresh().await.unwrap();
    assert!(coordinator.last_update_success());
    assert_eq!(coordinator.status().borrow().last_error, None);
}

// ── First refresh ───────────────────────────────────────────────────

#[tokio::test]
async fn test_first_refresh_auth_failure() {
    let (server, coordinator, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = coordinator.first_refresh().await.unwrap_err();
    assert!(err.is_auth_error(), "got: {err:?}");
}

#[tokio::test]
async fn test_first_refresh_other_failure_is_setup_failed() {
    let (server, coordinator, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = coordinator.first_refresh().await.unwrap_err();
    assert!(matches!(err, CoreError::SetupFailed { .. }), "got: {err:?}");
}

// ── Reconciliation ──────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_removes_vanished_devices_from_registry() {
    let (server, coordinator, registry) = setup().await;
    for id in ["1", "2", "3", "not-a-number"] {
        registry.register(registry_entry("nuki_web", id));
    }
    registry.register(registry_entry("other_domain", "2"));

    mount_list(&server, json!([lock_json(1, 2), lock_json(3, 2)])).await;
    coordinator.refresh().await.unwrap();

    let remaining: Vec<String> = registry
        .devices("nuki_web")
        .into_iter()
        .map(|d| d.identifier.device_id)
        .collect();
    assert_eq!(remaining, vec!["1".to_owned(), "3".to_owned()]);
    assert_eq!(registry.devices("other_domain").len(), 1);
}

#[tokio::test]
async fn test_reconcile_never_adds_entries() {
    let (server, coordinator, registry) = setup().await;
    mount_list(&server, json!([lock_json(1, 2), lock_json(2, 2)])).await;

    coordinator.refresh().await.unwrap();
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_empty_list_removes_every_registered_device() {
    let (server, coordinator, registry) = setup().await;
    registry.register(registry_entry("nuki_web", "1"));
    registry.register(registry_entry("nuki_web", "2"));
    mount_list(&server, json!([])).await;

    coordinator.refresh().await.unwrap();
    assert!(registry.devices("nuki_web").is_empty());
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_write_then_refresh_shows_new_value() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(1, 2)])).await;
    coordinator.refresh().await.unwrap();

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/config"))
        .and(body_json(json!({ "ledBrightness": 4 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, json!([lock_json(1, 4)])).await;

    coordinator
        .execute(Command::UpdateConfig {
            device_id: 1,
            update: ConfigUpdate::single("ledBrightness", 4),
        })
        .await
        .unwrap();

    let device = coordinator.snapshot().get(1).unwrap();
    assert_eq!(device.config.as_ref().unwrap().led_brightness, Some(4));
}

#[tokio::test]
async fn test_action_posts_code() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(1, 2)])).await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/action"))
        .and(body_json(json!({ "action": 5, "option": 0 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    coordinator
        .execute(Command::action(1, LockAction::LockNGoUnlatch))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_write_error_propagates_without_refresh() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(1, 2)])).await;
    coordinator.refresh().await.unwrap();
    let before = coordinator.snapshot();

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/advanced/config"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad value"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = coordinator
        .execute(Command::UpdateAdvancedConfig {
            device_id: 1,
            update: ConfigUpdate::single("motorSpeed", 1),
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, CoreError::Api { status: Some(400), .. }),
        "got: {err:?}"
    );
    assert_eq!(coordinator.snapshot().as_map(), before.as_map());
}

// ── Observers ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_snapshot_stream_yields_current_then_refreshes() {
    use tokio_stream::StreamExt;

    let (server, coordinator, _) = setup().await;
    let mut stream = coordinator.subscribe().into_stream();

    let first = stream.next().await.unwrap();
    assert!(first.is_empty());

    mount_list(&server, json!([lock_json(1, 2), lock_json(2, 4)])).await;
    coordinator.refresh().await.unwrap();

    let next = stream.next().await.unwrap();
    assert_eq!(next.len(), 2);
}

#[tokio::test]
async fn test_subscribers_see_successful_refreshes_only() {
    let (server, coordinator, _) = setup().await;
    let mut stream = coordinator.subscribe();
    assert!(stream.current().is_empty());

    mount_list(&server, json!([lock_json(1, 2)])).await;
    coordinator.refresh().await.unwrap();

    let snap = stream.changed().await.unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(stream.current().len(), 1);

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    assert!(coordinator.refresh().await.is_err());

    let waited = tokio::time::timeout(Duration::from_millis(100), stream.changed()).await;
    assert!(waited.is_err(), "failed refresh must not notify observers");
}

// ── Scheduling ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_scheduler_polls_until_shutdown() {
    let server = MockServer::start().await;
    mount_list(&server, json!([lock_json(1, 2)])).await;
    let config = config_for(&server).with_scan_interval(Duration::from_millis(100));
    let coordinator = Coordinator::new(config, Arc::new(MemoryDeviceRegistry::new())).unwrap();

    coordinator.start().await;
    tokio::time::sleep(Duration::from_millis(450)).await;

    let polled = server.received_requests().await.unwrap().len();
    assert!(polled >= 2, "expected periodic refreshes, saw {polled}");
    assert_eq!(coordinator.snapshot().len(), 1);

    coordinator.shutdown().await;
    assert!(coordinator.snapshot().is_empty());

    let after_shutdown = server.received_requests().await.unwrap().len();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(server.received_requests().await.unwrap().len(), after_shutdown);
}

#[tokio::test]
async fn test_zero_interval_never_schedules() {
    let server = MockServer::start().await;
    mount_list(&server, json!([])).await;
    let config = config_for(&server).with_scan_interval(Duration::ZERO);
    let coordinator = Coordinator::new(config, Arc::new(MemoryDeviceRegistry::new())).unwrap();

    coordinator.start().await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(server.received_requests().await.unwrap().is_empty());
    coordinator.shutdown().await;
}

#[tokio::test]
async fn test_in_flight_refresh_does_not_outlive_shutdown() {
    let (server, coordinator, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([lock_json(1, 2)]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let pending = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.request_refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    coordinator.shutdown().await;
    pending.await.unwrap();

    assert!(coordinator.is_closed());
    assert!(coordinator.snapshot().is_empty());
}

#[tokio::test]
async fn test_closed_coordinator_ignores_refreshes_and_rejects_writes() {
    let (server, coordinator, _) = setup().await;
    mount_list(&server, json!([lock_json(1, 2)])).await;
    Mock::given(method("POST"))
        .and(path("/smartlock/1/action"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    coordinator.first_refresh().await.unwrap();

    coordinator.shutdown().await;
    coordinator.refresh().await.unwrap();
    assert!(coordinator.snapshot().is_empty());

    let err = coordinator
        .execute(Command::action(1, LockAction::Lock))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Internal(_)), "got: {err:?}");
    assert!(coordinator.snapshot().is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_refreshes_do_not_interleave() {
    let (server, coordinator, _) = setup().await;
    Mock::given(method("GET"))
        .and(path("/smartlock"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([lock_json(1, 2)]))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let started = std::time::Instant::now();
    let (a, b, c) = tokio::join!(
        coordinator.refresh(),
        coordinator.refresh(),
        coordinator.refresh()
    );
    let elapsed = started.elapsed();
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert!(
        elapsed >= Duration::from_millis(300),
        "refreshes overlapped: three took {elapsed:?}"
    );
    assert_eq!(coordinator.snapshot().len(), 1);
}

// ── One-shot ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_oneshot_fetches_once_and_shuts_down() {
    let server = MockServer::start().await;
    mount_list(&server, json!([lock_json(1, 2), lock_json(2, 3)])).await;

    let count = Coordinator::oneshot(config_for(&server), |c| async move {
        Ok(c.snapshot().len())
    })
    .await
    .unwrap();

    assert_eq!(count, 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
