//! Integration tests for the settings store lifecycle and session override

use std::sync::Arc;

use agent_sentry::{DurableStore, JsonFileStore, MemoryStore, SecuritySettings, SettingsStore};

fn fresh_store() -> (Arc<MemoryStore>, SettingsStore) {
    let durable = Arc::new(MemoryStore::new());
    let store = SettingsStore::new(durable.clone());
    (durable, store)
}

// ============================================================================
// Uninitialized and hydrated reads
// ============================================================================

#[test]
fn test_defaults_before_init() {
    let (_, store) = fresh_store();
    let settings = store.load();
    assert!(settings.auto_deny_privilege_escalation);
    assert!(settings.auto_deny_critical);
    assert!(settings.require_type_to_critical);
    assert!(settings.session_override_until.is_none());
    assert!(!settings.command_allowlist.is_empty());
}

#[test]
fn test_loads_are_independent_copies() {
    let (_, store) = fresh_store();
    let mut a = store.load();
    let b = store.load();
    assert_eq!(a, b);

    // Mutating a returned value must not touch the cache.
    a.command_allowlist.clear();
    a.auto_deny_critical = false;
    assert_ne!(a, store.load());
    assert_eq!(store.load(), b);
}

#[test]
fn test_save_then_load_round_trips_every_field() {
    let (_, store) = fresh_store();
    store.init();

    let settings = SecuritySettings {
        auto_deny_privilege_escalation: false,
        auto_deny_critical: false,
        require_type_to_critical: false,
        command_allowlist: Vec::new(),
        command_denylist: vec![r"\bdd\b".to_string()],
        session_override_until: Some(1_900_000_000_000),
        token_rotation_interval_days: 90,
        read_only_projects: true,
    };
    store.save(settings.clone());
    assert_eq!(store.load(), settings);
}

// ============================================================================
// Durable hydration and migration
// ============================================================================

#[test]
fn test_durable_row_survives_restart() {
    let durable = Arc::new(MemoryStore::new());

    {
        let store = SettingsStore::new(durable.clone());
        store.init();
        let mut settings = store.load();
        settings.read_only_projects = true;
        store.save(settings);
        store.flush_pending();
    }

    // A new store over the same durable row sees the saved value.
    let store = SettingsStore::new(durable);
    store.init();
    assert!(store.load().read_only_projects);
}

#[test]
fn test_legacy_migration_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let durable_path = dir.path().join("settings.json");
    let legacy_path = dir.path().join("settings.legacy.json");
    std::fs::write(&legacy_path, r#"{"tokenRotationIntervalDays": 45}"#).unwrap();

    let store = SettingsStore::new(Arc::new(JsonFileStore::new(&durable_path)))
        .with_legacy(Arc::new(JsonFileStore::new(&legacy_path)));
    store.init();

    assert_eq!(store.load().token_rotation_interval_days, 45);
    assert!(durable_path.exists(), "blob migrated into durable store");
    assert!(!legacy_path.exists(), "plaintext blob deleted");
}

#[test]
fn test_init_failure_degrades_to_defaults() {
    let durable = Arc::new(MemoryStore::new());
    durable.save("{ definitely not json").unwrap();

    let store = SettingsStore::new(durable);
    store.init();
    assert_eq!(store.load(), SecuritySettings::default());
}

#[test]
fn test_reset_clears_durable_row() {
    let (durable, store) = fresh_store();
    store.init();
    let mut settings = store.load();
    settings.read_only_projects = true;
    store.save(settings);
    store.flush_pending();
    assert!(durable.row().is_some());

    store.reset();
    assert_eq!(store.load(), SecuritySettings::default());
    assert!(durable.row().is_none());
}

// ============================================================================
// Session override
// ============================================================================

#[test]
fn test_activate_sets_window() {
    let (_, store) = fresh_store();
    store.init();

    store.activate_override(5);
    let remaining = store.override_remaining();
    assert!(remaining > 0, "window should be open");
    assert!(remaining <= 5 * 60_000, "window must not exceed 5 minutes");
}

#[test]
fn test_expired_window_cleared_on_read() {
    let (_, store) = fresh_store();
    store.init();

    let mut settings = store.load();
    settings.session_override_until =
        Some(chrono::Utc::now().timestamp_millis() - 10_000);
    store.save(settings);

    assert_eq!(store.override_remaining(), 0);
    assert!(
        store.load().session_override_until.is_none(),
        "expired deadline must be cleared and the clear persisted"
    );
}

#[test]
fn test_clear_override_persists() {
    let (durable, store) = fresh_store();
    store.init();

    store.activate_override(30);
    store.clear_override();
    store.flush_pending();

    assert_eq!(store.override_remaining(), 0);
    let row = durable.row().unwrap();
    assert!(row.contains("\"sessionOverrideUntil\":null"));
}

#[test]
fn test_override_without_activation_is_zero() {
    let (_, store) = fresh_store();
    store.init();
    assert_eq!(store.override_remaining(), 0);
}
