//! Settings store lifecycle
//!
//! A dual-speed store: synchronous reads against an in-memory cache,
//! best-effort asynchronous persistence to a durable collaborator. The
//! cache holds a single settings value that is replaced wholesale on every
//! save, so a reader never observes a torn write. Classification and
//! matching sit on the latency-critical path in front of agent actions;
//! nothing here waits on I/O.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use crate::settings::SecuritySettings;

/// Errors from durable store collaborators. Absorbed and logged by the
/// settings store; never surfaced to callers of `load`/`save`/`reset`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store payload invalid: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// A durable settings row. The production implementation is encrypted at
/// rest and lives outside this crate; the engine only sees this trait.
pub trait DurableStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, payload: &str) -> Result<(), StoreError>;
    fn reset(&self) -> Result<(), StoreError>;
}

/// In-memory durable store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    row: Mutex<Option<String>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `save` calls fail, to exercise the absorbed-failure
    /// and retry paths.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Current row contents, for assertions.
    pub fn row(&self) -> Option<String> {
        self.row.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

impl DurableStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.row.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone())
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Other("simulated save failure".to_string()));
        }
        *self.row.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(payload.to_string());
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        *self.row.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Plain-file durable store. Used as the stand-in durable row in the CLI
/// binary and as the reader for the legacy unencrypted blob.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default durable row location: `~/.config/agent-sentry/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("agent-sentry/settings.json"))
    }

    /// Location of the legacy unencrypted blob migrated on first init.
    pub fn legacy_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("agent-sentry/settings.legacy.json"))
    }
}

impl DurableStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn save(&self, payload: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// The settings store: cached policy settings with best-effort durability
/// and the session override window.
#[derive(Clone)]
pub struct SettingsStore {
    durable: Arc<dyn DurableStore>,
    legacy: Option<Arc<dyn DurableStore>>,
    cache: Arc<Mutex<Option<SecuritySettings>>>,
    /// Single-slot pending durable payload. A failed flush leaves the slot
    /// occupied so the next save retries it.
    pending: Arc<Mutex<Option<String>>>,
    /// Serializes flushes so an older payload can never land after a newer
    /// one.
    flush_lock: Arc<Mutex<()>>,
}

impl SettingsStore {
    pub fn new(durable: Arc<dyn DurableStore>) -> Self {
        Self {
            durable,
            legacy: None,
            cache: Arc::new(Mutex::new(None)),
            pending: Arc::new(Mutex::new(None)),
            flush_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Attach the legacy unencrypted blob consulted once during `init`.
    pub fn with_legacy(mut self, legacy: Arc<dyn DurableStore>) -> Self {
        self.legacy = Some(legacy);
        self
    }

    /// One-shot startup hydration. Migrates the legacy blob into the
    /// durable store (only when the durable row is empty), deletes the
    /// legacy blob regardless of outcome, then merges the durable row over
    /// the defaults. Never returns an error and never blocks on a failed
    /// collaborator: any failure degrades to defaults with a warning.
    pub fn init(&self) {
        {
            let cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            if cache.is_some() {
                return;
            }
        }

        self.migrate_legacy();

        let settings = match self.durable.load() {
            Ok(Some(payload)) => match serde_json::from_str::<SecuritySettings>(&payload) {
                // `#[serde(default)]` on the struct merges field-by-field:
                // durable values win, missing fields come from defaults.
                Ok(settings) => settings,
                Err(e) => {
                    warn!("stored settings unreadable, using defaults: {e}");
                    SecuritySettings::default()
                }
            },
            Ok(None) => SecuritySettings::default(),
            Err(e) => {
                warn!("settings store unavailable, using defaults: {e}");
                SecuritySettings::default()
            }
        };

        *self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(settings);
    }

    fn migrate_legacy(&self) {
        let Some(legacy) = &self.legacy else {
            return;
        };

        match legacy.load() {
            Ok(Some(blob)) => {
                match self.durable.load() {
                    Ok(None) => {
                        if let Err(e) = self.durable.save(&blob) {
                            warn!("legacy settings migration failed: {e}");
                        }
                    }
                    Ok(Some(_)) => {} // durable row already exists; keep it
                    Err(e) => warn!("could not inspect durable store before migration: {e}"),
                }
            }
            Ok(None) => {}
            Err(e) => warn!("could not read legacy settings: {e}"),
        }

        // The plaintext copy must never outlive the durable store, even
        // when migration itself failed.
        if let Err(e) = legacy.reset() {
            warn!("could not delete legacy settings blob: {e}");
        }
    }

    /// Current settings. Before `init` this is the built-in defaults.
    /// Always a deep copy: callers cannot corrupt the cache through the
    /// value they receive.
    pub fn load(&self) -> SecuritySettings {
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }

    /// Replace the cached settings and schedule a best-effort durable
    /// flush. Any `load` issued after this returns observes the new value;
    /// a flush failure is logged and retried on the next save, never
    /// surfaced here.
    pub fn save(&self, settings: SecuritySettings) {
        let payload = match serde_json::to_string(&settings) {
            Ok(payload) => payload,
            Err(e) => {
                // Still honor read-your-writes on the cache.
                *self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(settings);
                warn!("settings not serializable, durable write skipped: {e}");
                return;
            }
        };

        *self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(settings);
        *self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(payload);

        let store = self.clone();
        thread::spawn(move || store.flush_pending());
    }

    /// Write the pending payload to the durable store, if any. Called from
    /// the background flush thread; exposed so tests can drain the slot
    /// deterministically.
    pub fn flush_pending(&self) {
        let _guard = self
            .flush_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let Some(payload) = self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner).take() else {
            return;
        };

        if let Err(e) = self.durable.save(&payload) {
            warn!("durable settings write failed, will retry on next save: {e}");
            let mut pending = self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            // Keep the failed payload queued unless a newer one landed.
            if pending.is_none() {
                *pending = Some(payload);
            }
        }
    }

    /// Restore defaults and clear the durable row. Safe to race with an
    /// in-flight save: the last cache write wins.
    pub fn reset(&self) {
        *self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(SecuritySettings::default());

        let _guard = self
            .flush_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        if let Err(e) = self.durable.reset() {
            warn!("durable settings reset failed: {e}");
        }
    }

    // ------------------------------------------------------------------
    // Session override
    // ------------------------------------------------------------------

    /// Open an "approve everything" window for the given number of minutes.
    pub fn activate_override(&self, minutes: i64) {
        let mut settings = self.load();
        settings.session_override_until = Some(now_ms() + minutes * 60_000);
        self.save(settings);
    }

    /// Close the override window.
    pub fn clear_override(&self) {
        let mut settings = self.load();
        settings.session_override_until = None;
        self.save(settings);
    }

    /// Milliseconds left on the override window, zero when inactive.
    ///
    /// Expiry is evaluated only here; there is no background timer. A
    /// deadline found to be in the past is cleared and the clear persisted
    /// before returning. Callers must use this accessor rather than reading
    /// `session_override_until` off a loaded settings value.
    pub fn override_remaining(&self) -> i64 {
        let settings = self.load();
        match settings.session_override_until {
            None => 0,
            Some(until) => {
                let remaining = until - now_ms();
                if remaining <= 0 {
                    self.clear_override();
                    0
                } else {
                    remaining
                }
            }
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
