//! Key-value storage adapters.
//!
//! Two stores back the site: a persistent one (sled) for content overrides and
//! a session-scoped one (in memory, keyed by the session cookie) for the admin
//! flags. Both present a total interface: reads return `None` on any failure
//! and writes that fail are dropped with a warning.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Raw string storage. Implementations never fail outward.
pub trait KvStore: Send + Sync {
    fn read_raw(&self, key: &str) -> Option<String>;
    fn write_raw(&self, key: &str, value: &str);
    fn remove_raw(&self, key: &str);
}

// ============================================================================
// Persistent Store (sled)
// ============================================================================

pub const OVERRIDES_TREE: &str = "overrides";

/// Overrides that survive restarts.
///
/// Whether sled is usable is decided once, at construction. A store that could
/// not be opened stays disabled for its whole lifetime.
pub struct PersistentStore {
    tree: Option<sled::Tree>,
}

impl PersistentStore {
    pub fn open(path: &Path) -> Self {
        match sled::open(path) {
            Ok(db) => Self::from_db(&db),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "persistent store unavailable, overrides will not be saved");
                Self::disabled()
            }
        }
    }

    pub fn from_db(db: &sled::Db) -> Self {
        match db.open_tree(OVERRIDES_TREE) {
            Ok(tree) => Self { tree: Some(tree) },
            Err(e) => {
                tracing::warn!(error = %e, "cannot open overrides tree");
                Self::disabled()
            }
        }
    }

    /// Throwaway database, removed when dropped.
    pub fn temporary() -> Self {
        match sled::Config::new().temporary(true).open() {
            Ok(db) => Self::from_db(&db),
            Err(e) => {
                tracing::warn!(error = %e, "cannot open temporary store");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { tree: None }
    }

    pub fn is_available(&self) -> bool {
        self.tree.is_some()
    }
}

impl KvStore for PersistentStore {
    fn read_raw(&self, key: &str) -> Option<String> {
        let tree = self.tree.as_ref()?;
        match tree.get(key.as_bytes()) {
            Ok(Some(bytes)) => String::from_utf8(bytes.to_vec()).ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "read failed");
                None
            }
        }
    }

    fn write_raw(&self, key: &str, value: &str) {
        let Some(tree) = self.tree.as_ref() else {
            return;
        };
        if let Err(e) = tree.insert(key.as_bytes(), value.as_bytes()) {
            tracing::warn!(key, error = %e, "write dropped");
        }
    }

    fn remove_raw(&self, key: &str) {
        let Some(tree) = self.tree.as_ref() else {
            return;
        };
        if let Err(e) = tree.remove(key.as_bytes()) {
            tracing::warn!(key, error = %e, "remove dropped");
        }
    }
}

// ============================================================================
// Memory Store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Option<MutexGuard<'_, HashMap<String, String>>> {
        self.values.lock().ok()
    }
}

impl KvStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.values()?.get(key).cloned()
    }

    fn write_raw(&self, key: &str, value: &str) {
        if let Some(mut values) = self.values() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_raw(&self, key: &str) {
        if let Some(mut values) = self.values() {
            values.remove(key);
        }
    }
}

// ============================================================================
// Session Store
// ============================================================================

struct SessionEntry {
    expires: DateTime<Utc>,
    values: HashMap<String, String>,
}

/// Per-browser-session values, dropped when the session expires or ends.
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            ttl: Duration::hours(ttl_hours),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> Option<MutexGuard<'_, HashMap<String, SessionEntry>>> {
        self.sessions.lock().ok()
    }

    /// Start a new, empty session and return its id.
    pub fn create(&self) -> String {
        let id: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        if let Some(mut sessions) = self.sessions() {
            sessions.insert(
                id.clone(),
                SessionEntry {
                    expires: Utc::now() + self.ttl,
                    values: HashMap::new(),
                },
            );
        }
        tracing::debug!("session created");
        id
    }

    pub fn is_active(&self, id: &str) -> bool {
        let now = Utc::now();
        self.sessions()
            .map(|s| s.get(id).is_some_and(|e| now < e.expires))
            .unwrap_or(false)
    }

    /// A `KvStore` view of one session. Writes to an unknown or expired
    /// session are dropped.
    pub fn scope<'a>(&'a self, id: &str) -> SessionScope<'a> {
        SessionScope {
            store: self,
            id: id.to_string(),
        }
    }

    pub fn end(&self, id: &str) {
        if let Some(mut sessions) = self.sessions() {
            sessions.remove(id);
        }
    }

    /// Drop expired sessions. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let Some(mut sessions) = self.sessions() else {
            return 0;
        };
        let before = sessions.len();
        sessions.retain(|_, e| now < e.expires);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entry<T>(&self, id: &str, f: impl FnOnce(&mut SessionEntry) -> T) -> Option<T> {
        let now = Utc::now();
        let mut sessions = self.sessions()?;
        let entry = sessions.get_mut(id).filter(|e| now < e.expires)?;
        Some(f(entry))
    }
}

pub struct SessionScope<'a> {
    store: &'a SessionStore,
    id: String,
}

impl SessionScope<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl KvStore for SessionScope<'_> {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.store
            .with_entry(&self.id, |e| e.values.get(key).cloned())
            .flatten()
    }

    fn write_raw(&self, key: &str, value: &str) {
        self.store.with_entry(&self.id, |e| {
            e.values.insert(key.to_string(), value.to_string());
        });
    }

    fn remove_raw(&self, key: &str) {
        self.store.with_entry(&self.id, |e| {
            e.values.remove(key);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistent_write_and_read() {
        let store = PersistentStore::temporary();
        assert!(store.is_available());
        store.write_raw("page.about.text", r#"{"hero.title":"Hi"}"#);
        assert_eq!(
            store.read_raw("page.about.text").as_deref(),
            Some(r#"{"hero.title":"Hi"}"#)
        );
    }

    #[test]
    fn test_persistent_remove() {
        let store = PersistentStore::temporary();
        store.write_raw("k", "v");
        store.remove_raw("k");
        assert_eq!(store.read_raw("k"), None);
        // Removing a missing key is harmless
        store.remove_raw("k");
    }

    #[test]
    fn test_persistent_survives_reopen() {
        let db = sled::Config::new().temporary(true).open().unwrap();
        PersistentStore::from_db(&db).write_raw("k", "v");
        assert_eq!(PersistentStore::from_db(&db).read_raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_disabled_store_is_total() {
        let store = PersistentStore::disabled();
        assert!(!store.is_available());
        store.write_raw("k", "v");
        store.remove_raw("k");
        assert_eq!(store.read_raw("k"), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.read_raw("k"), None);
        store.write_raw("k", "v");
        assert_eq!(store.read_raw("k").as_deref(), Some("v"));
        store.remove_raw("k");
        assert_eq!(store.read_raw("k"), None);
    }

    #[test]
    fn test_session_ids_unique() {
        let sessions = SessionStore::new(24);
        let a = sessions.create();
        let b = sessions.create();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_session_scopes_are_isolated() {
        let sessions = SessionStore::new(24);
        let a = sessions.create();
        let b = sessions.create();

        sessions.scope(&a).write_raw("site.admin", "true");
        assert_eq!(sessions.scope(&a).read_raw("site.admin").as_deref(), Some("true"));
        assert_eq!(sessions.scope(&b).read_raw("site.admin"), None);
    }

    #[test]
    fn test_unknown_session_drops_writes() {
        let sessions = SessionStore::new(24);
        let scope = sessions.scope("not-a-session");
        scope.write_raw("site.admin", "true");
        assert_eq!(scope.read_raw("site.admin"), None);
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_end_session_clears_values() {
        let sessions = SessionStore::new(24);
        let id = sessions.create();
        sessions.scope(&id).write_raw("site.admin", "true");
        sessions.end(&id);
        assert!(!sessions.is_active(&id));
        assert_eq!(sessions.scope(&id).read_raw("site.admin"), None);
    }

    #[test]
    fn test_expired_sessions_are_inactive_and_purged() {
        let sessions = SessionStore::new(0);
        let id = sessions.create();
        assert!(!sessions.is_active(&id));
        sessions.scope(&id).write_raw("site.admin", "true");
        assert_eq!(sessions.scope(&id).read_raw("site.admin"), None);
        assert_eq!(sessions.purge_expired(), 1);
        assert!(sessions.is_empty());
    }
}
