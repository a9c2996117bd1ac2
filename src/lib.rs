//! Outreach site library - re-exports for testing and external use.
//!
//! The site serves a handful of public pages whose copy and imagery can be
//! overridden by an admin, either inline on the page or from a floating panel.
//! Overrides live in a key-value store and every change is announced on an
//! event bus so mounted fields and connected browsers refresh.

use std::sync::Arc;

use tokio::sync::broadcast;

pub mod auth;
pub mod binding;
pub mod bus;
pub mod config;
pub mod error;
pub mod handlers;
pub mod live;
pub mod overrides;
pub mod pages;
pub mod store;
pub mod templates;

use auth::AuthGate;
use bus::EventBus;
use config::Config;
use live::LiveFrame;
use overrides::OverrideStore;
use store::{KvStore, PersistentStore, SessionStore};

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub bus: EventBus,
    pub overrides: OverrideStore,
    pub auth: AuthGate,
    pub live_tx: broadcast::Sender<LiveFrame>,
}

impl AppState {
    /// Open the persistent store at `config.db_path`. If sled cannot open it
    /// the site still runs, but overrides are not saved.
    pub fn new(config: Config) -> Self {
        let store = PersistentStore::open(&config.db_path);
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, kv: Arc<dyn KvStore>) -> Self {
        let bus = EventBus::new();
        let live_tx = live::bridge(&bus, live::LIVE_CHANNEL_CAPACITY);
        let overrides = OverrideStore::new(kv, bus.clone());
        let auth = AuthGate::new(config.admin_password.clone(), bus.clone());
        let sessions = SessionStore::new(config.session_ttl_hours);

        Self {
            config,
            sessions,
            bus,
            overrides,
            auth,
            live_tx,
        }
    }
}

// Re-export commonly used types
pub use auth::{session_state, verify_password, SessionState, SESSION_COOKIE};
pub use binding::{CommitOutcome, EditSource, EditableField, MountedField};
pub use bus::{Event, EventKind, Subscription};
pub use error::SiteError;
pub use overrides::{normalize_text, Overrides, UploadMemo};
pub use pages::{find_field, list_fields, reset_all_for_page, FieldDescriptor, PageId};
pub use store::MemoryStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_override_change_reaches_live_channel() {
        let state = AppState::with_store(Config::default(), Arc::new(MemoryStore::new()));
        let mut rx = state.live_tx.subscribe();

        state.overrides.set("page.about.text", "hero.title", "Welcome");

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame.kind, "namespace_changed");
        assert_eq!(frame.namespace, "page.about.text");
    }

    #[test]
    fn test_auth_uses_configured_password() {
        let config = Config {
            admin_password: "launch-day".to_string(),
            ..Config::default()
        };
        let state = AppState::with_store(config, Arc::new(MemoryStore::new()));
        let id = state.sessions.create();
        let scope = state.sessions.scope(&id);
        assert!(!state.auth.login(&scope, "btf-2024"));
        assert!(state.auth.login(&scope, "launch-day"));
    }
}
