//! Override namespaces.
//!
//! A namespace is one storage key holding a JSON object of `field id -> value`.
//! Values are plain text, or a `data:`/URL string for image slots. Every call
//! re-reads the store; nothing is cached here.

use crate::bus::{Event, EventBus};
use crate::store::KvStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub type Overrides = HashMap<String, String>;

/// Persistent key remembering the most recent accepted image upload.
pub const LAST_UPLOAD_KEY: &str = "uploads.last";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMemo {
    pub namespace: String,
    pub field: String,
    pub mime: String,
    pub bytes: usize,
    pub at: DateTime<Utc>,
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Image namespaces additionally announce `ImageOverrideChanged`.
pub fn is_image_namespace(namespace: &str) -> bool {
    namespace.split('.').any(|segment| segment == "images")
}

#[derive(Clone)]
pub struct OverrideStore {
    kv: Arc<dyn KvStore>,
    bus: EventBus,
}

impl OverrideStore {
    pub fn new(kv: Arc<dyn KvStore>, bus: EventBus) -> Self {
        Self { kv, bus }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The whole mapping. Missing or undecodable data reads as empty.
    pub fn load(&self, namespace: &str) -> Overrides {
        let Some(raw) = self.kv.read_raw(namespace) else {
            return Overrides::new();
        };
        match serde_json::from_str::<Overrides>(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(namespace, error = %e, "corrupt namespace treated as empty");
                Overrides::new()
            }
        }
    }

    pub fn get(&self, namespace: &str, field: &str, fallback: &str) -> String {
        self.load(namespace)
            .remove(field)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Store a normalized value. A value that normalizes to nothing removes the
    /// override instead. Returns the stored value, if any.
    pub fn set(&self, namespace: &str, field: &str, value: &str) -> Option<String> {
        let value = normalize_text(value);
        if value.is_empty() {
            self.delete(namespace, field);
            return None;
        }

        let mut map = self.load(namespace);
        map.insert(field.to_string(), value.clone());
        self.write(namespace, &map);
        tracing::info!(namespace, field, "override set");
        self.notify(namespace);
        Some(value)
    }

    pub fn delete(&self, namespace: &str, field: &str) {
        let mut map = self.load(namespace);
        if map.remove(field).is_some() {
            self.write(namespace, &map);
            tracing::info!(namespace, field, "override removed");
        }
        self.notify(namespace);
    }

    pub fn clear(&self, namespace: &str) {
        self.kv.remove_raw(namespace);
        tracing::info!(namespace, "namespace cleared");
        self.notify(namespace);
    }

    pub fn remember_upload(&self, memo: &UploadMemo) {
        match serde_json::to_string(memo) {
            Ok(json) => self.kv.write_raw(LAST_UPLOAD_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "cannot encode upload memo"),
        }
    }

    pub fn last_upload(&self) -> Option<UploadMemo> {
        self.kv
            .read_raw(LAST_UPLOAD_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    fn write(&self, namespace: &str, map: &Overrides) {
        match serde_json::to_string(map) {
            Ok(json) => self.kv.write_raw(namespace, &json),
            Err(e) => tracing::warn!(namespace, error = %e, "cannot encode namespace"),
        }
    }

    fn notify(&self, namespace: &str) {
        self.bus.publish(Event::NamespaceChanged {
            namespace: namespace.to_string(),
        });
        if is_image_namespace(namespace) {
            self.bus.publish(Event::ImageOverrideChanged {
                namespace: namespace.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventKind;
    use crate::store::{MemoryStore, PersistentStore};
    use std::sync::Mutex;

    fn store() -> OverrideStore {
        OverrideStore::new(Arc::new(MemoryStore::new()), EventBus::new())
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello   world  "), "hello world");
        assert_eq!(normalize_text("a\n\tb"), "a b");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_is_image_namespace() {
        assert!(is_image_namespace("page.about.images"));
        assert!(is_image_namespace("satellite.victoria.images"));
        assert!(!is_image_namespace("page.about.text"));
        assert!(!is_image_namespace("page.imagesque.text"));
    }

    #[test]
    fn test_get_falls_back_without_override() {
        let store = store();
        assert_eq!(store.get("page.about.text", "hero.title", "Default"), "Default");
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let store = store();
        store.set("page.about.text", "hero.title", "  New   title ");
        assert_eq!(store.get("page.about.text", "hero.title", "Default"), "New title");
        assert_eq!(store.get("page.about.text", "other", "Other"), "Other");
    }

    #[test]
    fn test_set_blank_deletes() {
        let store = store();
        store.set("page.faq.text", "intro", "Hello");
        assert_eq!(store.set("page.faq.text", "intro", " \n "), None);
        assert_eq!(store.get("page.faq.text", "intro", "Default"), "Default");
        assert!(store.load("page.faq.text").is_empty());
    }

    #[test]
    fn test_delete_reverts_to_fallback() {
        let store = store();
        store.set("page.about.text", "a", "x");
        store.set("page.about.text", "b", "y");
        store.delete("page.about.text", "a");
        assert_eq!(store.get("page.about.text", "a", "fa"), "fa");
        assert_eq!(store.get("page.about.text", "b", "fb"), "y");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = store();
        store.set("page.sponsor.text", "a", "x");
        store.clear("page.sponsor.text");
        assert_eq!(store.get("page.sponsor.text", "a", "fa"), "fa");
        store.clear("page.sponsor.text");
        assert_eq!(store.get("page.sponsor.text", "a", "fa"), "fa");
        assert!(store.load("page.sponsor.text").is_empty());
    }

    #[test]
    fn test_namespaces_are_independent() {
        let store = store();
        store.set("page.about.text", "title", "About");
        store.set("page.faq.text", "title", "FAQ");
        store.clear("page.faq.text");
        assert_eq!(store.get("page.about.text", "title", ""), "About");
    }

    #[test]
    fn test_corrupt_json_reads_empty_and_is_overwritten() {
        let kv = Arc::new(MemoryStore::new());
        kv.write_raw("page.about.text", "{not json");
        let store = OverrideStore::new(kv.clone(), EventBus::new());

        assert!(store.load("page.about.text").is_empty());
        assert_eq!(store.get("page.about.text", "title", "fb"), "fb");

        store.set("page.about.text", "title", "Fixed");
        assert_eq!(store.get("page.about.text", "title", "fb"), "Fixed");
    }

    #[test]
    fn test_non_object_json_reads_empty() {
        let kv = Arc::new(MemoryStore::new());
        kv.write_raw("page.about.text", "[1,2,3]");
        let store = OverrideStore::new(kv, EventBus::new());
        assert!(store.load("page.about.text").is_empty());
    }

    #[test]
    fn test_disabled_storage_never_fails() {
        let store = OverrideStore::new(Arc::new(PersistentStore::disabled()), EventBus::new());
        assert_eq!(store.set("page.about.text", "title", "x").as_deref(), Some("x"));
        assert_eq!(store.get("page.about.text", "title", "fb"), "fb");
        store.delete("page.about.text", "title");
        store.clear("page.about.text");
    }

    #[test]
    fn test_write_is_visible_to_subscribers() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (reader, sink) = (store.clone(), Arc::clone(&seen));
        let _sub = store.bus().subscribe(EventKind::NamespaceChanged, move |event| {
            let ns = event.namespace().unwrap_or_default();
            sink.lock().unwrap().push(reader.get(ns, "title", "fb"));
        });

        store.set("page.about.text", "title", "Fresh");
        store.delete("page.about.text", "title");

        assert_eq!(*seen.lock().unwrap(), vec!["Fresh".to_string(), "fb".to_string()]);
    }

    #[test]
    fn test_image_namespace_publishes_image_event() {
        let store = store();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);
        let _sub = store.bus().subscribe(EventKind::ImageOverrideChanged, move |event| {
            sink.lock().unwrap().push(event.namespace().unwrap_or_default().to_string());
        });

        store.set("page.about.text", "title", "x");
        store.set("page.about.images", "slot-1", "data:image/png;base64,AAAA");

        assert_eq!(*hits.lock().unwrap(), vec!["page.about.images".to_string()]);
    }

    #[test]
    fn test_delete_missing_field_still_notifies() {
        let store = store();
        let hits = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&hits);
        let _sub = store.bus().subscribe(EventKind::NamespaceChanged, move |_| {
            *sink.lock().unwrap() += 1;
        });
        store.delete("page.faq.text", "missing");
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn test_upload_memo_round_trip() {
        let store = store();
        assert!(store.last_upload().is_none());
        let memo = UploadMemo {
            namespace: "page.about.images".to_string(),
            field: "slot-0".to_string(),
            mime: "image/png".to_string(),
            bytes: 42,
            at: Utc::now(),
        };
        store.remember_upload(&memo);
        assert_eq!(store.last_upload(), Some(memo));
    }
}
