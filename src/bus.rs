//! In-process change propagation.
//!
//! An `EventBus` is a cloneable handle to one listener list. Every `AppState`
//! (and every test) builds its own, so nothing leaks between instances.
//! Publishing is synchronous: all matching handlers have run, in subscription
//! order, by the time `publish` returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

// ============================================================================
// Events
// ============================================================================

/// A change notification. Carries only identifiers; subscribers re-read the
/// stores instead of trusting a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NamespaceChanged { namespace: String },
    ImageOverrideChanged { namespace: String },
    AuthChanged { session: String },
    InlineEditChanged { session: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NamespaceChanged,
    ImageOverrideChanged,
    AuthChanged,
    InlineEditChanged,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::NamespaceChanged { .. } => EventKind::NamespaceChanged,
            Event::ImageOverrideChanged { .. } => EventKind::ImageOverrideChanged,
            Event::AuthChanged { .. } => EventKind::AuthChanged,
            Event::InlineEditChanged { .. } => EventKind::InlineEditChanged,
        }
    }

    /// The namespace a content event refers to.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Event::NamespaceChanged { namespace } | Event::ImageOverrideChanged { namespace } => {
                Some(namespace)
            }
            _ => None,
        }
    }
}

impl EventKind {
    /// Wire name, also used for the frames sent to browsers.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::NamespaceChanged => "namespace_changed",
            EventKind::ImageOverrideChanged => "image_override_changed",
            EventKind::AuthChanged => "auth_changed",
            EventKind::InlineEditChanged => "inline_edit_changed",
        }
    }
}

// ============================================================================
// Bus
// ============================================================================

type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

struct Listener {
    id: u64,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    listeners: Mutex<Vec<Listener>>,
}

impl BusInner {
    fn listeners(&self) -> MutexGuard<'_, Vec<Listener>> {
        // A handler that panicked must not take the whole bus down with it.
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future event of `kind`.
    ///
    /// The listener stays registered until the returned `Subscription` is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners().push(Listener {
            id,
            kind,
            handler: Arc::new(handler),
        });
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
            detached: false,
        }
    }

    /// Deliver `event` to every listener of its kind. Returns how many ran.
    pub fn publish(&self, event: Event) -> usize {
        let kind = event.kind();
        // Snapshot first so handlers can subscribe, unsubscribe or publish.
        let handlers: Vec<Handler> = self
            .inner
            .listeners()
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| Arc::clone(&l.handler))
            .collect();

        tracing::trace!(event = kind.name(), listeners = handlers.len(), "publish");
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners().len()
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[must_use = "dropping a Subscription unsubscribes the handler"]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
    detached: bool,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }

    /// Keep the handler registered for as long as the bus lives.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(inner) = self.bus.upgrade() {
            inner.listeners().retain(|l| l.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn changed(ns: &str) -> Event {
        Event::NamespaceChanged {
            namespace: ns.to_string(),
        }
    }

    #[test]
    fn test_publish_reaches_matching_listeners_only() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        let _content = bus.subscribe(EventKind::NamespaceChanged, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        let h = Arc::clone(&hits);
        let _auth = bus.subscribe(EventKind::AuthChanged, move |_| {
            h.fetch_add(100, Ordering::SeqCst);
        });

        assert_eq!(bus.publish(changed("page.about.text")), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fan_out_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                bus.subscribe(EventKind::NamespaceChanged, move |_| {
                    order.lock().unwrap().push(i);
                })
            })
            .collect();

        bus.publish(changed("page.faq.text"));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let sub = bus.subscribe(EventKind::NamespaceChanged, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(changed("a"));
        sub.unsubscribe();
        bus.publish(changed("a"));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let _sub = bus.subscribe(EventKind::AuthChanged, |_| {});
            assert_eq!(bus.listener_count(), 1);
        }
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_detach_keeps_listener() {
        let bus = EventBus::new();
        bus.subscribe(EventKind::InlineEditChanged, |_| {}).detach();
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_handler_may_subscribe_during_publish() {
        let bus = EventBus::new();
        let inner_bus = bus.clone();
        let _sub = bus.subscribe(EventKind::NamespaceChanged, move |_| {
            inner_bus.subscribe(EventKind::AuthChanged, |_| {}).detach();
        });

        bus.publish(changed("x"));
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn test_buses_are_independent() {
        let a = EventBus::new();
        let b = EventBus::new();
        let _sub = a.subscribe(EventKind::NamespaceChanged, |_| {});
        assert_eq!(b.publish(changed("x")), 0);
    }

    #[test]
    fn test_event_namespace() {
        assert_eq!(changed("page.about.text").namespace(), Some("page.about.text"));
        let auth = Event::AuthChanged {
            session: "s".to_string(),
        };
        assert_eq!(auth.namespace(), None);
        assert_eq!(auth.kind().name(), "auth_changed");
    }
}
