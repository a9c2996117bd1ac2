//! Editable field bindings.
//!
//! An `EditableField` ties one declared field to its namespace: it resolves
//! the current value, renders it (editable in place for an admin with inline
//! edit on) and commits edits back through the `OverrideStore`.
//! `MountedField` is the long-lived variant that keeps a read-through copy
//! refreshed by change events.

use crate::auth::SessionState;
use crate::bus::{EventKind, Subscription};
use crate::overrides::{normalize_text, OverrideStore};
use crate::pages::{Element, FieldDescriptor};
use crate::templates::html_escape;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Where an edit comes from. Inline edits need inline edit mode on top of
/// admin; the admin panel only needs admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    Inline,
    Panel,
}

impl EditSource {
    pub fn permits(&self, session: &SessionState) -> bool {
        match self {
            EditSource::Inline => session.can_edit(),
            EditSource::Panel => session.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Stored(String),
    /// The edit was empty; the field is back on its default.
    Reset,
    Rejected,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EditableField {
    pub namespace: &'static str,
    #[serde(flatten)]
    pub field: &'static FieldDescriptor,
}

impl EditableField {
    pub fn new(namespace: &'static str, field: &'static FieldDescriptor) -> Self {
        Self { namespace, field }
    }

    pub fn resolve(&self, store: &OverrideStore) -> String {
        store.get(self.namespace, self.field.id, self.field.default_value)
    }

    pub fn render(&self, store: &OverrideStore, session: &SessionState) -> String {
        let value = html_escape(&self.resolve(store));
        let editable = EditSource::Inline.permits(session);
        let binding = format!(
            r#"data-ns="{}" data-field="{}" data-default="{}""#,
            self.namespace,
            self.field.id,
            html_escape(self.field.default_value)
        );
        let inline = if editable && !self.field.element.is_asset() {
            r#" contenteditable="true""#
        } else {
            ""
        };

        match self.field.element {
            Element::Heading => format!(r#"<h1 class="field" {binding}{inline}>{value}</h1>"#),
            Element::Subheading => format!(r#"<h2 class="field" {binding}{inline}>{value}</h2>"#),
            Element::Lead => format!(r#"<p class="field lead" {binding}{inline}>{value}</p>"#),
            Element::Paragraph => format!(r#"<p class="field" {binding}{inline}>{value}</p>"#),
            Element::Question => format!(r#"<h3 class="field faq-q" {binding}{inline}>{value}</h3>"#),
            Element::Answer => format!(r#"<p class="field faq-a" {binding}{inline}>{value}</p>"#),
            Element::Button { href } => format!(
                r#"<a class="field button" href="{href}" {binding}{inline}>{value}</a>"#
            ),
            Element::Image => {
                let picker = if editable {
                    format!(
                        r#"<label class="image-picker">Replace<input type="file" accept="image/*" data-upload-ns="{}" data-upload-field="{}"></label>"#,
                        self.namespace, self.field.id
                    )
                } else {
                    String::new()
                };
                format!(
                    r#"<figure class="image-slot"><img class="field" src="{value}" alt="{alt}" data-attr="src" {binding}>{picker}</figure>"#,
                    alt = html_escape(self.field.label),
                )
            }
            Element::DownloadLink { label } => format!(
                r#"<a class="field button download" href="{value}" data-attr="href" {binding} download>{}</a>"#,
                html_escape(label)
            ),
        }
    }

    /// Commit edited text. Empty text puts the field back on its default.
    pub fn commit(
        &self,
        store: &OverrideStore,
        session: &SessionState,
        source: EditSource,
        text: &str,
    ) -> CommitOutcome {
        if !source.permits(session) {
            return CommitOutcome::Rejected;
        }
        let text = normalize_text(text);
        if self.field.element.is_asset() && !text.is_empty() && !is_allowed_asset(&text) {
            tracing::warn!(namespace = self.namespace, field = self.field.id, "asset value rejected");
            return CommitOutcome::Rejected;
        }
        match store.set(self.namespace, self.field.id, &text) {
            Some(stored) => CommitOutcome::Stored(stored),
            None => CommitOutcome::Reset,
        }
    }

    /// Commit an uploaded image as a self-contained data URI.
    pub fn commit_image(
        &self,
        store: &OverrideStore,
        session: &SessionState,
        source: EditSource,
        mime: &str,
        bytes: &[u8],
    ) -> CommitOutcome {
        if !source.permits(session) || self.field.element != Element::Image {
            return CommitOutcome::Rejected;
        }
        if bytes.is_empty() || !mime.starts_with("image/") {
            return CommitOutcome::Rejected;
        }
        let uri = data_uri(mime, bytes);
        match store.set(self.namespace, self.field.id, &uri) {
            Some(stored) => CommitOutcome::Stored(stored),
            None => CommitOutcome::Reset,
        }
    }
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Mime type for an upload: the declared content type when it is specific,
/// otherwise a guess from the file name.
pub fn upload_mime(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    content_type
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
        .map(str::to_string)
        .or_else(|| {
            file_name
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|m| m.essence_str().to_string())
        })
}

/// Asset slots accept site paths, http(s) URLs and data URIs only.
pub fn is_allowed_asset(value: &str) -> bool {
    (value.starts_with('/') && !value.starts_with("//"))
        || value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with("data:")
}

// ============================================================================
// Mounted Field
// ============================================================================

/// A field kept current by change events for as long as it is mounted.
///
/// This is the in-process read-through cache for a binding: library callers
/// hold one to see commits made through any handle on the same bus. Browsers
/// get the same effect from the `/ws` bridge instead.
pub struct MountedField {
    binding: EditableField,
    value: Arc<RwLock<String>>,
    _subscription: Subscription,
}

impl MountedField {
    pub fn mount(binding: EditableField, store: &OverrideStore) -> Self {
        let value = Arc::new(RwLock::new(binding.resolve(store)));

        let cache = Arc::clone(&value);
        let reader = store.clone();
        let subscription = store.bus().subscribe(EventKind::NamespaceChanged, move |event| {
            if event.namespace() != Some(binding.namespace) {
                return;
            }
            let fresh = binding.resolve(&reader);
            if let Ok(mut slot) = cache.write() {
                *slot = fresh;
            }
        });

        Self {
            binding,
            value,
            _subscription: subscription,
        }
    }

    pub fn binding(&self) -> &EditableField {
        &self.binding
    }

    pub fn value(&self) -> String {
        self.value
            .read()
            .map(|v| v.clone())
            .unwrap_or_else(|_| self.binding.field.default_value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::pages::find_field;
    use crate::store::MemoryStore;

    const ADMIN_INLINE: SessionState = SessionState {
        is_admin: true,
        inline_edit: true,
    };
    const ADMIN_ONLY: SessionState = SessionState {
        is_admin: true,
        inline_edit: false,
    };
    const VISITOR_INLINE: SessionState = SessionState {
        is_admin: false,
        inline_edit: true,
    };

    fn store() -> OverrideStore {
        OverrideStore::new(Arc::new(MemoryStore::new()), EventBus::new())
    }

    fn field(namespace: &str, id: &str) -> EditableField {
        find_field(namespace, id).unwrap()
    }

    #[test]
    fn test_resolve_default_then_override() {
        let store = store();
        let title = field("page.about.text", "hero.title");
        assert_eq!(title.resolve(&store), "About the Program");
        store.set("page.about.text", "hero.title", "Who We Are");
        assert_eq!(title.resolve(&store), "Who We Are");
    }

    #[test]
    fn test_commit_normalizes() {
        let store = store();
        let title = field("page.about.text", "hero.title");
        let outcome = title.commit(&store, &ADMIN_INLINE, EditSource::Inline, "  hello   world  ");
        assert_eq!(outcome, CommitOutcome::Stored("hello world".to_string()));
        assert_eq!(store.get("page.about.text", "hero.title", ""), "hello world");
    }

    #[test]
    fn test_empty_commit_resets_default() {
        let store = store();
        let title = field("page.faq.text", "intro");
        title.commit(&store, &ADMIN_INLINE, EditSource::Inline, "Custom");
        let outcome = title.commit(&store, &ADMIN_INLINE, EditSource::Inline, "   \n ");
        assert_eq!(outcome, CommitOutcome::Reset);
        assert_eq!(title.resolve(&store), title.field.default_value);
    }

    #[test]
    fn test_commit_gating() {
        let store = store();
        let title = field("page.about.text", "hero.title");

        assert_eq!(
            title.commit(&store, &VISITOR_INLINE, EditSource::Inline, "x"),
            CommitOutcome::Rejected
        );
        assert_eq!(
            title.commit(&store, &ADMIN_ONLY, EditSource::Inline, "x"),
            CommitOutcome::Rejected
        );
        assert_eq!(
            title.commit(&store, &VISITOR_INLINE, EditSource::Panel, "x"),
            CommitOutcome::Rejected
        );
        assert_eq!(title.resolve(&store), "About the Program");

        assert_eq!(
            title.commit(&store, &ADMIN_ONLY, EditSource::Panel, "x"),
            CommitOutcome::Stored("x".to_string())
        );
    }

    #[test]
    fn test_render_editability() {
        let store = store();
        let title = field("page.about.text", "hero.title");

        let visitor = title.render(&store, &VISITOR_INLINE);
        assert!(!visitor.contains("contenteditable"));
        assert!(visitor.starts_with("<h1"));

        let admin = title.render(&store, &ADMIN_ONLY);
        assert!(!admin.contains("contenteditable"));
        assert!(admin.contains("About the Program"));

        let editing = title.render(&store, &ADMIN_INLINE);
        assert!(editing.contains(r#"contenteditable="true""#));
        assert!(editing.contains(r#"data-ns="page.about.text""#));
        assert!(editing.contains(r#"data-field="hero.title""#));
    }

    #[test]
    fn test_render_escapes_override() {
        let store = store();
        store.set("page.faq.text", "title", "<script>alert(1)</script>");
        let html = field("page.faq.text", "title").render(&store, &SessionState::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_image_picker_only_when_editing() {
        let store = store();
        let slot = field("page.about.images", "slot-0");
        assert!(!slot.render(&store, &ADMIN_ONLY).contains("type=\"file\""));
        let editing = slot.render(&store, &ADMIN_INLINE);
        assert!(editing.contains("type=\"file\""));
        assert!(!editing.contains("contenteditable"));
    }

    #[test]
    fn test_image_slot_scenario() {
        let store = store();
        let slot = field("page.about.images", "slot-1");
        assert_eq!(slot.resolve(&store), "/assets/about/gallery-2.jpg");

        let outcome = slot.commit_image(&store, &ADMIN_INLINE, EditSource::Inline, "image/png", b"\x89PNG");
        let uri = data_uri("image/png", b"\x89PNG");
        assert_eq!(outcome, CommitOutcome::Stored(uri.clone()));
        assert_eq!(slot.resolve(&store), uri);

        store.delete("page.about.images", "slot-1");
        assert_eq!(slot.resolve(&store), "/assets/about/gallery-2.jpg");
    }

    #[test]
    fn test_commit_image_rejects_non_images() {
        let store = store();
        let slot = field("page.about.images", "slot-0");
        assert_eq!(
            slot.commit_image(&store, &ADMIN_INLINE, EditSource::Inline, "text/html", b"<p>"),
            CommitOutcome::Rejected
        );
        assert_eq!(
            slot.commit_image(&store, &ADMIN_INLINE, EditSource::Inline, "image/png", b""),
            CommitOutcome::Rejected
        );
        let title = field("page.about.text", "hero.title");
        assert_eq!(
            title.commit_image(&store, &ADMIN_INLINE, EditSource::Inline, "image/png", b"x"),
            CommitOutcome::Rejected
        );
        assert!(store.load("page.about.images").is_empty());
    }

    #[test]
    fn test_asset_commit_rejects_script_urls() {
        let store = store();
        let brochure = field("page.sponsor.brochure", "url");
        assert_eq!(
            brochure.commit(&store, &ADMIN_ONLY, EditSource::Panel, "javascript:alert(1)"),
            CommitOutcome::Rejected
        );
        assert_eq!(
            brochure.commit(&store, &ADMIN_ONLY, EditSource::Panel, "https://example.org/b.pdf"),
            CommitOutcome::Stored("https://example.org/b.pdf".to_string())
        );
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_upload_mime() {
        assert_eq!(upload_mime(Some("a.png"), None).as_deref(), Some("image/png"));
        assert_eq!(
            upload_mime(Some("a.png"), Some("application/octet-stream")).as_deref(),
            Some("image/png")
        );
        assert_eq!(upload_mime(None, Some("image/jpeg")).as_deref(), Some("image/jpeg"));
        assert_eq!(upload_mime(None, None), None);
    }

    #[test]
    fn test_mounted_fields_fan_out() {
        let store = store();
        let a = MountedField::mount(field("page.about.text", "hero.title"), &store);
        let b = MountedField::mount(field("page.about.text", "hero.title"), &store);
        assert_eq!(a.value(), "About the Program");

        store.set("page.about.text", "hero.title", "Meet the Team");
        assert_eq!(a.value(), "Meet the Team");
        assert_eq!(b.value(), "Meet the Team");

        a.binding()
            .commit(&store, &ADMIN_INLINE, EditSource::Inline, "");
        assert_eq!(b.value(), "About the Program");
    }

    #[test]
    fn test_mounted_field_ignores_other_namespaces() {
        let store = store();
        let title = MountedField::mount(field("page.faq.text", "title"), &store);
        // Same field id, different namespace
        store.set("page.sponsor.text", "title", "Partners");
        assert_eq!(title.value(), "Frequently Asked Questions");
    }

    #[test]
    fn test_unmount_unsubscribes() {
        let store = store();
        let mounted = MountedField::mount(field("page.faq.text", "title"), &store);
        assert_eq!(store.bus().listener_count(), 1);
        drop(mounted);
        assert_eq!(store.bus().listener_count(), 0);
    }
}
