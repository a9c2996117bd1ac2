//! Page bodies.
//!
//! Editable pages are assembled from their field groups; the remaining pages
//! are fixed copy.

use crate::auth::SessionState;
use crate::binding::EditableField;
use crate::overrides::OverrideStore;
use crate::pages::{Element, PageId};

use super::admin_panel::render_admin_panel;
use super::components::{base_html, AdminChrome, SITE_NAME};
use super::html_escape;

// ============================================================================
// Editable Pages
// ============================================================================

pub fn render_editable_page(page: PageId, store: &OverrideStore, session: &SessionState) -> String {
    let mut content = String::new();

    for group in page.groups() {
        let is_gallery = group.fields.iter().all(|f| f.element == Element::Image);
        if is_gallery {
            content.push_str("<div class=\"gallery\">");
        }
        for field in group.fields {
            content.push_str(&EditableField::new(group.namespace, field).render(store, session));
            content.push('\n');
        }
        if is_gallery {
            content.push_str("</div>\n");
        }
    }

    if matches!(page, PageId::Queensland | PageId::Victoria) {
        content.push_str(r#"<p><a href="/satellites">&larr; All chapters</a></p>"#);
    }

    base_html(
        page.title(),
        &content,
        Some(AdminChrome {
            page,
            session,
            panel: render_admin_panel(page, store, session),
        }),
    )
}

// ============================================================================
// Fixed Pages
// ============================================================================

pub fn render_home() -> String {
    let content = format!(
        r#"<h1>{site}</h1>
        <p class="lead">University volunteers running free science and engineering workshops for high school students.</p>
        <a class="button" href="/getting-started">Get Started</a>
        <a class="button" href="/about">Learn More</a>
        <ul class="card-list">
            <li><h3>Workshops</h3><p>Hands-on sessions built around real projects.</p></li>
            <li><h3>Mentoring</h3><p>Students meet people a few years ahead of them.</p></li>
            <li><h3>Chapters</h3><p>Local teams in <a href="/satellites">several states</a>.</p></li>
        </ul>"#,
        site = SITE_NAME
    );
    base_html("Home", &content, None)
}

pub fn render_satellites() -> String {
    let chapters = [PageId::Queensland, PageId::Victoria]
        .iter()
        .map(|p| {
            format!(
                r#"<li><h3><a href="{}">{}</a></h3></li>"#,
                p.path(),
                html_escape(p.title())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let content = format!(
        r#"<h1>Satellite Chapters</h1>
        <p class="lead">Our chapters are run by local student teams.</p>
        <ul class="card-list">{chapters}</ul>"#
    );
    base_html("Satellites", &content, None)
}

pub fn render_contact(message: Option<&str>) -> String {
    let notice = message
        .map(|m| format!(r#"<div class="message success">{}</div>"#, html_escape(m)))
        .unwrap_or_default();
    let content = format!(
        r#"<h1>Contact</h1>
        {notice}
        <form class="contact-form" method="POST" action="/contact">
            <input type="text" name="name" placeholder="Your name" required>
            <input type="email" name="email" placeholder="Email address" required>
            <textarea name="message" rows="6" placeholder="How can we help?" required></textarea>
            <button type="submit" class="button">Send</button>
        </form>"#
    );
    base_html("Contact", &content, None)
}

pub fn render_not_found() -> String {
    base_html(
        "Not Found",
        r#"<h1>Page not found</h1><p><a href="/">Back to the home page</a></p>"#,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn store() -> OverrideStore {
        OverrideStore::new(Arc::new(MemoryStore::new()), EventBus::new())
    }

    #[test]
    fn test_editable_page_uses_overrides() {
        let store = store();
        store.set("satellite.victoria.text", "title", "Melbourne Chapter");
        let html = render_editable_page(PageId::Victoria, &store, &SessionState::default());
        assert!(html.contains("Melbourne Chapter"));
        assert!(html.contains("/assets/satellites/victoria-1.jpg"));
        assert!(html.contains("All chapters"));
        assert!(!html.contains(r#"id="admin-panel""#));
    }

    #[test]
    fn test_images_rendered_in_gallery() {
        let html = render_editable_page(PageId::About, &store(), &SessionState::default());
        assert_eq!(html.matches("class=\"gallery\"").count(), 1);
        assert_eq!(html.matches("class=\"image-slot\"").count(), 3);
    }

    #[test]
    fn test_admin_sees_panel() {
        let session = SessionState {
            is_admin: true,
            inline_edit: true,
        };
        let html = render_editable_page(PageId::Faq, &store(), &session);
        assert!(html.contains(r#"id="admin-panel""#));
        assert!(html.contains(r#"contenteditable="true""#));
    }

    #[test]
    fn test_getting_started_page_editable() {
        let store = store();
        store.set("page.enter.text", "step1.heading", "1. Say hello");
        let session = SessionState {
            is_admin: true,
            inline_edit: true,
        };
        let html = render_editable_page(PageId::GettingStarted, &store, &session);
        assert!(html.contains("1. Say hello"));
        assert!(html.contains("/assets/getting-started/hero.jpg"));
        assert!(html.contains(r#"data-upload-ns="page.enter.images" data-upload-field="who""#));
    }

    #[test]
    fn test_contact_notice_escaped() {
        let html = render_contact(Some("<thanks>"));
        assert!(html.contains("&lt;thanks&gt;"));
    }

    #[test]
    fn test_satellites_lists_chapters() {
        let html = render_satellites();
        assert!(html.contains("/satellites/queensland"));
        assert!(html.contains("/satellites/victoria"));
    }
}
