//! Shared HTML components for the outreach site.
//!
//! Contains the navigation bar, the menu overlay, the admin login prompt and
//! the base HTML template.

use crate::auth::SessionState;
use crate::pages::PageId;

use super::html_escape;
use super::scripts::{admin_script, site_script};
use super::styles::STYLE;

pub const SITE_NAME: &str = "Student Outreach Program";

const NAV_LINKS: &[(&str, &str)] = &[
    ("/about", "About"),
    ("/getting-started", "Getting Started"),
    ("/satellites", "Satellites"),
    ("/sponsors", "Sponsors"),
    ("/faq", "FAQ"),
    ("/contact", "Contact"),
];

// ============================================================================
// Navigation
// ============================================================================

fn nav_links() -> String {
    NAV_LINKS
        .iter()
        .map(|(href, label)| format!(r#"<a href="{}">{}</a>"#, href, label))
        .collect::<Vec<_>>()
        .join("\n            ")
}

pub fn nav_bar() -> String {
    format!(
        r#"<nav class="nav-bar">
            <a href="/" class="brand">{site}</a>
            <span class="spacer"></span>
            <div class="links">
            {links}
            </div>
            <button class="menu-toggle" data-menu-toggle aria-label="Open menu">Menu</button>
        </nav>"#,
        site = SITE_NAME,
        links = nav_links(),
    )
}

pub fn menu_overlay() -> String {
    format!(
        r#"<div class="menu-overlay" id="menu-overlay">
            <button class="menu-toggle close" data-menu-toggle aria-label="Close menu">Close</button>
            <a href="/">Home</a>
            {links}
        </div>"#,
        links = nav_links(),
    )
}

/// Decorative animated background.
fn decor_layer() -> &'static str {
    r#"<div class="decor" aria-hidden="true"><span></span><span></span><span></span></div>"#
}

// ============================================================================
// Login Prompt
// ============================================================================

pub fn login_modal() -> &'static str {
    r#"<div class="login-modal" id="login-modal">
        <form>
            <h2>Admin Login</h2>
            <input type="password" name="password" placeholder="Password" autocomplete="current-password" required>
            <div>
                <button type="submit" class="button">Login</button>
                <button type="button" data-cancel>Cancel</button>
            </div>
        </form>
    </div>"#
}

// ============================================================================
// Base HTML Template
// ============================================================================

/// Context for the admin surface of an editable page.
pub struct AdminChrome<'a> {
    pub page: PageId,
    pub session: &'a SessionState,
    /// Rendered admin panel; empty for visitors.
    pub panel: String,
}

pub fn base_html(title: &str, content: &str, admin: Option<AdminChrome<'_>>) -> String {
    let admin_html = match admin {
        Some(chrome) => {
            let prompt = if chrome.session.is_admin { "" } else { login_modal() };
            format!(
                r#"<button class="admin-toggle" data-admin-toggle aria-hidden="true" tabindex="-1"></button>
    {prompt}
    {panel}
    {script}"#,
                panel = chrome.panel,
                script = admin_script(chrome.page, chrome.session),
            )
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site}</title>
    <style>{STYLE}</style>
</head>
<body>
    {decor}
    {nav}
    {menu}
    <div class="container">
        {content}
    </div>
    {site_script}
    {admin_html}
</body>
</html>"#,
        title = html_escape(title),
        site = SITE_NAME,
        decor = decor_layer(),
        nav = nav_bar(),
        menu = menu_overlay(),
        site_script = site_script(),
    )
}
