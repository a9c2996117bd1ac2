//! HTML templates and styling for the outreach site.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Navigation, menu overlay, login prompt, base template
//! - `scripts` - Live refresh and admin client scripts
//! - `admin_panel` - Floating per-page admin form
//! - `views` - Page bodies

mod admin_panel;
mod components;
mod scripts;
mod styles;
mod views;

pub use admin_panel::render_admin_panel;
pub use components::{base_html, nav_bar, AdminChrome, SITE_NAME};
pub use styles::STYLE;
pub use views::{
    render_contact, render_editable_page, render_home, render_not_found, render_satellites,
};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }
}
