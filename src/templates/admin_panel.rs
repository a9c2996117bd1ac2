//! Floating admin panel listing every overridable field of a page.

use crate::auth::SessionState;
use crate::overrides::OverrideStore;
use crate::pages::{list_fields, Element, PageId};

use super::html_escape;

pub fn render_admin_panel(page: PageId, store: &OverrideStore, session: &SessionState) -> String {
    if !session.is_admin {
        return String::new();
    }

    let mut html = format!(
        r#"<aside class="admin-panel" id="admin-panel">
        <h2>Edit {title}</h2>
        <div class="admin-actions">
            <button data-inline-toggle>Inline edit: {inline}</button>
            <button class="danger" data-reset-all>Reset all</button>
            <button data-logout>Logout</button>
        </div>"#,
        title = html_escape(page.title()),
        inline = if session.inline_edit { "on" } else { "off" },
    );

    for binding in list_fields(page) {
        let field = binding.field;
        let value = html_escape(&binding.resolve(store));
        let input = match field.element {
            Element::Paragraph | Element::Answer | Element::Lead => {
                format!(r#"<textarea data-input rows="3">{}</textarea>"#, value)
            }
            Element::Image => format!(
                r#"<input type="text" data-input value="{value}">
            <input type="file" accept="image/*" data-upload-ns="{ns}" data-upload-field="{id}">"#,
                ns = binding.namespace,
                id = field.id,
            ),
            _ => format!(r#"<input type="text" data-input value="{}">"#, value),
        };

        html.push_str(&format!(
            r#"
        <div class="admin-field" data-panel-ns="{ns}" data-panel-field="{id}" data-panel-default="{default}">
            <label>{label}</label>
            {input}
            <div class="row">
                <button data-save>Save</button>
                <button data-reset>Reset</button>
            </div>
        </div>"#,
            ns = binding.namespace,
            id = field.id,
            default = html_escape(field.default_value),
            label = html_escape(field.label),
        ));
    }

    html.push_str("\n    </aside>");
    html
}
