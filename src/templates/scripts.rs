//! Client-side scripts.
//!
//! Every page gets the menu overlay and the live-refresh socket. Editable pages
//! additionally get the admin shortcut, the login prompt and the handlers that
//! post inline edits and uploads back to the override API.

use crate::auth::SessionState;
use crate::pages::PageId;

/// Script shared by every page.
///
/// Bound elements carry `data-ns`/`data-field`/`data-default`. When the server
/// announces a namespace change the script re-fetches that namespace and
/// rewrites every bound element, except the one being edited.
pub fn site_script() -> &'static str {
    r##"<script>
(function() {
    'use strict';

    // ---- Menu overlay ----
    const overlay = document.getElementById('menu-overlay');
    document.querySelectorAll('[data-menu-toggle]').forEach(btn => {
        btn.addEventListener('click', () => overlay && overlay.classList.toggle('open'));
    });

    // ---- Live refresh ----
    async function refreshNamespace(ns) {
        const bound = document.querySelectorAll('[data-ns="' + CSS.escape(ns) + '"]');
        const rows = document.querySelectorAll('[data-panel-ns="' + CSS.escape(ns) + '"]');
        if (bound.length === 0 && rows.length === 0) return;
        let values = {};
        try {
            const res = await fetch('/api/overrides/' + encodeURIComponent(ns));
            if (res.ok) values = await res.json();
        } catch (e) {
            return;
        }
        bound.forEach(el => {
            if (el === document.activeElement) return;
            const value = values[el.dataset.field] ?? el.dataset.default;
            if (el.dataset.attr) {
                el.setAttribute(el.dataset.attr, value);
            } else if (el.textContent !== value) {
                el.textContent = value;
            }
        });
        // Admin panel rows: only the input changes.
        document.querySelectorAll('[data-panel-ns="' + CSS.escape(ns) + '"]').forEach(row => {
            const input = row.querySelector('[data-input]');
            if (!input || input === document.activeElement) return;
            input.value = values[row.dataset.panelField] ?? row.dataset.panelDefault;
        });
    }
    window.refreshNamespace = refreshNamespace;

    let reconnectDelay = 1000;
    function connect() {
        const protocol = window.location.protocol === 'https:' ? 'wss:' : 'ws:';
        const ws = new WebSocket(protocol + '//' + window.location.host + '/ws');
        ws.onopen = () => { reconnectDelay = 1000; };
        ws.onmessage = (event) => {
            try {
                const msg = JSON.parse(event.data);
                if (msg.type === 'namespace_changed') refreshNamespace(msg.namespace);
            } catch (e) {
                console.error('Bad event frame', e);
            }
        };
        ws.onclose = () => {
            setTimeout(connect, reconnectDelay);
            reconnectDelay = Math.min(reconnectDelay * 2, 30000);
        };
    }
    connect();
})();
</script>"##
}

/// Admin script for an editable page.
pub fn admin_script(page: PageId, session: &SessionState) -> String {
    format!(
        r##"<script>
(function() {{
    'use strict';

    const PAGE = "{slug}";
    const HOTKEY = "{hotkey}";
    const IS_ADMIN = {is_admin};

    const modal = document.getElementById('login-modal');
    const panel = document.getElementById('admin-panel');
    const passwordInput = modal ? modal.querySelector('input[name=password]') : null;

    function openLogin() {{
        if (!modal) return;
        modal.classList.add('open');
        if (passwordInput) passwordInput.focus();
    }}
    function closeLogin() {{
        if (!modal) return;
        modal.classList.remove('open');
        if (passwordInput) passwordInput.value = '';
    }}
    function toggleAdmin() {{
        if (!IS_ADMIN) {{ openLogin(); return; }}
        if (panel) panel.classList.toggle('open');
    }}

    // ---- Shortcut: Ctrl/Cmd + Shift + letter ----
    document.addEventListener('keydown', (e) => {{
        if (e.key === 'Escape') {{ closeLogin(); return; }}
        if ((e.ctrlKey || e.metaKey) && e.shiftKey && e.key.toUpperCase() === HOTKEY) {{
            e.preventDefault();
            toggleAdmin();
        }}
    }});
    document.querySelectorAll('[data-admin-toggle]').forEach(btn => btn.addEventListener('click', toggleAdmin));

    async function postJson(url, body, method) {{
        const res = await fetch(url, {{
            method: method || 'POST',
            headers: {{ 'Content-Type': 'application/json' }},
            body: body === undefined ? undefined : JSON.stringify(body)
        }});
        let data = {{}};
        try {{ data = await res.json(); }} catch (e) {{}}
        return {{ ok: res.ok, data: data }};
    }}

    // ---- Login ----
    if (modal) {{
        modal.querySelector('form').addEventListener('submit', async (e) => {{
            e.preventDefault();
            const res = await postJson('/api/admin/login', {{ password: passwordInput.value }});
            if (res.ok) {{
                closeLogin();
                window.location.reload();
            }} else {{
                alert(res.data.message || 'Incorrect password');
            }}
        }});
        modal.querySelector('[data-cancel]').addEventListener('click', closeLogin);
    }}

    if (!IS_ADMIN) return;

    function fieldUrl(ns, field) {{
        return '/api/overrides/' + encodeURIComponent(ns) + '/' + encodeURIComponent(field);
    }}

    // ---- Inline editing: commit on focus loss ----
    document.querySelectorAll('[contenteditable="true"][data-ns]').forEach(el => {{
        el.addEventListener('blur', async () => {{
            const res = await postJson(fieldUrl(el.dataset.ns, el.dataset.field), {{ value: el.innerText, inline: true }});
            if (!res.ok) {{
                alert(res.data.message || 'Could not save');
            }}
            refreshNamespace(el.dataset.ns);
        }});
        el.addEventListener('keydown', (e) => {{
            if (e.key === 'Enter' && !e.shiftKey) {{ e.preventDefault(); el.blur(); }}
        }});
    }});

    // ---- Image uploads ----
    async function upload(input, inline) {{
        const file = input.files && input.files[0];
        if (!file) return;
        const form = new FormData();
        form.append('file', file);
        const url = '/api/images/' + encodeURIComponent(input.dataset.uploadNs) + '/' +
            encodeURIComponent(input.dataset.uploadField) + (inline ? '?inline=true' : '');
        const res = await fetch(url, {{ method: 'POST', body: form }});
        if (!res.ok) {{
            let msg = 'Upload failed';
            try {{ msg = (await res.json()).message || msg; }} catch (e) {{}}
            alert(msg);
        }}
        input.value = '';
        refreshNamespace(input.dataset.uploadNs);
    }}
    document.querySelectorAll('input[type=file][data-upload-ns]').forEach(input => {{
        input.addEventListener('change', () => upload(input, !input.closest('#admin-panel')));
    }});

    if (!panel) return;

    // ---- Admin panel ----
    panel.querySelectorAll('[data-save]').forEach(btn => {{
        btn.addEventListener('click', async () => {{
            const row = btn.closest('.admin-field');
            const input = row.querySelector('[data-input]');
            const res = await postJson(fieldUrl(row.dataset.panelNs, row.dataset.panelField), {{ value: input.value, inline: false }});
            if (!res.ok) alert(res.data.message || 'Could not save');
            refreshNamespace(row.dataset.panelNs);
        }});
    }});
    panel.querySelectorAll('[data-reset]').forEach(btn => {{
        btn.addEventListener('click', async () => {{
            const row = btn.closest('.admin-field');
            await postJson(fieldUrl(row.dataset.panelNs, row.dataset.panelField), undefined, 'DELETE');
            const input = row.querySelector('[data-input]');
            if (input && input.type !== 'file') input.value = row.dataset.panelDefault;
            refreshNamespace(row.dataset.panelNs);
        }});
    }});
    panel.querySelector('[data-reset-all]').addEventListener('click', async () => {{
        if (!confirm('Reset every field on this page to its default?')) return;
        await postJson('/api/pages/' + PAGE + '/reset');
        window.location.reload();
    }});
    panel.querySelector('[data-inline-toggle]').addEventListener('click', async () => {{
        await postJson('/api/admin/inline-edit');
        window.location.reload();
    }});
    panel.querySelector('[data-logout]').addEventListener('click', async () => {{
        await postJson('/api/admin/logout');
        window.location.reload();
    }});
}})();
</script>"##,
        slug = page.slug(),
        hotkey = page.hotkey(),
        is_admin = session.is_admin,
    )
}
