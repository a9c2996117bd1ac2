//! CSS styles for the outreach site.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base03: #002b36;
    --base02: #073642;
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --orange: #cb4b16;
    --red: #dc322f;
    --magenta: #d33682;
    --violet: #6c71c4;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
    overflow-x: hidden;
}

.container {
    position: relative;
    z-index: 1;
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; color: var(--base02); }
h1 { font-size: 2rem; }
h2 { font-size: 1.4rem; }
h3 { font-size: 1.1rem; }
p { margin-bottom: 1em; }
.lead { font-size: 1.15rem; color: var(--base01); }

/* Navigation */
.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    z-index: 100;
}

.nav-bar .brand { font-weight: 700; color: var(--base02); }
.nav-bar .spacer { flex: 1; }
.nav-bar .links { display: flex; gap: 1rem; }
.nav-bar a { font-size: 0.9rem; }

.menu-toggle {
    display: none;
    background: none;
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.25rem 0.6rem;
    cursor: pointer;
    color: var(--fg);
}

.menu-overlay {
    position: fixed;
    inset: 0;
    background: rgba(0, 43, 54, 0.92);
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 1.5rem;
    opacity: 0;
    pointer-events: none;
    transition: opacity 0.25s ease;
    z-index: 200;
}
.menu-overlay.open { opacity: 1; pointer-events: auto; }
.menu-overlay a { color: var(--base3); font-size: 1.5rem; }
.menu-overlay .close { position: absolute; top: 1rem; right: 1rem; }

@media (max-width: 720px) {
    .nav-bar .links { display: none; }
    .menu-toggle { display: inline-block; }
}

/* Decorative background layer */
.decor {
    position: fixed;
    inset: 0;
    overflow: hidden;
    pointer-events: none;
    z-index: 0;
}
.decor span {
    position: absolute;
    width: 18rem;
    height: 18rem;
    border-radius: 50%;
    opacity: 0.12;
    animation: drift 24s ease-in-out infinite alternate;
}
.decor span:nth-child(1) { background: var(--cyan); top: -6rem; left: -4rem; }
.decor span:nth-child(2) { background: var(--violet); bottom: -8rem; right: -5rem; animation-delay: -8s; }
.decor span:nth-child(3) { background: var(--yellow); top: 40%; left: 60%; animation-delay: -16s; }

@keyframes drift {
    from { transform: translate(0, 0) scale(1); }
    to { transform: translate(3rem, 2rem) scale(1.15); }
}

@media (prefers-reduced-motion: reduce) {
    .decor span { animation: none; }
}

/* Content */
.button {
    display: inline-block;
    padding: 0.5rem 1.1rem;
    border-radius: 4px;
    background: var(--blue);
    color: var(--base3);
    margin: 0.5rem 0.5rem 1rem 0;
}
.button:hover { background: var(--cyan); color: var(--base3); text-decoration: none; }

.gallery { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; margin: 1rem 0; }
.image-slot { position: relative; }
.image-slot img { width: 100%; border-radius: 6px; display: block; background: var(--accent); min-height: 120px; object-fit: cover; }
.image-picker {
    position: absolute;
    bottom: 0.5rem;
    right: 0.5rem;
    background: var(--base02);
    color: var(--base3);
    font-size: 0.75rem;
    padding: 0.2rem 0.5rem;
    border-radius: 3px;
    cursor: pointer;
}
.image-picker input { display: none; }

.faq-q { margin-bottom: 0.25em; }
.faq-a { padding-left: 1rem; border-left: 3px solid var(--border); }

.card-list { list-style: none; display: grid; gap: 1rem; margin: 1rem 0; }
.card-list li { border: 1px solid var(--border); border-radius: 6px; padding: 1rem; background: rgba(238, 232, 213, 0.4); }

.message { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }
.message.success { background: #eef4d6; color: var(--green); }
.message.error { background: #fbe3e0; color: var(--red); }

.contact-form { display: grid; gap: 0.75rem; max-width: 520px; }
.contact-form input, .contact-form textarea {
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font: inherit;
}
.contact-form button { justify-self: start; }

/* Inline editing */
[contenteditable="true"] { outline: 1px dashed var(--orange); outline-offset: 3px; cursor: text; }
[contenteditable="true"]:focus { outline-style: solid; background: rgba(203, 75, 22, 0.05); }

/* Admin login prompt */
.login-modal {
    position: fixed;
    inset: 0;
    background: rgba(0, 43, 54, 0.5);
    display: none;
    align-items: center;
    justify-content: center;
    z-index: 300;
}
.login-modal.open { display: flex; }
.login-modal form {
    background: var(--bg);
    padding: 1.5rem;
    border-radius: 6px;
    display: grid;
    gap: 0.75rem;
    min-width: 280px;
}
.login-modal input { padding: 0.4rem 0.75rem; border: 1px solid var(--border); border-radius: 4px; }

/* Admin panel */
.admin-panel {
    position: fixed;
    right: 1rem;
    bottom: 1rem;
    width: 360px;
    max-height: 80vh;
    overflow-y: auto;
    background: var(--bg);
    border: 1px solid var(--base1);
    border-radius: 6px;
    box-shadow: 0 6px 24px rgba(0, 0, 0, 0.15);
    padding: 1rem;
    z-index: 250;
    display: none;
    font-size: 0.85rem;
}
.admin-panel.open { display: block; }
.admin-panel h2 { margin-top: 0; font-size: 1rem; }
.admin-panel .admin-actions { display: flex; gap: 0.5rem; flex-wrap: wrap; margin-bottom: 0.75rem; }
.admin-panel .admin-field { display: grid; gap: 0.25rem; margin-bottom: 0.75rem; }
.admin-panel .admin-field label { font-weight: 600; color: var(--base01); }
.admin-panel .admin-field textarea, .admin-panel .admin-field input[type=text] {
    width: 100%;
    padding: 0.3rem 0.5rem;
    border: 1px solid var(--border);
    border-radius: 3px;
    font: inherit;
}
.admin-panel .admin-field .row { display: flex; gap: 0.5rem; }
.admin-panel button {
    padding: 0.25rem 0.6rem;
    border: 1px solid var(--border);
    border-radius: 3px;
    background: var(--accent);
    color: var(--fg);
    cursor: pointer;
    font-size: 0.8rem;
}
.admin-panel button.danger { color: var(--red); }
.admin-toggle {
    position: fixed;
    left: 0;
    bottom: 0;
    width: 14px;
    height: 14px;
    opacity: 0;
    border: none;
    background: none;
    cursor: default;
    z-index: 260;
}
"#;
