//! Admin session gate.
//!
//! Two session-scoped flags drive the admin UI: `site.admin` (set by a
//! successful login) and `site.inlineEdit` (toggled by the operator). Editing
//! requires both.
//!
//! This gate is NOT a security boundary. The password is a single shared
//! value that may be baked into the binary, there is no lockout, and the only
//! thing it protects is cosmetic page copy. It exists to keep the editing UI
//! away from casual visitors.

use crate::bus::{Event, EventBus};
use crate::store::{KvStore, SessionScope, SessionStore};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use subtle::ConstantTimeEq;

/// Session cookie name
pub const SESSION_COOKIE: &str = "outreach_session";

pub const ADMIN_FLAG_KEY: &str = "site.admin";
pub const INLINE_EDIT_KEY: &str = "site.inlineEdit";

const FLAG_TRUE: &str = "true";

// ============================================================================
// Session State
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    #[serde(rename = "admin")]
    pub is_admin: bool,
    pub inline_edit: bool,
}

impl SessionState {
    pub fn read(session: &dyn KvStore) -> Self {
        Self {
            is_admin: read_flag(session, ADMIN_FLAG_KEY),
            inline_edit: read_flag(session, INLINE_EDIT_KEY),
        }
    }

    /// Inline edit only counts for an authenticated admin.
    pub fn can_edit(&self) -> bool {
        self.is_admin && self.inline_edit
    }
}

fn read_flag(session: &dyn KvStore, key: &str) -> bool {
    session.read_raw(key).as_deref() == Some(FLAG_TRUE)
}

fn write_flag(session: &dyn KvStore, key: &str, on: bool) {
    if on {
        session.write_raw(key, FLAG_TRUE);
    } else {
        session.remove_raw(key);
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Compare trimmed input against the expected password in constant time.
pub fn verify_password(input: &str, expected: &str) -> bool {
    let input = input.trim().as_bytes();
    let expected = expected.as_bytes();
    input.len() == expected.len() && input.ct_eq(expected).unwrap_u8() == 1
}

#[derive(Clone)]
pub struct AuthGate {
    expected: String,
    bus: EventBus,
}

impl AuthGate {
    pub fn new(expected: impl Into<String>, bus: EventBus) -> Self {
        Self {
            expected: expected.into(),
            bus,
        }
    }

    /// Whether `password` is the admin password. Touches no session.
    pub fn accepts(&self, password: &str) -> bool {
        verify_password(password, &self.expected)
    }

    /// On success marks the session as admin. A wrong password leaves the
    /// session untouched.
    pub fn login(&self, session: &SessionScope<'_>, password: &str) -> bool {
        if !self.accepts(password) {
            tracing::info!("admin login rejected");
            return false;
        }
        write_flag(session, ADMIN_FLAG_KEY, true);
        tracing::info!("admin login");
        self.bus.publish(Event::AuthChanged {
            session: session.id().to_string(),
        });
        true
    }

    /// Clears the admin flag. The inline edit preference is kept so it
    /// applies again on the next login.
    pub fn logout(&self, session: &SessionScope<'_>) {
        write_flag(session, ADMIN_FLAG_KEY, false);
        tracing::info!("admin logout");
        self.bus.publish(Event::AuthChanged {
            session: session.id().to_string(),
        });
    }

    /// Flip inline editing and return the new value.
    pub fn toggle_inline_edit(&self, session: &SessionScope<'_>) -> bool {
        let on = !read_flag(session, INLINE_EDIT_KEY);
        write_flag(session, INLINE_EDIT_KEY, on);
        self.bus.publish(Event::InlineEditChanged {
            session: session.id().to_string(),
        });
        on
    }
}

// ============================================================================
// Cookie Helpers
// ============================================================================

/// The session id from the cookie, if it names a live session.
pub fn session_id(jar: &CookieJar, sessions: &SessionStore) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|id| sessions.is_active(id))
}

/// Reuse the live session from the cookie or start a new one.
pub fn ensure_session(jar: CookieJar, sessions: &SessionStore) -> (CookieJar, String) {
    if let Some(id) = session_id(&jar, sessions) {
        return (jar, id);
    }
    let id = sessions.create();
    // No Max-Age: the cookie ends with the browser session.
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), id)
}

/// Flags for the request's session; a visitor without a session has none set.
pub fn session_state(jar: &CookieJar, sessions: &SessionStore) -> SessionState {
    match session_id(jar, sessions) {
        Some(id) => SessionState::read(&sessions.scope(&id)),
        None => SessionState::default(),
    }
}
