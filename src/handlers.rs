//! HTTP route handlers for the outreach site.
//!
//! Page handlers render HTML; the `/api` handlers are the admin surface over
//! the override store and the session gate.

use crate::auth::{ensure_session, session_id, session_state, SessionState};
use crate::binding::{upload_mime, CommitOutcome, EditSource, EditableField};
use crate::error::SiteError;
use crate::overrides::{Overrides, UploadMemo};
use crate::pages::{find_field, list_fields, page_for_namespace, reset_all_for_page, PageId};
use crate::templates::{
    render_contact, render_editable_page, render_home, render_not_found, render_satellites,
};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Simulated latency for the contact form.
pub const CONTACT_SEND_DELAY: Duration = Duration::from_millis(800);

/// Upper bound for image upload request bodies.
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// Page Handlers
// ============================================================================

pub async fn home() -> Html<String> {
    Html(render_home())
}

pub async fn satellites() -> Html<String> {
    Html(render_satellites())
}

fn editable_page(page: PageId, state: &AppState, jar: &CookieJar) -> Html<String> {
    let session = session_state(jar, &state.sessions);
    Html(render_editable_page(page, &state.overrides, &session))
}

pub async fn about(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    editable_page(PageId::About, &state, &jar)
}

pub async fn faq(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    editable_page(PageId::Faq, &state, &jar)
}

pub async fn getting_started(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    editable_page(PageId::GettingStarted, &state, &jar)
}

pub async fn sponsors(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    editable_page(PageId::Sponsors, &state, &jar)
}

pub async fn queensland(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    editable_page(PageId::Queensland, &state, &jar)
}

pub async fn victoria(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    editable_page(PageId::Victoria, &state, &jar)
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found())).into_response()
}

// ============================================================================
// Contact
// ============================================================================

pub async fn contact_page() -> Html<String> {
    Html(render_contact(None))
}

#[derive(Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub async fn contact_submit(Form(form): Form<ContactForm>) -> Html<String> {
    tokio::time::sleep(CONTACT_SEND_DELAY).await;
    tracing::info!(chars = form.message.len(), "contact form received");
    tracing::debug!(email = %form.email, "contact form sender");
    let name = form.name.trim();
    let thanks = if name.is_empty() {
        "Thanks, we'll be in touch soon.".to_string()
    } else {
        format!("Thanks {}, we'll be in touch soon.", name)
    };
    Html(render_contact(Some(&thanks)))
}

// ============================================================================
// Admin Session API
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/login
pub async fn api_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), SiteError> {
    // A rejected attempt must not start a session: its cookie is never sent.
    if !state.auth.accepts(&req.password) {
        tracing::info!("admin login rejected");
        return Err(SiteError::IncorrectPassword);
    }
    let (jar, id) = ensure_session(jar, &state.sessions);
    if state.auth.login(&state.sessions.scope(&id), &req.password) {
        Ok((jar, Json(json!({ "ok": true }))))
    } else {
        Err(SiteError::IncorrectPassword)
    }
}

/// POST /api/admin/logout
pub async fn api_logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<Value> {
    if let Some(id) = session_id(&jar, &state.sessions) {
        state.auth.logout(&state.sessions.scope(&id));
    }
    Json(json!({ "ok": true }))
}

/// POST /api/admin/inline-edit - flip inline edit mode for this session.
pub async fn api_toggle_inline_edit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let (jar, id) = ensure_session(jar, &state.sessions);
    let on = state.auth.toggle_inline_edit(&state.sessions.scope(&id));
    (jar, Json(json!({ "ok": true, "inline_edit": on })))
}

/// GET /api/admin/session
pub async fn api_session(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<SessionState> {
    Json(session_state(&jar, &state.sessions))
}

// ============================================================================
// Override API
// ============================================================================

fn lookup(namespace: &str, field: &str) -> Result<EditableField, SiteError> {
    find_field(namespace, field).ok_or_else(|| SiteError::UnknownField {
        namespace: namespace.to_string(),
        field: field.to_string(),
    })
}

fn authorize(session: &SessionState, source: EditSource) -> Result<(), SiteError> {
    if !session.is_admin {
        return Err(SiteError::Unauthorized);
    }
    if !source.permits(session) {
        return Err(SiteError::InlineEditDisabled);
    }
    Ok(())
}

/// GET /api/overrides/{ns} - current overrides of one namespace (public).
pub async fn api_get_namespace(
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
) -> Result<Json<Overrides>, SiteError> {
    if page_for_namespace(&namespace).is_none() {
        return Err(SiteError::UnknownNamespace(namespace));
    }
    Ok(Json(state.overrides.load(&namespace)))
}

#[derive(Deserialize)]
pub struct OverrideRequest {
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// POST /api/overrides/{ns}/{field}
pub async fn api_set_override(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path((namespace, field)): Path<(String, String)>,
    Json(req): Json<OverrideRequest>,
) -> Result<Json<Value>, SiteError> {
    let binding = lookup(&namespace, &field)?;
    let session = session_state(&jar, &state.sessions);
    let source = if req.inline {
        EditSource::Inline
    } else {
        EditSource::Panel
    };
    authorize(&session, source)?;

    match binding.commit(&state.overrides, &session, source, &req.value) {
        CommitOutcome::Stored(value) => Ok(Json(json!({ "ok": true, "value": value }))),
        CommitOutcome::Reset => Ok(Json(json!({ "ok": true, "value": null }))),
        CommitOutcome::Rejected => Err(SiteError::InvalidValue(field)),
    }
}

/// DELETE /api/overrides/{ns}/{field}
pub async fn api_delete_override(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path((namespace, field)): Path<(String, String)>,
) -> Result<Json<Value>, SiteError> {
    let binding = lookup(&namespace, &field)?;
    authorize(&session_state(&jar, &state.sessions), EditSource::Panel)?;
    state.overrides.delete(binding.namespace, binding.field.id);
    Ok(Json(json!({ "ok": true })))
}

#[derive(Deserialize, Default)]
pub struct UploadQuery {
    #[serde(default)]
    pub inline: bool,
}

/// POST /api/images/{ns}/{field} - multipart upload stored as a data URI.
///
/// A failed upload leaves the previous override in place.
pub async fn api_upload_image(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path((namespace, field)): Path<(String, String)>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<Value>, SiteError> {
    let binding = lookup(&namespace, &field)?;
    let session = session_state(&jar, &state.sessions);
    let source = if query.inline {
        EditSource::Inline
    } else {
        EditSource::Panel
    };
    authorize(&session, source)?;

    let part = multipart
        .next_field()
        .await
        .map_err(|e| SiteError::Upload(e.to_string()))?
        .ok_or_else(|| SiteError::Upload("no file in request".to_string()))?;
    let file_name = part.file_name().map(str::to_string);
    let content_type = part.content_type().map(str::to_string);
    let bytes = part
        .bytes()
        .await
        .map_err(|e| SiteError::Upload(e.to_string()))?;

    let mime = upload_mime(file_name.as_deref(), content_type.as_deref())
        .ok_or_else(|| SiteError::Upload("unknown file type".to_string()))?;

    match binding.commit_image(&state.overrides, &session, source, &mime, &bytes) {
        CommitOutcome::Stored(_) => {
            state.overrides.remember_upload(&UploadMemo {
                namespace: binding.namespace.to_string(),
                field: binding.field.id.to_string(),
                mime: mime.clone(),
                bytes: bytes.len(),
                at: Utc::now(),
            });
            tracing::info!(namespace = binding.namespace, field = binding.field.id, bytes = bytes.len(), "image uploaded");
            Ok(Json(json!({ "ok": true, "mime": mime, "bytes": bytes.len() })))
        }
        CommitOutcome::Reset | CommitOutcome::Rejected => {
            Err(SiteError::Upload(format!("{} is not an image", mime)))
        }
    }
}

// ============================================================================
// Page API
// ============================================================================

fn parse_page(slug: &str) -> Result<PageId, SiteError> {
    PageId::from_slug(slug).ok_or_else(|| SiteError::UnknownPage(slug.to_string()))
}

/// GET /api/pages/{page}/fields
pub async fn api_list_fields(Path(slug): Path<String>) -> Result<Json<Vec<EditableField>>, SiteError> {
    Ok(Json(list_fields(parse_page(&slug)?)))
}

/// POST /api/pages/{page}/reset - reset every override the page owns.
pub async fn api_reset_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(slug): Path<String>,
) -> Result<Json<Value>, SiteError> {
    let page = parse_page(&slug)?;
    authorize(&session_state(&jar, &state.sessions), EditSource::Panel)?;
    reset_all_for_page(&state.overrides, page);
    Ok(Json(json!({ "ok": true })))
}
