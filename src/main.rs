//! Outreach site - public pages with admin content overrides.
//!
//! This is the main entry point for the web server.
//! The application is organized into the following modules:
//!
//! - `store`: Persistent and per-session key-value adapters
//! - `overrides`: Namespaced field overrides and normalization
//! - `auth`: Admin session gate and inline edit mode
//! - `bus` / `live`: Change events and their WebSocket bridge
//! - `binding` / `pages`: Editable field bindings and page registries
//! - `templates`: HTML/CSS/JS templates and rendering
//! - `handlers`: HTTP route handlers

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use outreach::{config::Config, handlers, live, AppState, SiteError};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), SiteError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    let state = Arc::new(AppState::new(config.clone()));

    let purge_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            tick.tick().await;
            let purged = purge_state.sessions.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "expired sessions purged");
            }
        }
    });

    let app = Router::new()
        // Public pages
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/faq", get(handlers::faq))
        .route("/getting-started", get(handlers::getting_started))
        .route("/sponsors", get(handlers::sponsors))
        .route("/contact", get(handlers::contact_page).post(handlers::contact_submit))
        .route("/satellites", get(handlers::satellites))
        .route("/satellites/queensland", get(handlers::queensland))
        .route("/satellites/victoria", get(handlers::victoria))
        // Admin session
        .route("/api/admin/session", get(handlers::api_session))
        .route("/api/admin/login", post(handlers::api_login))
        .route("/api/admin/logout", post(handlers::api_logout))
        .route("/api/admin/inline-edit", post(handlers::api_toggle_inline_edit))
        // Overrides
        .route("/api/overrides/{ns}", get(handlers::api_get_namespace))
        .route(
            "/api/overrides/{ns}/{field}",
            post(handlers::api_set_override).delete(handlers::api_delete_override),
        )
        .route(
            "/api/images/{ns}/{field}",
            post(handlers::api_upload_image).layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES)),
        )
        // Admin panel
        .route("/api/pages/{page}/fields", get(handlers::api_list_fields))
        .route("/api/pages/{page}/reset", post(handlers::api_reset_page))
        // Live refresh
        .route("/ws", get(live::ws_handler))
        .nest_service("/assets", ServeDir::new(&config.assets_dir))
        .fallback(handlers::not_found)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!(addr = %config.bind_addr, "outreach server running");
    tracing::info!(db = %config.db_path.display(), assets = %config.assets_dir.display(), "storage");
    tracing::info!("admin gate: shared password, hides the editing UI only, not a security boundary");

    axum::serve(listener, app).await?;
    Ok(())
}
