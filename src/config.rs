//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is honoured (loaded by `main`).

use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_PATH: &str = ".outreach_db";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Fallback admin password when nothing is configured.
///
/// The admin gate only hides the editing UI from casual visitors. The value
/// ships in the binary and is compared server-side without rate limiting, so
/// it is not a security boundary.
pub const DEFAULT_ADMIN_PASSWORD: &str = "btf-2024";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub assets_dir: PathBuf,
    pub admin_password: String,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let session_ttl_hours = env::var("OUTREACH_SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS);

        Self {
            bind_addr: env::var("OUTREACH_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            db_path: env::var("OUTREACH_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
            assets_dir: env::var("OUTREACH_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ASSETS_DIR)),
            admin_password: resolve_admin_password(env::var("OUTREACH_ADMIN_PASSWORD").ok()),
            session_ttl_hours,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            admin_password: resolve_admin_password(None),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

/// Runtime value first, then the value baked in at build time, then the default.
pub fn resolve_admin_password(runtime: Option<String>) -> String {
    runtime
        .filter(|p| !p.trim().is_empty())
        .or_else(|| option_env!("OUTREACH_ADMIN_PASSWORD").map(str::to_string))
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_password_wins() {
        assert_eq!(resolve_admin_password(Some("letmein".to_string())), "letmein");
    }

    #[test]
    fn test_blank_runtime_password_ignored() {
        let resolved = resolve_admin_password(Some("   ".to_string()));
        assert!(!resolved.trim().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, DEFAULT_BIND);
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.db_path, PathBuf::from(".outreach_db"));
    }
}
