use std::env;

use axum_extra::extract::cookie::SameSite;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Origin of the library API every proxy route forwards to
    pub backend_url: String,
    pub cors_allowed_origins: Vec<String>,
    /// `APP_ENV=production` turns on Secure cookies
    pub production: bool,
    pub cookie_same_site: SameSite,
    /// Page shells and assets served outside `/api`
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            backend_url: "http://127.0.0.1:8000".to_string(),
            cors_allowed_origins: Vec::new(),
            production: false,
            cookie_same_site: SameSite::Lax,
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            backend_url: env::var("BACKEND_URL").unwrap_or(defaults.backend_url),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            cookie_same_site: env::var("COOKIE_SAME_SITE")
                .ok()
                .and_then(|v| parse_same_site(&v))
                .unwrap_or(defaults.cookie_same_site),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        other => {
            tracing::warn!("Ignoring unknown COOKIE_SAME_SITE value '{}'", other);
            None
        }
    }
}
