//! HTTP server settings.
//!
//! - `API_ADDRESS`          = bind address (default `0.0.0.0:8000`)
//! - `CORS_ALLOWED_ORIGINS` = comma-separated origins replacing the defaults

/// Bind address used when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 7] = [
    "https://curio-mind-ai.vercel.app",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:4173",
    "http://127.0.0.1:4173",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub address: String,
    pub allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_API_ADDRESS.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("API_ADDRESS").filter(|v| !v.trim().is_empty()) {
            cfg.address = addr.trim().to_string();
        }

        if let Some(raw) = lookup("CORS_ALLOWED_ORIGINS") {
            let origins: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !origins.is_empty() {
                cfg.allowed_origins = origins;
            }
        }

        cfg
    }
}
