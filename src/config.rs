use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_VIZ_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/@viz-js/viz@3.4.0/lib/viz-standalone.js";

/// How many tokens around the peak activation make up the truncated strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub before: usize,
    pub after: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            before: 50,
            after: 4,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub api_ext: String,
    pub ui_base_url: String,
    pub ui_ext: String,
    pub api_timeout: Option<Duration>,
    pub window: WindowConfig,
    pub viz_js_url: String,
    pub cors_origins: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            api_base_url: "http://localhost:8080".to_string(),
            api_ext: "/api/".to_string(),
            ui_base_url: String::new(),
            ui_ext: "/viz/".to_string(),
            api_timeout: None,
            window: WindowConfig::default(),
            viz_js_url: DEFAULT_VIZ_JS_URL.to_string(),
            cors_origins: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so tests don't
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port);

        let api_base_url = lookup("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let api_ext = lookup("API_EXT")
            .map(|ext| normalize_ext(&ext))
            .unwrap_or(defaults.api_ext);

        let ui_base_url = lookup("UI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.ui_base_url);
        let ui_ext = lookup("UI_EXT")
            .map(|ext| normalize_ext(&ext))
            .unwrap_or(defaults.ui_ext);

        let api_timeout = lookup("API_TIMEOUT_SECS").and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                warn!("[neuroviz] Invalid API_TIMEOUT_SECS value {:?}, requests will not time out", raw);
                None
            }
        });

        let window = WindowConfig {
            before: parse_or(&lookup, "WINDOW_BEFORE", defaults.window.before),
            after: parse_or(&lookup, "WINDOW_AFTER", defaults.window.after),
        };

        let viz_js_url = lookup("VIZ_JS_URL").unwrap_or(defaults.viz_js_url);
        let cors_origins = lookup("CORS_ORIGINS");

        Self {
            port,
            api_base_url,
            api_ext,
            ui_base_url,
            ui_ext,
            api_timeout,
            window,
            viz_js_url,
            cors_origins,
        }
    }

    /// Prefix every UI link is built from, e.g. `https://host/viz/`.
    pub fn ui_prefix(&self) -> String {
        format!("{}{}", self.ui_base_url, self.ui_ext)
    }

    pub fn api_prefix(&self) -> String {
        format!("{}{}", self.api_base_url, self.api_ext)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("[neuroviz] Invalid {} value {:?}, defaulting to {}", key, raw, default);
            default
        }),
        None => default,
    }
}

// Path prefixes are joined directly with the next segment, so they always
// start and end with a slash.
fn normalize_ext(ext: &str) -> String {
    let trimmed = ext.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
