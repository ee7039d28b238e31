use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration.
///
/// Lookup order for every field:
/// 1. `window.ENV` (injected by the hosting page, e.g. `window.ENV = { API_URL, NOTEHUB_TOKEN }`)
/// 2. build-time environment (`NOTEHUB_API_URL`, `NOTEHUB_TOKEN`, `NOTEHUB_LOG_LEVEL`)
/// 3. defaults
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub log_level: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let api_url = window_env(&["API_URL", "api_url"])
            .or_else(|| option_env!("NOTEHUB_API_URL").map(str::to_string));
        let token = window_env(&["NOTEHUB_TOKEN", "token"])
            .or_else(|| option_env!("NOTEHUB_TOKEN").map(str::to_string));
        let log_level = window_env(&["LOG_LEVEL", "log_level"])
            .or_else(|| option_env!("NOTEHUB_LOG_LEVEL").map(str::to_string));

        Self::from_parts(api_url, token, log_level)
    }

    /// Apply defaults and normalization to raw values.
    pub(crate) fn from_parts(
        api_url: Option<String>,
        token: Option<String>,
        log_level: Option<String>,
    ) -> Self {
        let api_url = api_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let log_level = log_level
            .map(|l| l.trim().to_ascii_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            api_url,
            token,
            log_level,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn window_env(keys: &[&str]) -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    keys.iter().find_map(|k| {
        js_sys::Reflect::get(&env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}
