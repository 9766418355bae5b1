use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub(crate) const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";
pub(crate) const DEFAULT_PER_PAGE: u32 = 12;

/// Global the host page may set to prefetched query state (JSON string or object).
pub(crate) const QUERY_STATE_GLOBAL: &str = "__NOTEHUB_QUERY_STATE__";

/// Runtime configuration read from `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub per_page: u32,
}

impl EnvConfig {
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        match env {
            Some(env) => Self::from_lookup(|key| read_env_key(&env, key)),
            None => Self::from_lookup(|_| None),
        }
    }

    /// Builds a config from a key lookup. Upper-case keys win over the
    /// lower-case spelling.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |upper: &str, lower: &str| {
            lookup(upper)
                .or_else(|| lookup(lower))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = get("API_URL", "api_url")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let per_page = get("PER_PAGE", "per_page")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PER_PAGE);

        Self {
            api_url,
            api_token: get("API_TOKEN", "api_token"),
            per_page,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env_key(env: &JsValue, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(env, &key.into()).ok()?;
    if let Some(s) = value.as_string() {
        return Some(s);
    }
    value.as_f64().map(|n| (n as i64).to_string())
}

/// Raw JSON of the prefetched query state, if the host page provided one.
pub(crate) fn read_prefetched_state_json() -> Option<String> {
    let value = web_sys::window()?.get(QUERY_STATE_GLOBAL)?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(s) = value.as_string() {
        return Some(s);
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}
