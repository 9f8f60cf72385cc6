use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime configuration injected by the hosting page.
///
/// `index.html` may define `window.ENV = { API_URL: "https://..." }` before the
/// wasm bundle loads. Without it the client talks to [`DEFAULT_API_URL`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        Self::from_window().unwrap_or_else(|| Self::with_api_url(DEFAULT_API_URL))
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn from_window() -> Option<Self> {
        // Only a browser has a `window`; native test builds fall through to the default.
        if !cfg!(target_arch = "wasm32") {
            return None;
        }

        let env = web_sys::window()?.get("ENV")?;
        if env.is_undefined() || !env.is_object() {
            return None;
        }

        // `API_URL` is the documented key; `api_url` is accepted as an alias.
        ["API_URL", "api_url"].iter().find_map(|key| {
            js_sys::Reflect::get(&env, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_string())
                .filter(|s| !s.trim().is_empty())
                .map(Self::with_api_url)
        })
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_off_browser() {
        assert_eq!(EnvConfig::new().api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let c = EnvConfig::with_api_url("https://api.example.com/");
        assert_eq!(c.api_url, "https://api.example.com");
    }
}
