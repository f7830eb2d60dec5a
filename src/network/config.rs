//! Chat endpoint configuration: one URL, one bearer credential, read once
//! at startup and never consulted elsewhere.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

#[derive(Clone)]
pub struct ChatConfig {
    endpoint: String,
    api_key: String,
}

impl ChatConfig {
    /// Build from the `CHAT_API_URL` / `CHAT_API_KEY` environment variables
    /// injected at compile time.
    pub fn from_env() -> Result<Self, &'static str> {
        match (option_env!("CHAT_API_URL"), option_env!("CHAT_API_KEY")) {
            (Some(url), Some(key)) => Ok(Self::from_values(url, key)),
            _ => Err("CHAT_API_URL / CHAT_API_KEY are not set"),
        }
    }

    pub fn from_values(endpoint: &str, api_key: &str) -> Self {
        ChatConfig {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn bearer_token(&self) -> &str {
        &self.api_key
    }
}

thread_local! {
    static CHAT_CONFIG: RefCell<Option<ChatConfig>> = RefCell::new(None);
}

/// Called from `start()`. A missing configuration is not fatal here; the
/// first send will surface it as an ordinary request failure.
pub fn init_chat_config() {
    match ChatConfig::from_env() {
        Ok(config) => CHAT_CONFIG.with(|c| *c.borrow_mut() = Some(config)),
        Err(reason) => {
            web_sys::console::warn_1(&format!("Chat disabled: {}", reason).into());
        }
    }
}

/// Runtime override for host pages that inject the endpoint after the WASM
/// bundle was built.
#[wasm_bindgen]
pub fn init_chat_config_js(endpoint: String, api_key: String) {
    CHAT_CONFIG.with(|c| *c.borrow_mut() = Some(ChatConfig::from_values(&endpoint, &api_key)));
}

pub fn get_chat_config() -> Result<ChatConfig, String> {
    CHAT_CONFIG
        .with(|c| c.borrow().clone())
        .ok_or_else(|| "Chat endpoint is not configured".to_string())
}
