//! Browser LocalStorage backend (WASM only)

use wasm_bindgen::JsValue;

use super::Storage;
use crate::error::{Result, StoreError};

/// Handle to `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Acquire the page's LocalStorage.
    ///
    /// Fails when there is no window or storage is disabled (private mode,
    /// sandboxed iframes).
    pub fn acquire() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|e| StoreError::storage("get", key, js_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StoreError::storage("set", key, js_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| StoreError::storage("remove", key, js_message(&e)))
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
