//! LocalStorage backed `KeyValueStore`

use crate::error::DrawError;
use crate::persistence::{KeyValueStore, MemoryStore};

/// The page's `window.localStorage`
#[derive(Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// None when storage is unavailable (disabled, sandboxed iframe, ...)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> DrawError {
    DrawError::Storage(format!("{:?}", e))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DrawError> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DrawError> {
        self.storage.set_item(key, value).map_err(js_err)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DrawError> {
        self.storage.remove_item(key).map_err(js_err)
    }
}

/// LocalStorage when the browser allows it, otherwise a per-page memory store
pub enum PageStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl PageStore {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Some(local) => PageStore::Local(local),
            None => {
                log::warn!("LocalStorage unavailable - nothing will be kept after reload");
                PageStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for PageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, DrawError> {
        match self {
            PageStore::Local(s) => s.get_item(key),
            PageStore::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DrawError> {
        match self {
            PageStore::Local(s) => s.set_item(key, value),
            PageStore::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DrawError> {
        match self {
            PageStore::Local(s) => s.remove_item(key),
            PageStore::Memory(s) => s.remove_item(key),
        }
    }
}
