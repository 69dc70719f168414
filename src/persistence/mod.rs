//! Persisted draw state
//!
//! Features:
//! - `KeyValueStore` seam over LocalStorage (web) or memory (native/tests)
//! - Typed load-or-absent reads (`Loaded`) instead of swallowed parse errors
//! - JavaScript-compatible coercion of stored arrays

pub mod draw_store;

pub use draw_store::DrawStore;

use std::collections::HashMap;

use crate::error::DrawError;

/// String key/value storage with LocalStorage semantics
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, DrawError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DrawError>;
    fn remove_item(&mut self, key: &str) -> Result<(), DrawError>;
}

/// Result of reading a persisted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded<T> {
    /// Stored and well-formed
    Present(T),
    /// Missing, unreadable or malformed
    Absent,
}

impl<T> Loaded<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Loaded::Present(_))
    }

    pub fn present(self) -> Option<T> {
        match self {
            Loaded::Present(value) => Some(value),
            Loaded::Absent => None,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.present().unwrap_or_default()
    }
}

impl<T> From<Option<T>> for Loaded<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Loaded::Present(v),
            None => Loaded::Absent,
        }
    }
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    /// Make every write fail (simulates quota / private mode errors)
    pub fail_writes: bool,
    /// Successful writes so far
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw values
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Raw stored text for a key
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, DrawError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DrawError> {
        if self.fail_writes {
            return Err(DrawError::Storage(format!("write to {key} rejected")));
        }
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DrawError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("k"), Ok(None));
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k"), Ok(Some("v".to_string())));
        assert_eq!(store.writes(), 1);
        store.remove_item("k").unwrap();
        assert_eq!(store.raw("k"), None);
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let mut store = MemoryStore::with_items([("k", "old")]);
        store.fail_writes = true;
        assert!(matches!(store.set_item("k", "new"), Err(DrawError::Storage(_))));
        assert_eq!(store.raw("k"), Some("old"));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_loaded_helpers() {
        let present: Loaded<u32> = Some(3).into();
        assert!(present.is_present());
        assert_eq!(present.present(), Some(3));
        let absent: Loaded<u32> = None.into();
        assert_eq!(absent.unwrap_or_default(), 0);
    }
}
