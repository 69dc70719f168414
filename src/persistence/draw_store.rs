//! Target numbers and matched flags in LocalStorage
//!
//! Both keys hold JSON arrays written by the page (or typed into the
//! console), so reads coerce values the way the browser would instead of
//! insisting on exact types.

use serde_json::Value;

use super::{KeyValueStore, Loaded};
use crate::consts::{MATCHED_KEY, NUMBERS_KEY, ROLLERS_COUNT};
use crate::error::DrawError;
use crate::input::parse_int_prefix;
use crate::sim::state::{MatchedBitmap, TargetSet};

/// Typed access to the persisted draw
#[derive(Debug, Clone, Default)]
pub struct DrawStore<S> {
    store: S,
}

impl<S: KeyValueStore> DrawStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Read the stored array for `key`, if it is an array of exactly 7 items
    fn load_array(&self, key: &str) -> Option<Vec<Value>> {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) if items.len() == ROLLERS_COUNT => Some(items),
            Ok(_) => {
                log::debug!("{} is not an array of {}", key, ROLLERS_COUNT);
                None
            }
            Err(e) => {
                log::debug!("{} is not valid JSON: {}", key, e);
                None
            }
        }
    }

    /// Load the 7 target numbers (absent unless all are integers in range)
    pub fn load_targets(&self) -> Loaded<TargetSet> {
        let Some(items) = self.load_array(NUMBERS_KEY) else {
            return Loaded::Absent;
        };

        let mut values = [0u32; ROLLERS_COUNT];
        for (slot, item) in values.iter_mut().zip(&items) {
            match coerce_int(item).and_then(|n| u32::try_from(n).ok()) {
                Some(n) => *slot = n,
                None => return Loaded::Absent,
            }
        }

        TargetSet::new(values).into()
    }

    /// Load the matched flags (absent on any shape problem)
    pub fn load_matched(&self) -> Loaded<MatchedBitmap> {
        let Some(items) = self.load_array(MATCHED_KEY) else {
            return Loaded::Absent;
        };

        let mut flags = [false; ROLLERS_COUNT];
        for (flag, item) in flags.iter_mut().zip(&items) {
            *flag = is_truthy(item);
        }
        Loaded::Present(MatchedBitmap::from(flags))
    }

    pub fn save_matched(&mut self, matched: &MatchedBitmap) -> Result<(), DrawError> {
        let json = serde_json::to_string(matched).map_err(|e| DrawError::Storage(e.to_string()))?;
        self.store.set_item(MATCHED_KEY, &json)
    }

    pub fn save_targets(&mut self, targets: &TargetSet) -> Result<(), DrawError> {
        let json = serde_json::to_string(targets).map_err(|e| DrawError::Storage(e.to_string()))?;
        self.store.set_item(NUMBERS_KEY, &json)
    }

    /// Stored target entries as text, for pre-filling the setup form.
    ///
    /// Accepts any 7-item array; validation happens when the form is saved.
    pub fn target_entries(&self) -> Option<Vec<String>> {
        self.load_array(NUMBERS_KEY)
            .map(|items| items.iter().map(display_value).collect())
    }
}

/// `parseInt(value, 10)` for a JSON value
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// JavaScript truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `String(value)` for a JSON value
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn store_with(numbers: Option<&str>, matched: Option<&str>) -> DrawStore<MemoryStore> {
        let mut items = Vec::new();
        if let Some(n) = numbers {
            items.push((NUMBERS_KEY, n));
        }
        if let Some(m) = matched {
            items.push((MATCHED_KEY, m));
        }
        DrawStore::new(MemoryStore::with_items(items))
    }

    #[test]
    fn test_load_targets_valid() {
        let store = store_with(Some("[101,123,145,167,178,189,199]"), None);
        let targets = store.load_targets().present().unwrap();
        assert_eq!(targets.values(), &[101, 123, 145, 167, 178, 189, 199]);
    }

    #[test]
    fn test_load_targets_coerces_like_parse_int() {
        let store = store_with(Some(r#"["101", 123.9, "145x", 167, 178, 189, 199]"#), None);
        let targets = store.load_targets().present().unwrap();
        assert_eq!(targets.get(0), 101);
        assert_eq!(targets.get(1), 123);
        assert_eq!(targets.get(2), 145);
    }

    #[test]
    fn test_load_targets_malformed_is_absent() {
        for raw in [
            "",
            "not json",
            "{}",
            "[101,123,145,167,178,189]",
            "[99,123,145,167,178,189,199]",
            "[101,123,145,167,178,189,200]",
            "[101,null,145,167,178,189,199]",
            r#"[101,"abc",145,167,178,189,199]"#,
            "[101,123,145,167,178,189,199,150]",
        ] {
            let store = store_with(Some(raw), None);
            assert_eq!(store.load_targets(), Loaded::Absent, "raw = {raw:?}");
        }
        assert_eq!(store_with(None, None).load_targets(), Loaded::Absent);
    }

    #[test]
    fn test_load_matched_truthiness() {
        let store = store_with(None, Some(r#"[true, 1, "x", false, 0, "", null]"#));
        let matched = store.load_matched().present().unwrap();
        assert_eq!(
            matched.flags(),
            &[true, true, true, false, false, false, false]
        );
    }

    #[test]
    fn test_load_matched_bad_shape_defaults() {
        let store = store_with(None, Some("[true,true]"));
        assert_eq!(store.load_matched(), Loaded::Absent);
        assert_eq!(store.load_matched().unwrap_or_default(), MatchedBitmap::default());

        let store = store_with(None, Some("garbage"));
        assert_eq!(store.load_matched(), Loaded::Absent);
    }

    #[test]
    fn test_save_matched_json_shape() {
        let mut store = store_with(None, None);
        let mut matched = MatchedBitmap::default();
        matched.mark(2);
        store.save_matched(&matched).unwrap();
        assert_eq!(
            store.inner().raw(MATCHED_KEY),
            Some("[false,false,true,false,false,false,false]")
        );
        assert_eq!(store.load_matched(), Loaded::Present(matched));
    }

    #[test]
    fn test_target_entries_prefill() {
        let store = store_with(Some(r#"[101,"abc",145,167,178,189,199]"#), None);
        let entries = store.target_entries().unwrap();
        assert_eq!(entries[0], "101");
        assert_eq!(entries[1], "abc");

        let store = store_with(Some("[101]"), None);
        assert_eq!(store.target_entries(), None);
    }
}
