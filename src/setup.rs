//! Operator setup for the target numbers
//!
//! Validates the 7 form fields and writes them under the numbers key.

use std::collections::HashSet;

use crate::consts::{DRAW_RANGE, ROLLERS_COUNT};
use crate::error::DrawError;
use crate::input::parse_int_prefix;
use crate::persistence::{DrawStore, KeyValueStore};
use crate::sim::TargetSet;

/// Shown when the browser refuses the write
pub const SAVE_FAILED_MESSAGE: &str = "Unable to save to localStorage. Check browser settings.";
pub const SAVE_OK_MESSAGE: &str = "Lucky numbers saved successfully!";

/// Check the raw field texts, in field order.
///
/// Every field is checked for a number and range before uniqueness.
pub fn validate_entries(entries: &[&str]) -> Result<TargetSet, DrawError> {
    let mut values = [0u32; ROLLERS_COUNT];

    for index in 0..ROLLERS_COUNT {
        let raw = entries.get(index).map_or("", |s| s.trim());
        let value = if raw.is_empty() {
            None
        } else {
            parse_int_prefix(raw)
        };
        let Some(value) = value else {
            return Err(DrawError::SetupFieldInvalid { index });
        };
        if !DRAW_RANGE.contains(value) {
            return Err(DrawError::SetupOutOfRange {
                index,
                value,
                min: DRAW_RANGE.min,
                max: DRAW_RANGE.max,
            });
        }
        values[index] = value as u32;
    }

    let mut seen = HashSet::with_capacity(ROLLERS_COUNT);
    if let Some(&dup) = values.iter().find(|v| !seen.insert(**v)) {
        return Err(DrawError::SetupDuplicate { value: dup });
    }

    TargetSet::new(values).ok_or(DrawError::SetupFieldInvalid { index: 0 })
}

/// Validate and store the target numbers
pub fn save_entries<S: KeyValueStore>(
    store: &mut DrawStore<S>,
    entries: &[&str],
) -> Result<TargetSet, DrawError> {
    let targets = validate_entries(entries)?;
    store.save_targets(&targets).map_err(|e| {
        log::warn!("Failed to save target numbers: {}", e);
        DrawError::Storage(SAVE_FAILED_MESSAGE.to_string())
    })?;
    log::info!("Saved target numbers {:?}", targets.values());
    Ok(targets)
}

/// Field texts to pre-fill from storage, if a 7-item array is stored
pub fn existing_entries<S: KeyValueStore>(store: &DrawStore<S>) -> Option<Vec<String>> {
    store.target_entries()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NUMBERS_KEY;
    use crate::persistence::MemoryStore;

    const GOOD: [&str; 7] = ["101", "123", "145", "167", "178", "189", "199"];

    #[test]
    fn test_validate_good_entries() {
        let targets = validate_entries(&GOOD).unwrap();
        assert_eq!(targets.values(), &[101, 123, 145, 167, 178, 189, 199]);
    }

    #[test]
    fn test_validate_rejects_blank_and_text() {
        let mut entries = GOOD;
        entries[3] = "  ";
        assert_eq!(validate_entries(&entries), Err(DrawError::SetupFieldInvalid { index: 3 }));

        entries[3] = "abc";
        assert_eq!(validate_entries(&entries), Err(DrawError::SetupFieldInvalid { index: 3 }));

        assert_eq!(
            validate_entries(&GOOD[..6]),
            Err(DrawError::SetupFieldInvalid { index: 6 })
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut entries = GOOD;
        entries[0] = "99";
        assert!(matches!(
            validate_entries(&entries),
            Err(DrawError::SetupOutOfRange { index: 0, value: 99, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut entries = GOOD;
        entries[6] = "123";
        assert_eq!(validate_entries(&entries), Err(DrawError::SetupDuplicate { value: 123 }));
    }

    #[test]
    fn test_save_and_prefill() {
        let mut store = DrawStore::new(MemoryStore::new());
        assert_eq!(existing_entries(&store), None);

        save_entries(&mut store, &GOOD).unwrap();
        assert_eq!(
            store.inner().raw(NUMBERS_KEY),
            Some("[101,123,145,167,178,189,199]")
        );
        assert_eq!(existing_entries(&store).unwrap(), GOOD.to_vec());
    }

    #[test]
    fn test_save_failure_message() {
        let mut store = DrawStore::new(MemoryStore::new());
        store.inner_mut().fail_writes = true;
        let err = save_entries(&mut store, &GOOD).unwrap_err();
        assert_eq!(err.to_string(), format!("storage error: {SAVE_FAILED_MESSAGE}"));
    }

    #[test]
    fn test_invalid_entries_not_written() {
        let mut store = DrawStore::new(MemoryStore::new());
        let mut entries = GOOD;
        entries[1] = "250";
        assert!(save_entries(&mut store, &entries).is_err());
        assert_eq!(store.inner().writes(), 0);
    }
}
