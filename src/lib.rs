//! Lucky Draw - slot-machine style number rollers
//!
//! Core modules:
//! - `sim`: Spin controller, roller lanes and timers (no DOM dependencies)
//! - `persistence`: Key/value storage and the persisted draw state
//! - `settings`: Tunable timings, persisted in LocalStorage
//! - `setup`: Operator tool for storing the target numbers
//! - `input`: Browser-compatible integer parsing
//! - `ui`, `audio`, `platform`: Browser front end (wasm32 only)

pub mod error;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod setup;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use error::DrawError;
pub use persistence::{DrawStore, KeyValueStore, Loaded, MemoryStore};
pub use settings::DrawSettings;
pub use sim::{DrawEvent, DrawSnapshot, SingleRoller, SpinController, SpinPhase};

/// Draw configuration constants
pub mod consts {
    use crate::NumberRange;

    /// Number of rollers (and target numbers) in a draw
    pub const ROLLERS_COUNT: usize = 7;
    /// Values a draw roller can show
    pub const DRAW_RANGE: NumberRange = NumberRange::new(100, 199);
    /// Values the single roller game can show
    pub const SINGLE_RANGE: NumberRange = NumberRange::new(1, 99);

    /// Fallback tile height in pixels when the DOM can't measure one
    pub const ITEM_HEIGHT_FALLBACK: f32 = 60.0;

    /// Maximum shuffle ticks applied in one `advance` call (tab wake-up guard)
    pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

    /// LocalStorage keys
    pub const NUMBERS_KEY: &str = "luckyDrawNumbers";
    pub const MATCHED_KEY: &str = "luckyDrawMatched";
    pub const SETTINGS_KEY: &str = "luckyDrawSettings";

    /// Overlay glyph for a lane that missed
    pub const MISS_GLYPH: &str = "X";
}

/// Inclusive range of integers shown on a roller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub min: u32,
    pub max: u32,
}

impl NumberRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Number of tiles on the roller
    #[inline]
    pub const fn len(&self) -> usize {
        (self.max - self.min + 1) as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.max < self.min
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min as i64 && value <= self.max as i64
    }

    /// Tile index of a value (None if outside the range)
    #[inline]
    pub fn index_of(&self, value: u32) -> Option<usize> {
        self.contains(value as i64)
            .then(|| (value - self.min) as usize)
    }

    /// Value shown on a tile (clamped to the last tile)
    #[inline]
    pub fn value_at(&self, index: usize) -> u32 {
        self.min + (index.min(self.len() - 1) as u32)
    }

    /// Iterate every value on the roller, top to bottom
    pub fn values(&self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

/// Vertical translate (px) that brings tile `index` into the window
#[inline]
pub fn offset_for_index(index: usize, item_height: f32) -> f32 {
    -(index as f32) * item_height
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;

    #[test]
    fn test_range_index_mapping() {
        assert_eq!(DRAW_RANGE.len(), 100);
        assert_eq!(DRAW_RANGE.index_of(100), Some(0));
        assert_eq!(DRAW_RANGE.index_of(145), Some(45));
        assert_eq!(DRAW_RANGE.index_of(199), Some(99));
        assert_eq!(DRAW_RANGE.index_of(99), None);
        assert_eq!(DRAW_RANGE.index_of(200), None);
        assert_eq!(DRAW_RANGE.value_at(45), 145);
        assert_eq!(DRAW_RANGE.value_at(500), 199);
    }

    #[test]
    fn test_single_range() {
        assert_eq!(SINGLE_RANGE.len(), 99);
        assert!(SINGLE_RANGE.contains(1));
        assert!(!SINGLE_RANGE.contains(0));
        assert_eq!(SINGLE_RANGE.values().count(), 99);
    }

    #[test]
    fn test_offset_for_index() {
        assert_eq!(offset_for_index(0, 60.0), 0.0);
        assert_eq!(offset_for_index(45, 60.0), -2700.0);
    }
}
