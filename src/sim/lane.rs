//! Roller lane state machine
//!
//! `Resting -> Shuffling -> Resting (miss)` or `Shuffling -> Locked (hit)`.
//! `Locked` is terminal: every mutator is a no-op once a lane has locked.

use super::state::LaneSnapshot;
use crate::NumberRange;
use crate::consts::MISS_GLYPH;

/// Lane state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneState {
    /// Unlocked and still
    Resting,
    /// Unlocked, index changing every shuffle tick
    Shuffling,
    /// Matched; shows `value` for the rest of the session
    Locked { value: u32 },
}

/// Text over the roller window after a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Blank,
    Hit(u32),
    Miss,
}

/// One vertical roller
#[derive(Debug, Clone)]
pub struct RollerLane {
    pub id: usize,
    range: NumberRange,
    displayed_index: usize,
    state: LaneState,
    overlay: Overlay,
}

impl RollerLane {
    pub fn new(id: usize, range: NumberRange) -> Self {
        Self {
            id,
            range,
            displayed_index: 0,
            state: LaneState::Resting,
            overlay: Overlay::Blank,
        }
    }

    pub fn state(&self) -> LaneState {
        self.state
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn displayed_index(&self) -> usize {
        self.displayed_index
    }

    pub fn displayed_value(&self) -> u32 {
        self.range.value_at(self.displayed_index)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, LaneState::Locked { .. })
    }

    /// Lock on `value` with a hit overlay
    pub fn lock(&mut self, value: u32) {
        if self.is_locked() {
            return;
        }
        if let Some(index) = self.range.index_of(value) {
            self.displayed_index = index;
        }
        self.state = LaneState::Locked { value };
        self.overlay = Overlay::Hit(value);
    }

    /// Back to resting at the top tile with no overlay (page load, unmatched)
    pub fn reset(&mut self) {
        if self.is_locked() {
            return;
        }
        self.displayed_index = 0;
        self.state = LaneState::Resting;
        self.overlay = Overlay::Blank;
    }

    /// Clear a previous miss before a new spin, keeping the index
    pub fn clear_overlay(&mut self) {
        if self.is_locked() {
            return;
        }
        self.overlay = Overlay::Blank;
    }

    /// Shuffle tick: jump to an arbitrary tile
    pub fn shuffle_to(&mut self, index: usize) {
        if self.is_locked() {
            return;
        }
        self.displayed_index = index.min(self.range.len() - 1);
        self.state = LaneState::Shuffling;
    }

    /// Settle on `value`; lock if it equals the guess. Returns true on a hit.
    pub fn settle(&mut self, value: u32, guess: u32) -> bool {
        if self.is_locked() {
            return false;
        }
        if value == guess {
            self.lock(value);
            return true;
        }
        if let Some(index) = self.range.index_of(value) {
            self.displayed_index = index;
        }
        self.state = LaneState::Resting;
        self.overlay = Overlay::Miss;
        false
    }

    /// Overlay text ("", the matched value, or the miss glyph)
    pub fn overlay_text(&self) -> String {
        match self.overlay {
            Overlay::Blank => String::new(),
            Overlay::Hit(value) => value.to_string(),
            Overlay::Miss => MISS_GLYPH.to_string(),
        }
    }

    pub fn snapshot(&self) -> LaneSnapshot {
        LaneSnapshot {
            displayed_index: self.displayed_index,
            displayed_value: self.displayed_value(),
            locked: self.is_locked(),
            shuffling: self.state == LaneState::Shuffling,
            overlay_text: self.overlay_text(),
            overlay_hit: matches!(self.overlay, Overlay::Hit(_)),
            overlay_miss: self.overlay == Overlay::Miss,
            lane_miss: self.overlay == Overlay::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DRAW_RANGE;

    #[test]
    fn test_hit_locks_lane() {
        let mut lane = RollerLane::new(0, DRAW_RANGE);
        lane.shuffle_to(17);
        assert_eq!(lane.state(), LaneState::Shuffling);

        assert!(lane.settle(145, 145));
        assert_eq!(lane.state(), LaneState::Locked { value: 145 });
        assert_eq!(lane.displayed_value(), 145);
        assert_eq!(lane.overlay_text(), "145");
    }

    #[test]
    fn test_miss_stays_unlocked() {
        let mut lane = RollerLane::new(0, DRAW_RANGE);
        lane.shuffle_to(3);
        assert!(!lane.settle(123, 145));
        assert_eq!(lane.state(), LaneState::Resting);
        assert_eq!(lane.displayed_value(), 123);
        assert_eq!(lane.overlay_text(), "X");
        assert!(lane.snapshot().lane_miss);

        lane.clear_overlay();
        assert_eq!(lane.overlay(), Overlay::Blank);
        assert_eq!(lane.displayed_value(), 123);
    }

    #[test]
    fn test_locked_is_terminal() {
        let mut lane = RollerLane::new(0, DRAW_RANGE);
        lane.lock(150);

        lane.shuffle_to(0);
        lane.reset();
        lane.clear_overlay();
        assert!(!lane.settle(150, 150));
        assert!(!lane.settle(120, 145));
        lane.lock(160);

        assert_eq!(lane.state(), LaneState::Locked { value: 150 });
        assert_eq!(lane.displayed_value(), 150);
        assert_eq!(lane.overlay(), Overlay::Hit(150));
    }

    #[test]
    fn test_shuffle_index_clamped() {
        let mut lane = RollerLane::new(0, DRAW_RANGE);
        lane.shuffle_to(1000);
        assert_eq!(lane.displayed_index(), 99);
    }
}
