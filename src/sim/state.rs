//! Draw state and core types
//!
//! Everything the controller persists or reports lives here.

use serde::{Deserialize, Serialize};

use crate::consts::{DRAW_RANGE, ROLLERS_COUNT};

/// The 7 predetermined numbers a draw reveals, one per lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetSet([u32; ROLLERS_COUNT]);

impl TargetSet {
    /// Build a target set (None if any value is outside the draw range)
    pub fn new(values: [u32; ROLLERS_COUNT]) -> Option<Self> {
        values
            .iter()
            .all(|&v| DRAW_RANGE.contains(v as i64))
            .then_some(Self(values))
    }

    /// Target for a lane
    #[inline]
    pub fn get(&self, lane: usize) -> u32 {
        self.0[lane]
    }

    pub fn values(&self) -> &[u32; ROLLERS_COUNT] {
        &self.0
    }
}

/// Which lanes have permanently matched, aligned with `TargetSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchedBitmap([bool; ROLLERS_COUNT]);

impl MatchedBitmap {
    #[inline]
    pub fn is_matched(&self, lane: usize) -> bool {
        self.0[lane]
    }

    /// Set a lane as matched (never cleared in-session)
    pub fn mark(&mut self, lane: usize) {
        self.0[lane] = true;
    }

    pub fn flags(&self) -> &[bool; ROLLERS_COUNT] {
        &self.0
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&m| m).count()
    }
}

impl From<[bool; ROLLERS_COUNT]> for MatchedBitmap {
    fn from(flags: [bool; ROLLERS_COUNT]) -> Self {
        Self(flags)
    }
}

/// Current phase of the spin controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    /// No spin has run yet this session
    #[default]
    Idle,
    /// Timers running, unlocked lanes shuffling
    Shuffling,
    /// Last spin resolved
    Settled,
}

/// Things the front end reacts to (sound, view refresh, messages)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawEvent {
    /// A spin started; trigger should be disabled
    SpinStarted { spin_id: u64 },
    /// A running spin was replaced before it settled
    SpinCancelled { spin_id: u64 },
    /// Lane matched the guess and locked
    LaneHit { spin_id: u64, lane: usize, value: u32 },
    /// Lane missed the guess
    LaneMiss { spin_id: u64, lane: usize, value: u32 },
    /// Spin resolved; trigger can be re-enabled
    SpinSettled { spin_id: u64, hits: usize },
    /// Matched flags could not be written (session view is still correct)
    PersistFailed { spin_id: u64, reason: String },
}

/// Read-only view of one lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSnapshot {
    pub displayed_index: usize,
    pub displayed_value: u32,
    pub locked: bool,
    pub shuffling: bool,
    pub overlay_text: String,
    pub overlay_hit: bool,
    pub overlay_miss: bool,
    pub lane_miss: bool,
}

/// Read-only view of the whole draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSnapshot {
    pub phase: SpinPhase,
    pub trigger_enabled: bool,
    pub spin_id: Option<u64>,
    pub lanes: Vec<LaneSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_set_range_check() {
        assert!(TargetSet::new([101, 123, 145, 167, 178, 189, 199]).is_some());
        assert!(TargetSet::new([99, 123, 145, 167, 178, 189, 199]).is_none());
        assert!(TargetSet::new([101, 123, 145, 167, 178, 189, 200]).is_none());

        let targets = TargetSet::new([101, 123, 145, 167, 178, 189, 199]).unwrap();
        assert_eq!(targets.get(2), 145);
    }

    #[test]
    fn test_matched_bitmap() {
        let mut matched = MatchedBitmap::default();
        assert_eq!(matched.count(), 0);
        matched.mark(3);
        matched.mark(3);
        assert!(matched.is_matched(3));
        assert_eq!(matched.count(), 1);
    }
}
