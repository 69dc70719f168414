//! Spin controller
//!
//! Owns the 7 lanes, the RNG and the timers of the current spin. Time only
//! moves through `advance`, which the browser feeds from its animation
//! frame loop and tests feed directly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::lane::RollerLane;
use super::state::{DrawEvent, DrawSnapshot, MatchedBitmap, SpinPhase, TargetSet};
use super::timer::SpinTimers;
use crate::consts::{DRAW_RANGE, ROLLERS_COUNT};
use crate::error::DrawError;
use crate::input::parse_guess;
use crate::persistence::{DrawStore, KeyValueStore, Loaded};
use crate::settings::DrawSettings;

/// The spin in flight
#[derive(Debug, Clone)]
struct ActiveSpin {
    id: u64,
    guess: u32,
    targets: TargetSet,
    /// Stored flags read at spin start; new hits are added at settle
    matched: MatchedBitmap,
}

pub struct SpinController<S> {
    store: DrawStore<S>,
    settings: DrawSettings,
    lanes: Vec<RollerLane>,
    rng: Pcg32,
    phase: SpinPhase,
    timers: SpinTimers,
    active: Option<ActiveSpin>,
    last_spin_id: Option<u64>,
    next_spin_id: u64,
    events: Vec<DrawEvent>,
}

impl<S: KeyValueStore> SpinController<S> {
    /// Build the lanes and show whatever was matched in earlier sessions
    pub fn new(store: S, settings: DrawSettings, seed: u64) -> Self {
        let mut controller = Self {
            store: DrawStore::new(store),
            settings,
            lanes: (0..ROLLERS_COUNT)
                .map(|id| RollerLane::new(id, DRAW_RANGE))
                .collect(),
            rng: Pcg32::seed_from_u64(seed),
            phase: SpinPhase::Idle,
            timers: SpinTimers::default(),
            active: None,
            last_spin_id: None,
            next_spin_id: 1,
            events: Vec::new(),
        };
        controller.apply_matched_state();
        controller
    }

    /// Lock lanes matched in storage, reset the rest to the top tile
    pub fn apply_matched_state(&mut self) {
        let Loaded::Present(targets) = self.store.load_targets() else {
            log::info!("No target numbers configured yet");
            return;
        };
        let matched = self.store.load_matched().unwrap_or_default();

        for (i, lane) in self.lanes.iter_mut().enumerate() {
            if matched.is_matched(i) {
                lane.lock(targets.get(i));
            } else {
                lane.reset();
            }
        }
        log::info!("Loaded draw, {} of {} lanes matched", matched.count(), ROLLERS_COUNT);
    }

    /// Spin with the raw text of the guess field
    pub fn spin(&mut self, raw_guess: &str) -> Result<u64, DrawError> {
        let guess = parse_guess(raw_guess, DRAW_RANGE)?;
        self.spin_guess(guess as i64)
    }

    /// Spin from the page controls (button or Enter).
    ///
    /// Ignored with `Ok(None)` while a spin is shuffling, so a double click
    /// never restarts the draw.
    pub fn trigger(&mut self, raw_guess: &str) -> Result<Option<u64>, DrawError> {
        if !self.trigger_enabled() {
            log::debug!("Trigger ignored, spin in progress");
            return Ok(None);
        }
        self.spin(raw_guess).map(Some)
    }

    /// Spin with an already parsed guess.
    ///
    /// Validation happens before anything changes; on error no lane, timer
    /// or stored value is touched. A spin already in flight is cancelled.
    pub fn spin_guess(&mut self, guess: i64) -> Result<u64, DrawError> {
        if !DRAW_RANGE.contains(guess) {
            return Err(DrawError::GuessOutOfRange {
                value: guess,
                min: DRAW_RANGE.min,
                max: DRAW_RANGE.max,
            });
        }
        let guess = guess as u32;

        let targets = self.store.load_targets().present().ok_or(DrawError::NotConfigured {
            min: DRAW_RANGE.min,
            max: DRAW_RANGE.max,
        })?;
        let matched = self.store.load_matched().unwrap_or_default();

        if self.timers.cancel() {
            if let Some(previous) = self.active.take() {
                log::info!("Spin {} cancelled by a new spin", previous.id);
                self.events.push(DrawEvent::SpinCancelled { spin_id: previous.id });
            }
        }

        // Stored matches and in-session locks both stay locked
        for (i, lane) in self.lanes.iter_mut().enumerate() {
            if matched.is_matched(i) || lane.is_locked() {
                lane.lock(targets.get(i));
            } else {
                lane.clear_overlay();
            }
        }

        let id = self.next_spin_id;
        self.next_spin_id += 1;
        self.timers = SpinTimers::start(self.settings.shuffle_tick_ms, self.settings.spin_duration_ms);
        self.phase = SpinPhase::Shuffling;
        self.active = Some(ActiveSpin {
            id,
            guess,
            targets,
            matched,
        });
        self.events.push(DrawEvent::SpinStarted { spin_id: id });
        log::info!("Spin {} started with guess {}", id, guess);

        Ok(id)
    }

    /// Move time forward by `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.timers.is_active() {
            return;
        }

        let fires = self.timers.advance(elapsed_ms);
        for _ in 0..fires.shuffle_ticks {
            self.shuffle_tick();
        }
        if fires.settle {
            self.settle();
        }
    }

    fn shuffle_tick(&mut self) {
        for lane in self.lanes.iter_mut().filter(|l| !l.is_locked()) {
            let index = self.rng.random_range(0..DRAW_RANGE.len());
            lane.shuffle_to(index);
        }
    }

    fn settle(&mut self) {
        let Some(spin) = self.active.take() else {
            return;
        };

        let mut matched = spin.matched;
        let mut hits = 0;
        for (i, lane) in self.lanes.iter_mut().enumerate() {
            if lane.is_locked() {
                continue;
            }
            let value = spin.targets.get(i);
            if lane.settle(value, spin.guess) {
                matched.mark(i);
                hits += 1;
                log::debug!("Lane {} hit {}", i, value);
                self.events.push(DrawEvent::LaneHit {
                    spin_id: spin.id,
                    lane: i,
                    value,
                });
            } else {
                self.events.push(DrawEvent::LaneMiss {
                    spin_id: spin.id,
                    lane: i,
                    value,
                });
            }
        }

        // One write per spin, after every lane is resolved
        if let Err(e) = self.store.save_matched(&matched) {
            log::warn!("Failed to save matched lanes: {}", e);
            self.events.push(DrawEvent::PersistFailed {
                spin_id: spin.id,
                reason: e.to_string(),
            });
        }

        self.phase = SpinPhase::Settled;
        self.last_spin_id = Some(spin.id);
        self.events.push(DrawEvent::SpinSettled {
            spin_id: spin.id,
            hits,
        });
        log::info!(
            "Spin {} settled: {} new hit(s), {} of {} lanes matched",
            spin.id,
            hits,
            matched.count(),
            ROLLERS_COUNT
        );
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Spin button / Enter allowed
    pub fn trigger_enabled(&self) -> bool {
        self.phase != SpinPhase::Shuffling
    }

    pub fn lanes(&self) -> &[RollerLane] {
        &self.lanes
    }

    pub fn store(&self) -> &DrawStore<S> {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut DrawStore<S> {
        &mut self.store
    }

    /// Take queued events (oldest first)
    pub fn drain_events(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> DrawSnapshot {
        DrawSnapshot {
            phase: self.phase,
            trigger_enabled: self.trigger_enabled(),
            spin_id: self.active.as_ref().map(|s| s.id).or(self.last_spin_id),
            lanes: self.lanes.iter().map(RollerLane::snapshot).collect(),
        }
    }
}
