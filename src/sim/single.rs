//! Single roller guessing game
//!
//! One lane over 1-99 that lands on a random number. Same timer pattern as
//! the draw controller, but nothing is stored and nothing locks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::timer::{SpinTimers, Timeout};
use crate::consts::SINGLE_RANGE;
use crate::error::DrawError;
use crate::input::parse_guess;
use crate::settings::DrawSettings;

/// Styling of the message line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleEvent {
    Started,
    Settled { result: u32, won: bool },
    ConfettiStart,
    ConfettiEnd,
}

/// What the single roller page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSnapshot {
    pub displayed_index: usize,
    pub message: Option<Message>,
    pub confetti_active: bool,
    pub trigger_enabled: bool,
}

pub struct SingleRoller {
    spin_duration_ms: u32,
    shuffle_tick_ms: u32,
    confetti_ms: u32,
    rng: Pcg32,
    displayed_index: usize,
    timers: SpinTimers,
    guess: Option<u32>,
    message: Option<Message>,
    confetti: Option<Timeout>,
    events: Vec<SingleEvent>,
}

impl SingleRoller {
    pub fn new(settings: &DrawSettings, seed: u64) -> Self {
        Self {
            spin_duration_ms: settings.single_spin_duration_ms,
            shuffle_tick_ms: settings.single_shuffle_tick_ms,
            confetti_ms: settings.confetti_ms,
            rng: Pcg32::seed_from_u64(seed),
            displayed_index: 0,
            timers: SpinTimers::default(),
            guess: None,
            message: None,
            confetti: None,
            events: Vec::new(),
        }
    }

    /// Start a round with the raw guess text
    pub fn play(&mut self, raw_guess: &str) -> Result<(), DrawError> {
        let guess = match parse_guess(raw_guess, SINGLE_RANGE) {
            Ok(guess) => guess,
            Err(e) => {
                self.message = Some(Message {
                    text: e.to_string(),
                    kind: MessageKind::Error,
                });
                return Err(e);
            }
        };

        self.message = None;
        self.timers.cancel();
        self.timers = SpinTimers::start(self.shuffle_tick_ms, self.spin_duration_ms);
        self.guess = Some(guess);
        self.events.push(SingleEvent::Started);
        log::info!("Single roller started with guess {}", guess);
        Ok(())
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        if let Some(confetti) = self.confetti.as_mut() {
            if confetti.advance(elapsed_ms) {
                self.confetti = None;
                self.events.push(SingleEvent::ConfettiEnd);
            }
        }

        if !self.timers.is_active() {
            return;
        }
        let fires = self.timers.advance(elapsed_ms);
        for _ in 0..fires.shuffle_ticks {
            self.displayed_index = self.rng.random_range(0..SINGLE_RANGE.len());
        }
        if fires.settle {
            self.settle();
        }
    }

    fn settle(&mut self) {
        let Some(guess) = self.guess.take() else {
            return;
        };

        let result = self.rng.random_range(SINGLE_RANGE.min..=SINGLE_RANGE.max);
        self.displayed_index = (result - SINGLE_RANGE.min) as usize;

        let won = result == guess;
        self.message = Some(if won {
            Message {
                text: format!("Congratulations! You guessed {} correctly!", result),
                kind: MessageKind::Success,
            }
        } else {
            Message {
                text: format!("Try again! The roller stopped at {}.", result),
                kind: MessageKind::Error,
            }
        });
        self.events.push(SingleEvent::Settled { result, won });

        if won {
            self.confetti = Some(Timeout::new(self.confetti_ms));
            self.events.push(SingleEvent::ConfettiStart);
        }
        log::info!("Single roller stopped at {} (guess {})", result, guess);
    }

    pub fn is_spinning(&self) -> bool {
        self.timers.is_active()
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_spinning()
    }

    pub fn displayed_index(&self) -> usize {
        self.displayed_index
    }

    pub fn displayed_value(&self) -> u32 {
        SINGLE_RANGE.value_at(self.displayed_index)
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn confetti_active(&self) -> bool {
        self.confetti.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<SingleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SingleSnapshot {
        SingleSnapshot {
            displayed_index: self.displayed_index,
            message: self.message.clone(),
            confetti_active: self.confetti_active(),
            trigger_enabled: self.trigger_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_for(roller: &mut SingleRoller, ms: u32) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(16);
            roller.advance(step);
            remaining -= step;
        }
    }

    #[test]
    fn test_rejects_bad_guess_without_spinning() {
        let mut roller = SingleRoller::new(&DrawSettings::default(), 1);
        assert!(roller.play("0").is_err());
        assert_eq!(
            roller.message().map(|m| m.kind),
            Some(MessageKind::Error)
        );
        assert!(roller.play("abc").is_err());
        assert!(!roller.is_spinning());
        run_for(&mut roller, 5_000);
        assert!(roller.drain_events().is_empty());
    }

    #[test]
    fn test_round_settles_once() {
        let mut roller = SingleRoller::new(&DrawSettings::default(), 1);
        roller.play("50").unwrap();
        assert!(roller.message().is_none());
        assert!(!roller.trigger_enabled());

        run_for(&mut roller, 4_000);
        assert!(roller.trigger_enabled());

        let events = roller.drain_events();
        let settled: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SingleEvent::Settled { result, won } => Some((*result, *won)),
                _ => None,
            })
            .collect();
        assert_eq!(settled.len(), 1);
        let (result, won) = settled[0];
        assert_eq!(roller.displayed_value(), result);
        assert_eq!(won, result == 50);

        let message = roller.message().unwrap();
        if won {
            assert_eq!(message.kind, MessageKind::Success);
        } else {
            assert_eq!(message.text, format!("Try again! The roller stopped at {}.", result));
        }
    }

    #[test]
    fn test_replay_cancels_previous_round() {
        let mut roller = SingleRoller::new(&DrawSettings::default(), 9);
        roller.play("10").unwrap();
        run_for(&mut roller, 3_000);
        roller.play("20").unwrap();
        run_for(&mut roller, 3_000);
        assert!(roller.is_spinning());
        run_for(&mut roller, 1_000);
        let settles = roller
            .drain_events()
            .iter()
            .filter(|e| matches!(e, SingleEvent::Settled { .. }))
            .count();
        assert_eq!(settles, 1);
    }

    #[test]
    fn test_confetti_on_win() {
        // Find a seed whose first round lands on the guess
        let settings = DrawSettings::default();
        let mut roller = (0..3_000u64)
            .find_map(|seed| {
                let mut roller = SingleRoller::new(&settings, seed);
                roller.play("7").unwrap();
                run_for(&mut roller, 4_000);
                (roller.displayed_value() == 7).then_some(roller)
            })
            .expect("some seed should hit 7");

        assert!(roller.confetti_active());
        assert_eq!(
            roller.message().map(|m| m.text.as_str()),
            Some("Congratulations! You guessed 7 correctly!")
        );
        run_for(&mut roller, 1_200);
        assert!(!roller.confetti_active());
        assert!(roller.drain_events().contains(&SingleEvent::ConfettiEnd));
    }

    #[test]
    fn test_snapshot_tracks_round() {
        let mut roller = SingleRoller::new(&DrawSettings::default(), 3);
        let idle = roller.snapshot();
        assert_eq!(idle.displayed_index, 0);
        assert!(idle.trigger_enabled);
        assert_eq!(idle.message, None);

        roller.play("50").unwrap();
        run_for(&mut roller, 70);
        let spinning = roller.snapshot();
        assert!(!spinning.trigger_enabled);
        assert_ne!(spinning, idle);

        // Nothing moves between shuffle ticks
        roller.advance(0);
        assert_eq!(roller.snapshot(), spinning);

        run_for(&mut roller, 3_930);
        let settled = roller.snapshot();
        assert!(settled.trigger_enabled);
        assert_eq!(settled.displayed_index, roller.displayed_index());
        assert!(settled.message.is_some());
    }
}
