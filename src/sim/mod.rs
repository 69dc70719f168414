//! Draw simulation module
//!
//! All roller logic lives here. This module must stay free of DOM code:
//! - Time advances only through `advance(elapsed_ms)`
//! - Seeded RNG only
//! - Storage goes through `KeyValueStore`

pub mod controller;
pub mod lane;
pub mod single;
pub mod state;
pub mod timer;

pub use controller::SpinController;
pub use lane::{LaneState, Overlay, RollerLane};
pub use single::{Message, MessageKind, SingleEvent, SingleRoller, SingleSnapshot};
pub use state::{
    DrawEvent, DrawSnapshot, LaneSnapshot, MatchedBitmap, SpinPhase, TargetSet,
};
pub use timer::{Interval, SpinTimers, Timeout, TimerFires};
