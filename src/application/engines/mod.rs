//! Engines - stateful owners of snapshot history.
//!
//! Each engine wraps a pure calculator, keeps every snapshot it computes,
//! publishes an update event per calculation and builds reports on demand.

mod business_engine;
mod effectiveness_engine;

pub use business_engine::{BusinessEngine, SharedBusinessEngine};
pub use effectiveness_engine::{EffectivenessEngine, SharedEffectivenessEngine};

/// Default evaluation window in days.
pub const DEFAULT_TIME_WINDOW_DAYS: u32 = 30;
