//! Application layer - engines that coordinate calculators, history and ports.

pub mod engines;

pub use engines::{
    BusinessEngine, EffectivenessEngine, SharedBusinessEngine, SharedEffectivenessEngine,
    DEFAULT_TIME_WINDOW_DAYS,
};
