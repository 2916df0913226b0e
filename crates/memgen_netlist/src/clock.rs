//! Bit layout of the bus produced by a clock generator.

use serde::{Deserialize, Serialize};

/// Which bit of a clock generator's bus carries which clock phase.
///
/// A clock generator drives a small bus rather than a single wire: one bit
/// is the global clock every synchronous element runs on, the others are
/// one-cycle tick strobes marking the rising and falling edges of the
/// simulated (slower) clock. Consumers pick a bit by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockBusLayout {
    /// The global clock phase.
    pub global_clock: u32,
    /// The tick strobe for rising edges of the simulated clock.
    pub rising_tick: u32,
    /// The tick strobe for falling edges of the simulated clock.
    pub falling_tick: u32,
}

impl ClockBusLayout {
    /// Bus index of the global clock.
    pub const GLOBAL_CLOCK_INDEX: u32 = 4;
    /// Bus index of the rising-edge tick.
    pub const POSITIVE_EDGE_TICK_INDEX: u32 = 2;
    /// Bus index of the falling-edge tick.
    pub const NEGATIVE_EDGE_TICK_INDEX: u32 = 3;
}

impl Default for ClockBusLayout {
    fn default() -> Self {
        Self {
            global_clock: Self::GLOBAL_CLOCK_INDEX,
            rising_tick: Self::POSITIVE_EDGE_TICK_INDEX,
            falling_tick: Self::NEGATIVE_EDGE_TICK_INDEX,
        }
    }
}
