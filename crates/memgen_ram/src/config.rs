//! The attributes of one RAM instance and the lane partitioning derived from them.

use serde::{Deserialize, Serialize};

/// When the RAM samples its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// On the rising edge of the clock.
    RisingEdge,
    /// On the falling edge of the clock.
    FallingEdge,
    /// Transparent while the clock input is high.
    HighLevel,
    /// Transparent while the clock input is low.
    LowLevel,
}

impl Trigger {
    /// Level-triggered memories have no clock edge and are asynchronous.
    pub fn is_level(self) -> bool {
        matches!(self, Trigger::HighLevel | Trigger::LowLevel)
    }
}

/// How data enters and leaves the RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataBus {
    /// Separate data-in and data-out buses.
    Separate,
    /// One bidirectional bus.
    Combined,
}

/// What a read returns when it hits the address written in the same cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadPolicy {
    /// The newly written value.
    ReadAfterWrite,
    /// The value held before the write.
    ReadBeforeWrite,
}

/// The bits of the memory word one lane covers (`high` downto `low`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneSlice {
    /// The lane number, counted from the least significant byte.
    pub lane: u32,
    /// The lowest bit of the word in this lane.
    pub low: u32,
    /// The highest bit of the word in this lane.
    pub high: u32,
}

impl LaneSlice {
    /// The number of bits in the lane.
    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }
}

/// Snapshot of one RAM instance's attributes.
///
/// Every derived quantity (lane count, raggedness, lane slices, entry
/// count) is computed from these fields, so two components looking at the
/// same configuration always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RamConfig {
    /// Bits per memory word.
    pub data_width: u32,
    /// Bits of address; the RAM holds `2^address_width` words.
    pub address_width: u32,
    /// When inputs are sampled.
    pub trigger: Trigger,
    /// Whether each byte of the word has its own enable input.
    pub byte_enables: bool,
    /// Number of line (level) enable inputs; only zero is synthesizable.
    pub line_enables: u32,
    /// Data bus topology.
    pub bus: DataBus,
    /// Whether the RAM has a clear input.
    pub clear_pin: bool,
    /// Same-cycle read/write behavior.
    pub read_policy: ReadPolicy,
    /// Whether reads bypass the clock.
    pub async_read: bool,
}

impl RamConfig {
    /// Largest supported address width.
    pub const MAX_ADDRESS_WIDTH: u32 = 24;
    /// Largest supported word width.
    pub const MAX_DATA_WIDTH: u32 = 64;
    /// Width of one byte lane.
    pub const LANE_WIDTH: u32 = 8;

    /// A rising-edge RAM with separate buses, read-after-write behavior and
    /// no byte enables.
    pub fn new(data_width: u32, address_width: u32) -> Self {
        Self {
            data_width,
            address_width,
            trigger: Trigger::RisingEdge,
            byte_enables: false,
            line_enables: 0,
            bus: DataBus::Separate,
            clear_pin: false,
            read_policy: ReadPolicy::ReadAfterWrite,
            async_read: false,
        }
    }

    /// Sets the trigger policy.
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Turns byte enables on or off.
    pub fn with_byte_enables(mut self, byte_enables: bool) -> Self {
        self.byte_enables = byte_enables;
        self
    }

    /// Sets the data bus topology.
    pub fn with_bus(mut self, bus: DataBus) -> Self {
        self.bus = bus;
        self
    }

    /// Sets the read policy.
    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    /// Adds or removes the clear input.
    pub fn with_clear_pin(mut self, clear_pin: bool) -> Self {
        self.clear_pin = clear_pin;
        self
    }

    /// Level-triggered RAMs are asynchronous.
    pub fn is_asynchronous(&self) -> bool {
        self.trigger.is_level()
    }

    /// Number of independently enabled lanes; 1 without byte enables.
    pub fn lane_count(&self) -> u32 {
        if self.byte_enables {
            self.data_width.div_ceil(Self::LANE_WIDTH)
        } else {
            1
        }
    }

    /// Whether the top lane is narrower than a byte.
    pub fn is_ragged(&self) -> bool {
        self.byte_enables && self.data_width % Self::LANE_WIDTH != 0
    }

    /// Width of the top byte lane.
    pub fn last_lane_width(&self) -> u32 {
        if self.is_ragged() {
            self.data_width % Self::LANE_WIDTH
        } else {
            Self::LANE_WIDTH
        }
    }

    /// Number of words in the memory.
    pub fn entry_count(&self) -> u32 {
        1u32 << self.address_width
    }

    /// The bit range of `lane`.
    ///
    /// Without byte enables the single lane spans the whole word.
    pub fn lane_slice(&self, lane: u32) -> LaneSlice {
        if !self.byte_enables {
            return LaneSlice {
                lane,
                low: 0,
                high: self.data_width - 1,
            };
        }
        let low = lane * Self::LANE_WIDTH;
        let width = if lane + 1 == self.lane_count() {
            self.last_lane_width()
        } else {
            Self::LANE_WIDTH
        };
        LaneSlice {
            lane,
            low,
            high: low + width - 1,
        }
    }

    /// All lane slices, lowest lane first.
    pub fn lane_slices(&self) -> Vec<LaneSlice> {
        (0..self.lane_count()).map(|lane| self.lane_slice(lane)).collect()
    }
}
