//! Whether a RAM instance can be rendered to synthesizable RTL at all.
//!
//! The gate is evaluated once, before planning. An instance that fails it
//! must be skipped entirely and reported; nothing is emitted for it.

use crate::config::{DataBus, RamConfig, ReadPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reason a RAM configuration cannot be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnsupportedReason {
    /// Data and address widths must be in range.
    WidthOutOfRange,
    /// A combined (bidirectional) data bus.
    CombinedBus,
    /// Level-triggered (asynchronous) timing.
    Asynchronous,
    /// Line enables instead of byte enables.
    LineEnables,
    /// Asynchronous reads.
    AsyncRead,
    /// A clear input.
    ClearPin,
    /// A read policy other than read-after-write.
    ReadPolicy,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnsupportedReason::WidthOutOfRange => "data or address width is out of range",
            UnsupportedReason::CombinedBus => "the data bus is bidirectional",
            UnsupportedReason::Asynchronous => "the RAM is level triggered",
            UnsupportedReason::LineEnables => "the RAM uses line enables",
            UnsupportedReason::AsyncRead => "the RAM reads asynchronously",
            UnsupportedReason::ClearPin => "the RAM has a clear pin",
            UnsupportedReason::ReadPolicy => "the read policy is not read-after-write",
        };
        f.write_str(text)
    }
}

/// Lists every reason `cfg` cannot be generated, in a fixed order.
pub fn unsupported_reasons(cfg: &RamConfig) -> Vec<UnsupportedReason> {
    let checks = [
        (
            cfg.data_width == 0
                || cfg.data_width > RamConfig::MAX_DATA_WIDTH
                || cfg.address_width == 0
                || cfg.address_width > RamConfig::MAX_ADDRESS_WIDTH,
            UnsupportedReason::WidthOutOfRange,
        ),
        (cfg.bus != DataBus::Separate, UnsupportedReason::CombinedBus),
        (cfg.is_asynchronous(), UnsupportedReason::Asynchronous),
        (cfg.line_enables != 0, UnsupportedReason::LineEnables),
        (cfg.async_read, UnsupportedReason::AsyncRead),
        (cfg.clear_pin, UnsupportedReason::ClearPin),
        (
            cfg.read_policy != ReadPolicy::ReadAfterWrite,
            UnsupportedReason::ReadPolicy,
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(failed, reason)| failed.then_some(reason))
        .collect()
}

/// `true` iff the RAM can be generated.
pub fn is_supported(cfg: &RamConfig) -> bool {
    unsupported_reasons(cfg).is_empty()
}
