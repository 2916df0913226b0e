//! Terminal indices of a RAM instance in its parent circuit.
//!
//! The simulator numbers a component's terminals in a fixed order. The
//! port binder asks the netlist about terminals by these indices.

use crate::config::RamConfig;
use serde::{Deserialize, Serialize};

/// Where each RAM terminal sits in the instance's terminal list.
///
/// Byte-enable terminals are numbered from the most significant lane down:
/// external `byte_enable0` is the first terminal at `byte_enable_base` and
/// drives the top lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalLayout {
    /// Address bus.
    pub address: usize,
    /// Write data bus.
    pub data_in: usize,
    /// Read data bus.
    pub data_out: usize,
    /// Write enable.
    pub write_enable: usize,
    /// Output enable.
    pub output_enable: usize,
    /// Clock input, absent on level-triggered RAMs.
    pub clock: Option<usize>,
    /// First byte-enable terminal, absent without byte enables.
    pub byte_enable_base: Option<usize>,
    /// Number of byte-enable terminals.
    pub byte_enable_count: u32,
}

impl TerminalLayout {
    /// Lays out the terminals of a RAM configured as `cfg`.
    pub fn for_config(cfg: &RamConfig) -> Self {
        let mut next = 5;
        let clock = (!cfg.is_asynchronous()).then(|| {
            next += 1;
            next - 1
        });
        let (byte_enable_base, byte_enable_count) = if cfg.byte_enables {
            (Some(next), cfg.lane_count())
        } else {
            (None, 0)
        };
        Self {
            address: 0,
            data_in: 1,
            data_out: 2,
            write_enable: 3,
            output_enable: 4,
            clock,
            byte_enable_base,
            byte_enable_count,
        }
    }

    /// The terminal of internal byte lane `lane`.
    ///
    /// `None` without byte enables or when `lane` is out of range.
    pub fn byte_enable_terminal(&self, lane: u32) -> Option<usize> {
        let base = self.byte_enable_base?;
        (lane < self.byte_enable_count).then(|| byte_enable_terminal(base, self.byte_enable_count, lane))
    }

    /// Resolves a configuration-file terminal name to its index.
    ///
    /// Accepts `address`, `data_in`, `data_out`, `we`, `oe`, `clock` and
    /// `byte_enable<k>`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        match name {
            "address" => Some(self.address),
            "data_in" => Some(self.data_in),
            "data_out" => Some(self.data_out),
            "we" => Some(self.write_enable),
            "oe" => Some(self.output_enable),
            "clock" => self.clock,
            _ => {
                let k: u32 = name.strip_prefix("byte_enable")?.parse().ok()?;
                let base = self.byte_enable_base?;
                (k < self.byte_enable_count).then_some(base + k as usize)
            }
        }
    }

    /// Every accepted terminal name with its index, in index order.
    pub fn names(&self) -> Vec<(String, usize)> {
        let mut names: Vec<(String, usize)> = [
            ("address", self.address),
            ("data_in", self.data_in),
            ("data_out", self.data_out),
            ("we", self.write_enable),
            ("oe", self.output_enable),
        ]
        .into_iter()
        .map(|(name, index)| (name.to_string(), index))
        .collect();
        if let Some(clock) = self.clock {
            names.push(("clock".to_string(), clock));
        }
        if let Some(base) = self.byte_enable_base {
            names.extend((0..self.byte_enable_count).map(|k| (format!("byte_enable{k}"), base + k as usize)));
        }
        names
    }
}

/// Terminal index of internal lane `lane` among `lane_count` byte-enable
/// terminals starting at `offset`; terminals run from the top lane down.
pub fn byte_enable_terminal(offset: usize, lane_count: u32, lane: u32) -> usize {
    offset + (lane_count - lane - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Trigger;
    use quickcheck_macros::quickcheck;

    #[test]
    fn plain_layout() {
        let layout = TerminalLayout::for_config(&RamConfig::new(8, 4));
        assert_eq!(layout.clock, Some(5));
        assert_eq!(layout.byte_enable_base, None);
        assert_eq!(layout.names().len(), 6);
        assert_eq!(layout.index_of("we"), Some(3));
        assert_eq!(layout.index_of("byte_enable0"), None);
    }

    #[test]
    fn byte_enables_follow_clock() {
        let layout = TerminalLayout::for_config(&RamConfig::new(32, 4).with_byte_enables(true));
        assert_eq!(layout.byte_enable_base, Some(6));
        assert_eq!(layout.byte_enable_count, 4);
        assert_eq!(layout.index_of("byte_enable3"), Some(9));
        assert_eq!(layout.index_of("byte_enable4"), None);
        assert_eq!(layout.byte_enable_terminal(0), Some(9));
        assert_eq!(layout.byte_enable_terminal(3), Some(6));
        assert_eq!(layout.names().len(), 10);
    }

    #[test]
    fn level_triggered_has_no_clock() {
        let layout = TerminalLayout::for_config(&RamConfig::new(16, 4).with_trigger(Trigger::HighLevel).with_byte_enables(true));
        assert_eq!(layout.clock, None);
        assert_eq!(layout.byte_enable_base, Some(5));
        assert_eq!(layout.index_of("clock"), None);
    }

    #[test]
    fn names_resolve_to_themselves() {
        let layout = TerminalLayout::for_config(&RamConfig::new(12, 2).with_byte_enables(true));
        for (name, index) in layout.names() {
            assert_eq!(layout.index_of(&name), Some(index), "{name}");
        }
        assert!(layout.index_of("byte_enablex").is_none());
        assert!(layout.index_of("clear").is_none());
    }

    #[test]
    fn reversed_lane_mapping() {
        assert_eq!(byte_enable_terminal(6, 2, 0), 7);
        assert_eq!(byte_enable_terminal(6, 2, 1), 6);
    }

    #[quickcheck]
    fn lane_mapping_is_a_bijection(offset: u8, lanes: u8) -> bool {
        let lanes = u32::from(lanes % 8) + 1;
        let offset = usize::from(offset);
        let mut seen: Vec<usize> = (0..lanes).map(|lane| byte_enable_terminal(offset, lanes, lane)).collect();
        seen.sort_unstable();
        seen == (offset..offset + lanes as usize).collect::<Vec<_>>()
    }
}
