//! What each port of a generated component is wired to in its parent circuit.

use crate::net::NetRef;
use memgen_common::LogicVec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The right-hand side of one port-map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindTarget {
    /// A net of the parent circuit.
    Net {
        /// The net.
        net: NetRef,
    },
    /// A constant tie-off.
    Constant {
        /// The constant value, as wide as the port.
        value: LogicVec,
    },
    /// Left unconnected (outputs only).
    Open,
    /// One phase of a clock generator's bus.
    ClockPhase {
        /// The clock bus name.
        bus: String,
        /// The bus bit carrying the phase.
        index: u32,
    },
}

impl BindTarget {
    /// Binds to `net`.
    pub fn net(net: NetRef) -> Self {
        BindTarget::Net { net }
    }

    /// Ties to `value`.
    pub fn constant(value: LogicVec) -> Self {
        BindTarget::Constant { value }
    }

    /// Binds to bit `index` of clock bus `bus`.
    pub fn clock_phase(bus: impl Into<String>, index: u32) -> Self {
        BindTarget::ClockPhase {
            bus: bus.into(),
            index,
        }
    }
}

/// One port-map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    /// The component port.
    pub port: String,
    /// What it is wired to.
    pub target: BindTarget,
}

/// The complete port map of one instance, ordered by port name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTable {
    entries: BTreeMap<String, BindTarget>,
}

impl BindingTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `port`, replacing any earlier binding of the same port.
    pub fn insert(&mut self, port: impl Into<String>, target: BindTarget) {
        self.entries.insert(port.into(), target);
    }

    /// The binding of `port`.
    pub fn get(&self, port: &str) -> Option<&BindTarget> {
        self.entries.get(port)
    }

    /// Number of bound ports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no port is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All bindings in port-name order.
    pub fn iter(&self) -> impl Iterator<Item = PortBinding> + '_ {
        self.entries.iter().map(|(port, target)| PortBinding {
            port: port.clone(),
            target: target.clone(),
        })
    }

    /// The clock-bus bit selected for `tick_port`, when it is driven by a
    /// clock generator.
    pub fn tick_phase(&self, tick_port: &str) -> Option<u32> {
        match self.entries.get(tick_port)? {
            BindTarget::ClockPhase { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_port_name() {
        let mut table = BindingTable::new();
        table.insert("WE", BindTarget::net(NetRef::net("s_we")));
        table.insert("Address", BindTarget::constant(LogicVec::all_zero(4)));
        table.insert("DataOut", BindTarget::Open);
        let ports: Vec<String> = table.iter().map(|b| b.port).collect();
        assert_eq!(ports, ["Address", "DataOut", "WE"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn tick_phase_only_for_clock_bus() {
        let mut table = BindingTable::new();
        table.insert("Tick", BindTarget::clock_phase("s_clock_bus_0", 2));
        assert_eq!(table.tick_phase("Tick"), Some(2));
        table.insert("Tick", BindTarget::constant(LogicVec::from_bool(true)));
        assert_eq!(table.tick_phase("Tick"), None);
        assert_eq!(table.tick_phase("Clock"), None);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(BindTarget::clock_phase("clk", 4)).unwrap();
        assert_eq!(json["kind"], "clock_phase");
        assert_eq!(json["index"], 4);
    }
}
