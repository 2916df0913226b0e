//! Per-instance connectivity queries.

use crate::net::NetRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a component terminal is attached to, as answered by the netlist.
///
/// Terminals are identified by index, in the order the component's
/// appearance lays them out.
pub trait Connectivity {
    /// Name of the circuit containing the instance (used in diagnostics).
    fn circuit_name(&self) -> &str;

    /// Whether the whole design runs on one global clock, in which case
    /// clocked components sample the generator's global clock phase
    /// instead of an edge-specific tick.
    fn requires_global_clock(&self) -> bool;

    /// Whether anything is attached to terminal `terminal`.
    fn is_connected(&self, terminal: usize) -> bool;

    /// The net driving (or driven by) `terminal`, if connected.
    fn net(&self, terminal: usize) -> Option<NetRef>;

    /// The bus of the clock generator driving `terminal`, if the terminal
    /// is driven by a recognized clock generator rather than plain logic.
    fn clock_network(&self, terminal: usize) -> Option<String>;
}

/// What drives one terminal in an [`InstanceConnections`] map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TerminalDriver {
    /// A clock generator's bus (`{ clock = "s_clock_bus_0" }`).
    ClockGenerator {
        /// The clock bus name.
        clock: String,
    },
    /// An ordinary net.
    Net(NetRef),
}

/// A plain in-memory [`Connectivity`] for one component instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceConnections {
    circuit: String,
    global_clock: bool,
    drivers: BTreeMap<usize, TerminalDriver>,
}

impl InstanceConnections {
    /// An instance in `circuit` with nothing connected.
    pub fn new(circuit: impl Into<String>) -> Self {
        Self {
            circuit: circuit.into(),
            global_clock: false,
            drivers: BTreeMap::new(),
        }
    }

    /// Sets the design-wide global clock requirement.
    pub fn with_global_clock(mut self, required: bool) -> Self {
        self.global_clock = required;
        self
    }

    /// Connects `terminal` to a net.
    pub fn connect(mut self, terminal: usize, net: NetRef) -> Self {
        self.drivers.insert(terminal, TerminalDriver::Net(net));
        self
    }

    /// Connects `terminal` to a clock generator's bus.
    pub fn connect_clock(mut self, terminal: usize, clock_bus: impl Into<String>) -> Self {
        self.drivers.insert(
            terminal,
            TerminalDriver::ClockGenerator {
                clock: clock_bus.into(),
            },
        );
        self
    }

    /// Connects `terminal` to whatever `driver` describes.
    pub fn attach(&mut self, terminal: usize, driver: TerminalDriver) {
        self.drivers.insert(terminal, driver);
    }
}

impl Connectivity for InstanceConnections {
    fn circuit_name(&self) -> &str {
        &self.circuit
    }

    fn requires_global_clock(&self) -> bool {
        self.global_clock
    }

    fn is_connected(&self, terminal: usize) -> bool {
        self.drivers.contains_key(&terminal)
    }

    fn net(&self, terminal: usize) -> Option<NetRef> {
        match self.drivers.get(&terminal)? {
            TerminalDriver::Net(net) => Some(net.clone()),
            TerminalDriver::ClockGenerator { clock } => Some(NetRef::net(clock.clone())),
        }
    }

    fn clock_network(&self, terminal: usize) -> Option<String> {
        match self.drivers.get(&terminal)? {
            TerminalDriver::ClockGenerator { clock } => Some(clock.clone()),
            TerminalDriver::Net(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconnected_terminal() {
        let conn = InstanceConnections::new("main");
        assert_eq!(conn.circuit_name(), "main");
        assert!(!conn.requires_global_clock());
        assert!(!conn.is_connected(0));
        assert!(conn.net(0).is_none());
        assert!(conn.clock_network(0).is_none());
    }

    #[test]
    fn plain_net() {
        let conn = InstanceConnections::new("main").connect(2, NetRef::net("s_net_7"));
        assert!(conn.is_connected(2));
        assert_eq!(conn.net(2), Some(NetRef::net("s_net_7")));
        assert!(conn.clock_network(2).is_none());
    }

    #[test]
    fn clock_generator() {
        let conn = InstanceConnections::new("main")
            .with_global_clock(true)
            .connect_clock(5, "s_clock_bus_0");
        assert!(conn.requires_global_clock());
        assert_eq!(conn.clock_network(5).as_deref(), Some("s_clock_bus_0"));
        assert_eq!(conn.net(5), Some(NetRef::net("s_clock_bus_0")));
        assert!(!conn.is_connected(4));
    }

    #[test]
    fn driver_deserialize() {
        let clock: TerminalDriver = serde_json::from_str(r#"{"clock":"clk_bus"}"#).unwrap();
        assert!(matches!(clock, TerminalDriver::ClockGenerator { .. }));
        let net: TerminalDriver = serde_json::from_str(r#""s_a""#).unwrap();
        assert_eq!(net, TerminalDriver::Net(NetRef::net("s_a")));
    }
}
