//! Wiring a generated RAM into its parent circuit.
//!
//! Data and control ports bind to whatever net drives the matching
//! terminal, with a constant fallback when nothing does. The clock is
//! special: the generated RAM runs on the fast global clock and uses a
//! tick strobe to mark the simulated clock's active edge, so the binder
//! has to pick both a clock source and a tick source.

use crate::codes;
use crate::config::{RamConfig, Trigger};
use crate::layout::TerminalLayout;
use crate::plan::{ports, SignalPlan};
use memgen_common::{GenResult, InternalError, LogicVec};
use memgen_diagnostics::{Diagnostic, DiagnosticSink, Location};
use memgen_netlist::{BindTarget, BindingTable, ClockBusLayout, Connectivity};

/// The clock-bus bit the tick port samples.
///
/// Designs on a single global clock always sample the global phase.
/// Otherwise rising-edge RAMs sample the rising tick and every other
/// trigger the falling tick.
pub fn tick_phase_index(trigger: Trigger, requires_global_clock: bool, layout: &ClockBusLayout) -> u32 {
    if requires_global_clock {
        layout.global_clock
    } else if trigger == Trigger::RisingEdge {
        layout.rising_tick
    } else {
        layout.falling_tick
    }
}

/// Produces the port map of one RAM instance.
#[derive(Debug, Clone, Copy)]
pub struct PortBinder<'a> {
    config: &'a RamConfig,
    plan: &'a SignalPlan,
    layout: TerminalLayout,
    clock_bus: ClockBusLayout,
}

impl<'a> PortBinder<'a> {
    /// A binder for a RAM configured as `config` and planned as `plan`.
    pub fn new(config: &'a RamConfig, plan: &'a SignalPlan, clock_bus: ClockBusLayout) -> Self {
        Self {
            config,
            plan,
            layout: TerminalLayout::for_config(config),
            clock_bus,
        }
    }

    /// The terminal layout the binder queries.
    pub fn layout(&self) -> &TerminalLayout {
        &self.layout
    }

    /// Binds every port of the plan.
    ///
    /// A missing clock connection is reported to `sink` as a warning and
    /// the clock and tick are tied low; the instance is still generated.
    pub fn bind(&self, conn: &dyn Connectivity, sink: &DiagnosticSink, instance: &str) -> GenResult<BindingTable> {
        let mut table = BindingTable::new();

        let data = [
            (ports::ADDRESS, self.layout.address),
            (ports::DATA_IN, self.layout.data_in),
            (ports::WRITE_ENABLE, self.layout.write_enable),
            (ports::OUTPUT_ENABLE, self.layout.output_enable),
        ];
        for (port, terminal) in data {
            let fallback = BindTarget::constant(LogicVec::all_zero(self.width(port)?));
            table.insert(port, net_or(conn, terminal, fallback));
        }
        table.insert(ports::DATA_OUT, net_or(conn, self.layout.data_out, BindTarget::Open));

        for lane in &self.plan.lanes {
            let Some(port) = &lane.byte_enable else {
                continue;
            };
            let terminal = self.layout.byte_enable_terminal(lane.slice.lane).ok_or_else(|| {
                InternalError::new(format!("no terminal for byte lane {}", lane.slice.lane))
            })?;
            table.insert(port.as_str(), net_or(conn, terminal, BindTarget::constant(LogicVec::all_one(1))));
        }

        if let Some(clock) = self.layout.clock {
            self.bind_clock(&mut table, conn, clock, sink, instance);
        }

        tracing::debug!(instance, bindings = table.len(), "bound RAM ports");
        Ok(table)
    }

    fn bind_clock(
        &self,
        table: &mut BindingTable,
        conn: &dyn Connectivity,
        terminal: usize,
        sink: &DiagnosticSink,
        instance: &str,
    ) {
        let low = || BindTarget::constant(LogicVec::all_zero(1));
        if !conn.is_connected(terminal) {
            let circuit = conn.circuit_name();
            tracing::warn!(instance, circuit, "RAM clock input is unconnected");
            sink.emit(
                Diagnostic::warning(
                    codes::MISSING_CLOCK,
                    format!("component \"RAM\" in circuit \"{circuit}\" has no clock connection"),
                )
                .at(Location::instance(circuit, instance))
                .with_note("the clock and tick inputs are tied low, so the memory never updates")
                .with_help("connect the clock input to a clock generator or a net"),
            );
            table.insert(ports::CLOCK, low());
            table.insert(ports::TICK, low());
            return;
        }

        match conn.clock_network(terminal) {
            Some(bus) => {
                let tick = tick_phase_index(self.config.trigger, conn.requires_global_clock(), &self.clock_bus);
                tracing::trace!(instance, bus = bus.as_str(), tick, "RAM clocked from clock generator");
                table.insert(ports::CLOCK, BindTarget::clock_phase(bus.clone(), self.clock_bus.global_clock));
                table.insert(ports::TICK, BindTarget::clock_phase(bus, tick));
            }
            None => {
                table.insert(ports::CLOCK, net_or(conn, terminal, low()));
                table.insert(ports::TICK, BindTarget::constant(LogicVec::all_one(1)));
            }
        }
    }

    fn width(&self, port: &str) -> GenResult<u32> {
        self.plan
            .port_width(port)
            .ok_or_else(|| InternalError::new(format!("port {port} missing from plan")))
    }
}

fn net_or(conn: &dyn Connectivity, terminal: usize, fallback: BindTarget) -> BindTarget {
    conn.net(terminal).map(BindTarget::net).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan;
    use memgen_diagnostics::Severity;
    use memgen_netlist::{InstanceConnections, NetRef};

    fn bind(cfg: RamConfig, conn: &InstanceConnections) -> (BindingTable, DiagnosticSink) {
        let plan = plan(&cfg).unwrap();
        let sink = DiagnosticSink::new();
        let table = PortBinder::new(&cfg, &plan, ClockBusLayout::default())
            .bind(conn, &sink, "ram0")
            .unwrap();
        (table, sink)
    }

    #[test]
    fn tick_selection() {
        let layout = ClockBusLayout::default();
        assert_eq!(tick_phase_index(Trigger::RisingEdge, false, &layout), 2);
        assert_eq!(tick_phase_index(Trigger::FallingEdge, false, &layout), 3);
        assert_eq!(tick_phase_index(Trigger::RisingEdge, true, &layout), 4);
        assert_eq!(tick_phase_index(Trigger::FallingEdge, true, &layout), 4);
    }

    #[test]
    fn plain_net_clock_ticks_always() {
        let conn = InstanceConnections::new("main").connect(5, NetRef::net("s_clk"));
        let (table, sink) = bind(RamConfig::new(8, 4), &conn);
        assert!(sink.is_empty());
        assert_eq!(table.get("Clock"), Some(&BindTarget::net(NetRef::net("s_clk"))));
        assert_eq!(table.get("Tick"), Some(&BindTarget::constant(LogicVec::all_one(1))));
    }

    #[test]
    fn clock_generator_rising() {
        let conn = InstanceConnections::new("main").connect_clock(5, "s_clock_bus_0");
        let (table, _) = bind(RamConfig::new(8, 4), &conn);
        assert_eq!(table.get("Clock"), Some(&BindTarget::clock_phase("s_clock_bus_0", 4)));
        assert_eq!(table.tick_phase("Tick"), Some(2));
    }

    #[test]
    fn clock_generator_falling() {
        let conn = InstanceConnections::new("main").connect_clock(5, "s_clock_bus_0");
        let (table, _) = bind(RamConfig::new(8, 4).with_trigger(Trigger::FallingEdge), &conn);
        assert_eq!(table.tick_phase("Tick"), Some(3));
    }

    #[test]
    fn global_clock_overrides_edge() {
        let conn = InstanceConnections::new("main")
            .with_global_clock(true)
            .connect_clock(5, "s_clock_bus_0");
        let (table, _) = bind(RamConfig::new(8, 4).with_trigger(Trigger::FallingEdge), &conn);
        assert_eq!(table.tick_phase("Tick"), Some(4));
    }

    #[test]
    fn missing_clock_warns_and_ties_low() {
        let conn = InstanceConnections::new("top");
        let (table, sink) = bind(RamConfig::new(8, 4), &conn);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].code, codes::MISSING_CLOCK);
        assert_eq!(
            diags[0].message,
            "component \"RAM\" in circuit \"top\" has no clock connection"
        );
        assert!(!sink.has_errors());
        let low = BindTarget::constant(LogicVec::all_zero(1));
        assert_eq!(table.get("Clock"), Some(&low));
        assert_eq!(table.get("Tick"), Some(&low));
    }

    #[test]
    fn unconnected_fallbacks() {
        let conn = InstanceConnections::new("main").connect(5, NetRef::net("s_clk"));
        let (table, _) = bind(RamConfig::new(12, 3).with_byte_enables(true), &conn);
        assert_eq!(table.get("Address"), Some(&BindTarget::constant(LogicVec::all_zero(3))));
        assert_eq!(table.get("DataIn"), Some(&BindTarget::constant(LogicVec::all_zero(12))));
        assert_eq!(table.get("WE"), Some(&BindTarget::constant(LogicVec::all_zero(1))));
        assert_eq!(table.get("DataOut"), Some(&BindTarget::Open));
        assert_eq!(table.get("ByteEnable0"), Some(&BindTarget::constant(LogicVec::all_one(1))));
        assert_eq!(table.get("ByteEnable1"), Some(&BindTarget::constant(LogicVec::all_one(1))));
    }

    #[test]
    fn byte_enables_bind_reversed() {
        let conn = InstanceConnections::new("main")
            .connect(5, NetRef::net("s_clk"))
            .connect(6, NetRef::net("s_be_top"))
            .connect(7, NetRef::net("s_be_bottom"));
        let (table, _) = bind(RamConfig::new(16, 3).with_byte_enables(true), &conn);
        assert_eq!(table.get("ByteEnable0"), Some(&BindTarget::net(NetRef::net("s_be_bottom"))));
        assert_eq!(table.get("ByteEnable1"), Some(&BindTarget::net(NetRef::net("s_be_top"))));
    }

    #[test]
    fn every_port_bound_once() {
        let cfg = RamConfig::new(20, 5).with_byte_enables(true);
        let plan = plan(&cfg).unwrap();
        let conn = InstanceConnections::new("main").connect_clock(5, "clk");
        let sink = DiagnosticSink::new();
        let table = PortBinder::new(&cfg, &plan, ClockBusLayout::default())
            .bind(&conn, &sink, "ram0")
            .unwrap();
        let bound: Vec<String> = table.iter().map(|b| b.port).collect();
        let declared: Vec<String> = plan.ports.iter().map(|p| p.name.clone()).collect();
        assert_eq!(bound, declared);
    }
}
