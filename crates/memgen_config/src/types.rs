//! Configuration types deserialized from `memgen.toml`.

use crate::error::ConfigError;
use memgen_netlist::{ClockBusLayout, InstanceConnections, TerminalDriver};
use memgen_ram::{is_supported, DataBus, Dialect, RamConfig, ReadPolicy, TerminalLayout, Trigger};
use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level project configuration parsed from `memgen.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata and generation settings.
    pub project: ProjectMeta,
    /// Bit layout of the clock generators' buses.
    #[serde(default)]
    pub clock_bus: ClockBusLayout,
    /// The RAM instances to generate, in file order.
    #[serde(default)]
    pub ram: Vec<RamInstance>,
}

impl ProjectConfig {
    /// Looks up an instance by name.
    pub fn instance(&self, name: &str) -> Result<&RamInstance, ConfigError> {
        self.ram
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ConfigError::UnknownInstance(name.to_string()))
    }
}

/// Core project metadata.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// The project version string.
    pub version: String,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
    /// The HDL dialect to generate.
    #[serde(default)]
    pub dialect: Dialect,
    /// Directory, relative to the project root, generated files go into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Whether the design runs every clocked component on one global clock.
    #[serde(default)]
    pub global_clock: bool,
}

fn default_output_dir() -> String {
    "hdl".to_string()
}

/// One `[[ram]]` table.
#[derive(Debug, Deserialize)]
pub struct RamInstance {
    /// Instance label; also names the generated files.
    pub name: String,
    /// The circuit containing the instance.
    #[serde(default = "default_circuit")]
    pub circuit: String,
    /// Bits per word.
    pub data_width: u32,
    /// Address bits.
    pub address_width: u32,
    /// Trigger policy.
    #[serde(default = "default_trigger")]
    pub trigger: Trigger,
    /// Whether each byte lane has its own enable.
    #[serde(default)]
    pub byte_enables: bool,
    /// Number of line enables.
    #[serde(default)]
    pub line_enables: u32,
    /// Data bus topology.
    #[serde(default = "default_bus")]
    pub bus: DataBus,
    /// Whether the RAM has a clear input.
    #[serde(default)]
    pub clear_pin: bool,
    /// Same-cycle read/write behavior.
    #[serde(default = "default_read_policy")]
    pub read_policy: ReadPolicy,
    /// Whether reads are asynchronous.
    #[serde(default)]
    pub async_read: bool,
    /// Terminal name to driver.
    #[serde(default)]
    pub connections: BTreeMap<String, TerminalDriver>,
}

fn default_circuit() -> String {
    "main".to_string()
}

fn default_trigger() -> Trigger {
    Trigger::RisingEdge
}

fn default_bus() -> DataBus {
    DataBus::Separate
}

fn default_read_policy() -> ReadPolicy {
    ReadPolicy::ReadAfterWrite
}

impl RamInstance {
    /// The instance's attribute snapshot.
    pub fn config(&self) -> RamConfig {
        RamConfig {
            data_width: self.data_width,
            address_width: self.address_width,
            trigger: self.trigger,
            byte_enables: self.byte_enables,
            line_enables: self.line_enables,
            bus: self.bus,
            clear_pin: self.clear_pin,
            read_policy: self.read_policy,
            async_read: self.async_read,
        }
    }

    /// Builds the instance's connectivity, resolving terminal names to
    /// indices.
    ///
    /// Unsupported RAMs are never bound, so their connections are left
    /// unresolved and the result only names the circuit.
    pub fn connectivity(&self, global_clock: bool) -> Result<InstanceConnections, ConfigError> {
        let cfg = self.config();
        let mut conn = InstanceConnections::new(self.circuit.as_str()).with_global_clock(global_clock);
        if !is_supported(&cfg) {
            return Ok(conn);
        }
        let layout = TerminalLayout::for_config(&cfg);
        for (terminal, driver) in &self.connections {
            let index = layout.index_of(terminal).ok_or_else(|| ConfigError::UnknownTerminal {
                instance: self.name.clone(),
                terminal: terminal.clone(),
                expected: layout
                    .names()
                    .into_iter()
                    .map(|(name, _)| name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
            conn.attach(index, driver.clone());
        }
        Ok(conn)
    }
}
