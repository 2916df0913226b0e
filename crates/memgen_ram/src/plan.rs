//! Every name and width the generated RAM declares.
//!
//! The emitter and the port binder both read lane and port names from a
//! [`SignalPlan`] instead of formatting them on their own, so the port map
//! of an instance always matches the entity it instantiates.

use crate::config::{LaneSlice, RamConfig};
use crate::feasibility::unsupported_reasons;
use memgen_common::{GenResult, InternalError};
use memgen_ir::{ArrayType, Port, Signal, Storage, StorageRole};
use serde::{Deserialize, Serialize};

/// Port names of the generated entity.
pub mod ports {
    /// Word address input.
    pub const ADDRESS: &str = "Address";
    /// Write data input.
    pub const DATA_IN: &str = "DataIn";
    /// Read data output.
    pub const DATA_OUT: &str = "DataOut";
    /// Write enable input.
    pub const WRITE_ENABLE: &str = "WE";
    /// Output (read) enable input.
    pub const OUTPUT_ENABLE: &str = "OE";
    /// Global clock input.
    pub const CLOCK: &str = "Clock";
    /// Tick strobe input.
    pub const TICK: &str = "Tick";

    /// Enable input of byte lane `lane`.
    pub fn byte_enable(lane: u32) -> String {
        format!("ByteEnable{lane}")
    }
}

/// Internal register names.
pub mod regs {
    /// Three-stage shift register of the tick strobe.
    pub const TICK_DELAY_LINE: &str = "s_TickDelayLine";
    /// Captured write data.
    pub const DATA_IN: &str = "s_DataInReg";
    /// Captured address.
    pub const ADDRESS: &str = "s_AddressReg";
    /// Captured write enable.
    pub const WRITE_ENABLE: &str = "s_WEReg";
    /// Captured output enable.
    pub const OUTPUT_ENABLE: &str = "s_OEReg";
    /// Captured byte enables, one bit per lane.
    pub const BYTE_ENABLE: &str = "s_ByteEnableReg";
}

/// Internal wire names.
pub mod wires {
    /// Data read out of storage, before the output register.
    pub const RAM_DATA_OUT: &str = "s_ram_data_out";
    /// Write pulse without byte enables.
    pub const WRITE_PULSE: &str = "s_we";
    /// Read pulse without byte enables.
    pub const READ_PULSE: &str = "s_oe";

    /// Write pulse of byte lane `lane`.
    pub fn lane_write_pulse(lane: u32) -> String {
        format!("s_we_{lane}")
    }

    /// Read pulse of byte lane `lane`.
    pub fn lane_read_pulse(lane: u32) -> String {
        format!("s_byte_enable_{lane}")
    }
}

/// Storage array and array type names.
pub mod arrays {
    /// Whole-word storage.
    pub const MEMORY: &str = "s_mem_contents";
    /// Storage of the ragged top lane.
    pub const TRUNCATED: &str = "s_trunc_mem_contents";
    /// Type of whole-word storage.
    pub const MEMORY_TYPE: &str = "MEMORY_ARRAY";
    /// Type of full byte-lane storage.
    pub const BYTE_TYPE: &str = "BYTE_ARRAY";
    /// Type of the ragged top lane.
    pub const REST_TYPE: &str = "REST_ARRAY";

    /// Storage of full byte lane `lane`.
    pub fn byte_lane(lane: u32) -> String {
        format!("s_byte_mem_{lane}_contents")
    }
}

/// Number of stages in the tick delay line.
pub const TICK_DELAY_STAGES: u32 = 3;

/// Names belonging to one lane of the memory word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePlan {
    /// The bits of the word this lane covers.
    pub slice: LaneSlice,
    /// The storage array holding the lane.
    pub storage: String,
    /// Wire carrying the lane's write pulse.
    pub write_pulse: String,
    /// Wire carrying the lane's read pulse.
    pub read_pulse: String,
    /// The lane's byte-enable port, when byte enables are on.
    pub byte_enable: Option<String>,
    /// Label of the process that writes and reads the storage.
    pub memory_process: String,
    /// Label of the process that drives the output slice.
    pub output_process: String,
}

/// The declaration sets of one RAM instance.
///
/// Ports, registers, wires and types are sorted by name. Storage and lanes
/// are in lane order, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPlan {
    /// External ports.
    pub ports: Vec<Port>,
    /// Internal registers.
    pub registers: Vec<Signal>,
    /// Internal wires.
    pub wires: Vec<Signal>,
    /// Array types.
    pub types: Vec<ArrayType>,
    /// Storage arrays.
    pub storage: Vec<Storage>,
    /// Per-lane names.
    pub lanes: Vec<LanePlan>,
}

impl SignalPlan {
    /// Looks up a port width.
    pub fn port_width(&self, name: &str) -> Option<u32> {
        self.ports.iter().find(|p| p.name == name).map(|p| p.width)
    }
}

/// Derives the declaration sets for `cfg`.
///
/// Callers must run the feasibility gate first; planning an unsupported
/// configuration is a generator bug and fails with an [`InternalError`].
pub fn plan(cfg: &RamConfig) -> GenResult<SignalPlan> {
    let reasons = unsupported_reasons(cfg);
    if !reasons.is_empty() {
        let listed: Vec<String> = reasons.iter().map(ToString::to_string).collect();
        return Err(InternalError::new(format!(
            "signal planner invoked on an unsupported RAM: {}",
            listed.join(", ")
        )));
    }

    let lane_count = cfg.lane_count();
    let lanes: Vec<LanePlan> = cfg.lane_slices().into_iter().map(|slice| lane_plan(cfg, slice)).collect();

    let mut ports = vec![
        Port::input(ports::ADDRESS, cfg.address_width),
        Port::input(ports::DATA_IN, cfg.data_width),
        Port::input(ports::WRITE_ENABLE, 1),
        Port::input(ports::OUTPUT_ENABLE, 1),
        Port::output(ports::DATA_OUT, cfg.data_width),
    ];
    if !cfg.is_asynchronous() {
        ports.push(Port::input(ports::CLOCK, 1));
        ports.push(Port::input(ports::TICK, 1));
    }
    ports.extend(lanes.iter().filter_map(|lane| lane.byte_enable.as_ref()).map(|name| Port::input(name.clone(), 1)));
    ports.sort_by(|a, b| a.name.cmp(&b.name));

    let mut registers = vec![
        Signal::reg(regs::TICK_DELAY_LINE, TICK_DELAY_STAGES),
        Signal::reg(regs::DATA_IN, cfg.data_width),
        Signal::reg(regs::ADDRESS, cfg.address_width),
        Signal::reg(regs::WRITE_ENABLE, 1),
        Signal::reg(regs::OUTPUT_ENABLE, 1),
    ];
    if cfg.byte_enables {
        registers.push(Signal::reg(regs::BYTE_ENABLE, lane_count));
    }
    registers.sort_by(|a, b| a.name.cmp(&b.name));

    let mut wires = vec![Signal::wire(wires::RAM_DATA_OUT, cfg.data_width)];
    for lane in &lanes {
        wires.push(Signal::wire(lane.write_pulse.clone(), 1));
        wires.push(Signal::wire(lane.read_pulse.clone(), 1));
    }
    wires.sort_by(|a, b| a.name.cmp(&b.name));

    let entries = cfg.entry_count();
    let storage: Vec<Storage> = lanes
        .iter()
        .map(|lane| {
            let role = storage_role(cfg, lane.slice);
            Storage {
                name: lane.storage.clone(),
                ty: type_name(role).to_string(),
                entry_width: lane.slice.width(),
                entry_count: entries,
                role,
            }
        })
        .collect();

    let mut types: Vec<ArrayType> = Vec::new();
    for s in &storage {
        if !types.iter().any(|t| t.name == s.ty) {
            types.push(ArrayType::new(s.ty.clone(), entries, s.entry_width));
        }
    }
    types.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::trace!(
        ports = ports.len(),
        registers = registers.len(),
        wires = wires.len(),
        lanes = lanes.len(),
        "planned RAM signals"
    );

    Ok(SignalPlan {
        ports,
        registers,
        wires,
        types,
        storage,
        lanes,
    })
}

fn lane_plan(cfg: &RamConfig, slice: LaneSlice) -> LanePlan {
    let lane = slice.lane;
    if !cfg.byte_enables {
        return LanePlan {
            slice,
            storage: arrays::MEMORY.to_string(),
            write_pulse: wires::WRITE_PULSE.to_string(),
            read_pulse: wires::READ_PULSE.to_string(),
            byte_enable: None,
            memory_process: "Mem".to_string(),
            output_process: "Res".to_string(),
        };
    }
    let storage = match storage_role(cfg, slice) {
        StorageRole::RaggedRemainder => arrays::TRUNCATED.to_string(),
        _ => arrays::byte_lane(lane),
    };
    LanePlan {
        slice,
        storage,
        write_pulse: wires::lane_write_pulse(lane),
        read_pulse: wires::lane_read_pulse(lane),
        byte_enable: Some(ports::byte_enable(lane)),
        memory_process: format!("Mem{lane}"),
        output_process: format!("Res{lane}"),
    }
}

fn storage_role(cfg: &RamConfig, slice: LaneSlice) -> StorageRole {
    if !cfg.byte_enables {
        StorageRole::FullWord
    } else if cfg.is_ragged() && slice.lane + 1 == cfg.lane_count() {
        StorageRole::RaggedRemainder
    } else {
        StorageRole::ByteLane(slice.lane)
    }
}

fn type_name(role: StorageRole) -> &'static str {
    match role {
        StorageRole::FullWord => arrays::MEMORY_TYPE,
        StorageRole::ByteLane(_) => arrays::BYTE_TYPE,
        StorageRole::RaggedRemainder => arrays::REST_TYPE,
    }
}
