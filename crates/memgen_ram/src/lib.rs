//! RTL generation for the simulator's synchronous RAM component.
//!
//! A RAM instance goes through four stages:
//!
//! 1. [`feasibility`] decides whether the configuration can be expressed
//!    as synthesizable RTL at all.
//! 2. [`plan`] derives every port, register, wire, array type and storage
//!    name, including the per-lane names when byte enables are on.
//! 3. [`emit`] builds the behavioral body: input capture, the three-stage
//!    tick delay line, per-lane memory processes and output registers.
//! 4. [`bind`] maps the component's ports to nets of the parent circuit,
//!    selecting the right clock-bus phase for the tick input.
//!
//! [`RamGenerator`] runs the stages in order for one instance.

#![warn(missing_docs)]

pub mod bind;
pub mod codes;
pub mod config;
pub mod emit;
pub mod feasibility;
pub mod generator;
pub mod layout;
pub mod plan;

pub use bind::{tick_phase_index, PortBinder};
pub use config::{DataBus, LaneSlice, RamConfig, ReadPolicy, Trigger};
pub use feasibility::{is_supported, unsupported_reasons, UnsupportedReason};
pub use generator::{Dialect, GenError, RamArtifact, RamGenerator};
pub use layout::{byte_enable_terminal, TerminalLayout};
pub use plan::{LanePlan, SignalPlan};
