//! Language-independent RTL description of one generated component.
//!
//! An [`RtlUnit`] holds the declaration sets (ports, array types, storage,
//! registers, wires) and the ordered behavioral body (remarks, concurrent
//! assignments, processes). Backends such as `memgen_vhdl` turn a unit into
//! text; nothing in this crate knows any HDL grammar.
//!
//! All references are by name. Names are unique within a unit, which
//! [`RtlUnit::undeclared_references`] can check.

#![warn(missing_docs)]

pub mod expr;
pub mod port;
pub mod process;
pub mod signal;
pub mod stmt;
pub mod types;
pub mod unit;

pub use expr::{BinaryOp, Expr};
pub use port::{Port, PortDirection};
pub use process::Process;
pub use signal::{Signal, SignalKind, SignalRef, Storage, StorageRole};
pub use stmt::Statement;
pub use types::ArrayType;
pub use unit::{Assignment, Item, RtlUnit};
