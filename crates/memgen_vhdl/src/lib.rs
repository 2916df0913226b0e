//! Renders [`RtlUnit`](memgen_ir::RtlUnit)s and their port maps as VHDL-93.
//!
//! Single-bit ports and signals are declared `std_logic`; everything wider
//! is a `std_logic_vector` with a descending range. References to a bit or
//! one-bit slice are written so that both sides of every assignment have
//! the same type.

#![warn(missing_docs)]

pub mod instance;
pub mod unit;
mod writer;

pub use instance::render_instance;
pub use unit::render_unit;

/// Extension of generated VHDL files.
pub const FILE_EXTENSION: &str = "vhd";

/// The VHDL type of a `width`-bit port or signal.
pub fn vector_type(width: u32) -> String {
    if width == 1 {
        "std_logic".to_string()
    } else {
        format!("std_logic_vector( {} DOWNTO 0 )", width - 1)
    }
}
