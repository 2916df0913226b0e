//! Port definitions for a unit's external interface.

use serde::{Deserialize, Serialize};

/// The direction of a port on a unit boundary.
///
/// Bidirectional ports are never generated: memories with a combined data
/// bus are rejected before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortDirection {
    /// An input port (data flows into the unit).
    Input,
    /// An output port (data flows out of the unit).
    Output,
}

/// A port in a unit's external interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The port name.
    pub name: String,
    /// The direction of data flow.
    pub direction: PortDirection,
    /// The width in bits; width 1 is a scalar.
    pub width: u32,
}

impl Port {
    /// Creates an input port.
    pub fn input(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            width,
        }
    }

    /// Creates an output port.
    pub fn output(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Output,
            width,
        }
    }
}
