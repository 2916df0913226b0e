//! Where in a circuit a diagnostic originates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A component instance inside a named circuit.
///
/// Generated designs have no source text to point into, so diagnostics are
/// anchored to the circuit and the component instance that produced them.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The circuit (sheet) containing the component.
    pub circuit: String,
    /// The instance label of the component.
    pub instance: String,
}

impl Location {
    /// A location naming a component instance inside a circuit.
    pub fn instance(circuit: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            circuit: circuit.into(),
            instance: instance.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circuit \"{}\", instance \"{}\"", self.circuit, self.instance)
    }
}
