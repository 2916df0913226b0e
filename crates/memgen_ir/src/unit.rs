//! The complete description of one generated component.

use crate::expr::Expr;
use crate::port::Port;
use crate::process::Process;
use crate::signal::{Signal, SignalRef, Storage};
use crate::types::ArrayType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A concurrent (out-of-process) signal assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The target signal or signal slice.
    pub target: SignalRef,
    /// The value expression.
    pub value: Expr,
}

/// One entry of a unit body, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// A remark block introducing the next section.
    Remark(String),
    /// A concurrent assignment.
    Assign(Assignment),
    /// A process.
    Process(Process),
}

/// Declarations and body of one generated component.
///
/// Declaration lists are kept in the order the planner produced them and
/// the body in emission order, so rendering the same unit twice yields
/// identical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlUnit {
    /// The component name.
    pub name: String,
    /// External ports.
    pub ports: Vec<Port>,
    /// Array type declarations.
    pub types: Vec<ArrayType>,
    /// Storage arrays.
    pub storage: Vec<Storage>,
    /// Internal registers.
    pub registers: Vec<Signal>,
    /// Internal combinational wires.
    pub wires: Vec<Signal>,
    /// The behavioral body.
    pub body: Vec<Item>,
}

impl RtlUnit {
    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Every name declared by this unit (ports, storage, registers, wires).
    pub fn declared_names(&self) -> BTreeSet<&str> {
        self.ports
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.storage.iter().map(|s| s.name.as_str()))
            .chain(self.registers.iter().map(|s| s.name.as_str()))
            .chain(self.wires.iter().map(|s| s.name.as_str()))
            .collect()
    }

    /// Names used in the body (including process clocks) that are not
    /// declared. Empty for a well-formed unit.
    pub fn undeclared_references(&self) -> BTreeSet<String> {
        let declared = self.declared_names();
        let mut used: Vec<&str> = Vec::new();
        for item in &self.body {
            match item {
                Item::Remark(_) => {}
                Item::Assign(a) => {
                    used.extend(a.target.names());
                    used.extend(a.value.signal_refs().into_iter().flat_map(SignalRef::names));
                }
                Item::Process(p) => {
                    used.push(p.clock.as_str());
                    used.extend(p.signal_refs().into_iter().flat_map(SignalRef::names));
                }
            }
        }
        used.into_iter()
            .filter(|name| !declared.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Names declared more than once. Empty for a well-formed unit.
    pub fn duplicate_names(&self) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        self.ports
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.storage.iter().map(|s| s.name.as_str()))
            .chain(self.registers.iter().map(|s| s.name.as_str()))
            .chain(self.wires.iter().map(|s| s.name.as_str()))
            .filter(|name| !seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}
