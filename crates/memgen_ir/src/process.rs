//! Clocked processes.
//!
//! Every process in a generated RAM is synchronous: its body runs once per
//! rising edge of a single clock signal.

use crate::signal::SignalRef;
use crate::stmt::Statement;
use serde::{Deserialize, Serialize};

/// A labelled process clocked on the rising edge of `clock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// The process label.
    pub name: String,
    /// The clock signal; the process is sensitive to it alone.
    pub clock: String,
    /// The process body.
    pub body: Statement,
}

impl Process {
    /// A process whose body runs on every rising edge of `clock`.
    pub fn clocked(name: impl Into<String>, clock: impl Into<String>, body: Statement) -> Self {
        Self {
            name: name.into(),
            clock: clock.into(),
            body,
        }
    }

    /// Every signal reference used in the body.
    pub fn signal_refs(&self) -> Vec<&SignalRef> {
        self.body.signal_refs()
    }
}
