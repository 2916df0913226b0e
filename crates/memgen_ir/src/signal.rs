//! Internal signals, storage arrays, and references to them.
//!
//! A [`Signal`] is a named register or wire inside a unit. A [`Storage`]
//! is a memory array instance of a declared [`ArrayType`](crate::ArrayType).
//! [`SignalRef`] refers to a full signal, one bit, a bit slice, or an
//! array element.

use serde::{Deserialize, Serialize};

/// The kind of an internal signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Driven by a clocked process.
    Reg,
    /// Driven combinationally.
    Wire,
}

/// A register or wire within a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// The signal name.
    pub name: String,
    /// The width in bits.
    pub width: u32,
    /// Register or wire.
    pub kind: SignalKind,
}

impl Signal {
    /// Creates a register.
    pub fn reg(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            kind: SignalKind::Reg,
        }
    }

    /// Creates a wire.
    pub fn wire(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            kind: SignalKind::Wire,
        }
    }
}

/// What part of the memory word a storage array holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageRole {
    /// The whole word, when byte enables are off.
    FullWord,
    /// One full 8-bit lane.
    ByteLane(u32),
    /// The narrower top lane of a word whose width is not a multiple of 8.
    RaggedRemainder,
}

/// A memory array declared inside a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    /// The array signal name.
    pub name: String,
    /// The name of its [`ArrayType`](crate::ArrayType).
    pub ty: String,
    /// The width of each entry.
    pub entry_width: u32,
    /// The number of entries.
    pub entry_count: u32,
    /// Which part of the word this array holds.
    pub role: StorageRole,
}

/// A reference to a signal, port, or part of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalRef {
    /// The whole signal.
    Whole(String),
    /// A single bit.
    Bit {
        /// The signal being indexed.
        name: String,
        /// The bit index.
        index: u32,
    },
    /// A bit slice `high downto low`.
    Slice {
        /// The signal being sliced.
        name: String,
        /// The high bit index (inclusive).
        high: u32,
        /// The low bit index (inclusive).
        low: u32,
    },
    /// One entry of a storage array, addressed by an unsigned signal.
    Element {
        /// The storage array.
        array: String,
        /// The address.
        address: Box<SignalRef>,
    },
}

impl SignalRef {
    /// Refers to a whole signal.
    pub fn whole(name: impl Into<String>) -> Self {
        SignalRef::Whole(name.into())
    }

    /// Refers to one bit of a signal.
    pub fn bit(name: impl Into<String>, index: u32) -> Self {
        SignalRef::Bit {
            name: name.into(),
            index,
        }
    }

    /// Refers to a bit slice of a signal.
    pub fn slice(name: impl Into<String>, high: u32, low: u32) -> Self {
        SignalRef::Slice {
            name: name.into(),
            high,
            low,
        }
    }

    /// Refers to an entry of `array` selected by `address`.
    pub fn element(array: impl Into<String>, address: SignalRef) -> Self {
        SignalRef::Element {
            array: array.into(),
            address: Box::new(address),
        }
    }

    /// Every declared name this reference reads, outermost first.
    pub fn names(&self) -> Vec<&str> {
        match self {
            SignalRef::Whole(name)
            | SignalRef::Bit { name, .. }
            | SignalRef::Slice { name, .. } => vec![name.as_str()],
            SignalRef::Element { array, address } => {
                let mut names = vec![array.as_str()];
                names.extend(address.names());
                names
            }
        }
    }
}
