//! References to nets and buses of the surrounding design.

use serde::{Deserialize, Serialize};

/// A reference to (part of) a net in the enclosing design.
///
/// Untagged so configuration files can write a bare `"s_net_3"` for a whole
/// net, `{ net = "s_bus_1", bit = 2 }` for one bit, `{ net = "s_bus_1",
/// high = 7, low = 0 }` for a slice and `{ concat = [...] }` for a
/// most-significant-first concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetRef {
    /// A whole net or bus.
    Net(String),
    /// One bit of a bus.
    Bit {
        /// The bus name.
        net: String,
        /// The bit index.
        bit: u32,
    },
    /// A contiguous slice of a bus.
    Slice {
        /// The bus name.
        net: String,
        /// The high bit (inclusive).
        high: u32,
        /// The low bit (inclusive).
        low: u32,
    },
    /// Several pieces joined, most significant first.
    Concat {
        /// The pieces.
        concat: Vec<NetRef>,
    },
}

impl NetRef {
    /// A whole net.
    pub fn net(name: impl Into<String>) -> Self {
        NetRef::Net(name.into())
    }

    /// One bit of a bus.
    pub fn bit(net: impl Into<String>, bit: u32) -> Self {
        NetRef::Bit {
            net: net.into(),
            bit,
        }
    }

    /// A slice of a bus.
    pub fn slice(net: impl Into<String>, high: u32, low: u32) -> Self {
        NetRef::Slice {
            net: net.into(),
            high,
            low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_forms() {
        let whole: NetRef = serde_json::from_str(r#""s_net_1""#).unwrap();
        assert_eq!(whole, NetRef::net("s_net_1"));

        let bit: NetRef = serde_json::from_str(r#"{"net":"s_bus","bit":3}"#).unwrap();
        assert_eq!(bit, NetRef::bit("s_bus", 3));

        let slice: NetRef = serde_json::from_str(r#"{"net":"s_bus","high":7,"low":4}"#).unwrap();
        assert_eq!(slice, NetRef::slice("s_bus", 7, 4));

        let concat: NetRef =
            serde_json::from_str(r#"{"concat":["a",{"net":"b","bit":0}]}"#).unwrap();
        assert_eq!(
            concat,
            NetRef::Concat {
                concat: vec![NetRef::net("a"), NetRef::bit("b", 0)]
            }
        );
    }
}
