//! Named array types, used to declare memory storage.

use serde::{Deserialize, Serialize};

/// A named array-of-vectors type (`entries` words of `element_width` bits).
///
/// Index range is `entries - 1` down to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    /// The type name.
    pub name: String,
    /// The number of entries.
    pub entries: u32,
    /// The width of each entry in bits.
    pub element_width: u32,
}

impl ArrayType {
    /// Creates a new array type.
    pub fn new(name: impl Into<String>, entries: u32, element_width: u32) -> Self {
        Self {
            name: name.into(),
            entries,
            element_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_array_type() {
        let ty = ArrayType::new("BYTE_ARRAY", 16, 8);
        assert_eq!(ty.name, "BYTE_ARRAY");
        assert_eq!((ty.entries, ty.element_width), (16, 8));
    }
}
