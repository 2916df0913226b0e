//! Fixed-width vectors of logic values, used for constant port bindings.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vector of [`Logic`] values, bit 0 being the least significant.
///
/// Displayed most-significant bit first, which is the order HDL literals
/// are written in.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    bits: Vec<Logic>,
}

impl LogicVec {
    /// Creates a vector of `width` copies of `value`.
    pub fn filled(width: u32, value: Logic) -> Self {
        Self {
            bits: vec![value; width as usize],
        }
    }

    /// Creates a `LogicVec` with all bits set to `Zero`.
    pub fn all_zero(width: u32) -> Self {
        Self::filled(width, Logic::Zero)
    }

    /// Creates a `LogicVec` with all bits set to `One`.
    pub fn all_one(width: u32) -> Self {
        Self::filled(width, Logic::One)
    }

    /// Creates a single-bit `LogicVec` from a boolean value.
    pub fn from_bool(value: bool) -> Self {
        Self::filled(1, Logic::from_bool(value))
    }

    /// Returns the number of logic values in this vector.
    pub fn width(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Gets the logic value at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width(),
            "index {index} out of bounds for width {}",
            self.width()
        );
        self.bits[index as usize]
    }

    /// Iterates from the most significant bit down to bit 0.
    pub fn iter_msb_first(&self) -> impl Iterator<Item = Logic> + '_ {
        self.bits.iter().rev().copied()
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_msb_first() {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec({}'b{self})", self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_and_one() {
        let z = LogicVec::all_zero(4);
        assert_eq!(z.width(), 4);
        assert_eq!(z.to_string(), "0000");

        let o = LogicVec::all_one(3);
        assert_eq!(o.get(2), Logic::One);
        assert_eq!(o.to_string(), "111");
    }

    #[test]
    fn from_bool() {
        assert_eq!(LogicVec::from_bool(true).get(0), Logic::One);
        assert_eq!(LogicVec::from_bool(false).get(0), Logic::Zero);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds() {
        LogicVec::all_zero(2).get(2);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", LogicVec::all_one(2)), "LogicVec(2'b11)");
    }

    #[test]
    fn serde_roundtrip() {
        let v = LogicVec::all_one(5);
        let json = serde_json::to_string(&v).unwrap();
        let back: LogicVec = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
